//! End-to-end tests against the real OS event source

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::timeout;
use watcher::{SemanticEvent, Watcher, WatcherConfig};

const WAIT: Duration = Duration::from_secs(5);

/// Receive events until `wanted` shows up, returning everything seen
async fn collect_until(
    rx: &mut mpsc::UnboundedReceiver<SemanticEvent>,
    wanted: &SemanticEvent,
) -> Vec<SemanticEvent> {
    let mut seen = Vec::new();
    loop {
        match timeout(WAIT, rx.recv()).await {
            Ok(Some(event)) => {
                let done = &event == wanted;
                seen.push(event);
                if done {
                    return seen;
                }
            }
            Ok(None) => panic!("event stream closed, saw {:?}", seen),
            Err(_) => panic!("timed out waiting for {:?}, saw {:?}", wanted, seen),
        }
    }
}

type EventWatcher = Watcher<mpsc::UnboundedSender<SemanticEvent>>;

fn start(
    temp_dir: &TempDir,
    config: WatcherConfig,
) -> (EventWatcher, mpsc::UnboundedReceiver<SemanticEvent>, PathBuf) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = Watcher::new(temp_dir.path(), tx, config).unwrap();
    watcher.start().unwrap();
    let root = watcher.root().to_path_buf();
    (watcher, rx, root)
}

#[tokio::test]
async fn test_create_and_delete_file() {
    let temp_dir = TempDir::new().unwrap();
    let (mut watcher, mut rx, root) = start(&temp_dir, WatcherConfig::default());
    let file = root.join("a.txt");

    // Empty file: a write would add a modify notification that can race
    // with the removal below
    fs::File::create(&file).unwrap();
    let seen = collect_until(&mut rx, &SemanticEvent::Added(file.clone())).await;
    assert_eq!(seen, vec![SemanticEvent::Added(file.clone())]);

    fs::remove_file(&file).unwrap();
    let seen = collect_until(&mut rx, &SemanticEvent::Deleted(file.clone())).await;
    assert!(!seen.contains(&SemanticEvent::Added(file.clone())));

    watcher.stop().await.unwrap();
}

#[tokio::test]
async fn test_ignored_and_marker_files_stay_silent() {
    let temp_dir = TempDir::new().unwrap();
    let config = WatcherConfig {
        ignore_patterns: vec!["*.tmp".to_string()],
        ..Default::default()
    };
    let (mut watcher, mut rx, root) = start(&temp_dir, config);

    fs::write(root.join("scratch.tmp"), b"x").unwrap();
    fs::write(root.join(".DS_Store"), b"x").unwrap();
    let marker = root.join("visible.txt");
    fs::File::create(&marker).unwrap();

    // Events are processed in order, so everything before the visible file
    // has been classified by the time it is reported
    let seen = collect_until(&mut rx, &SemanticEvent::Added(marker.clone())).await;
    assert_eq!(seen, vec![SemanticEvent::Added(marker)]);

    watcher.stop().await.unwrap();
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_rename_reported_as_delete_then_add() {
    let temp_dir = TempDir::new().unwrap();
    let (mut watcher, mut rx, root) = start(&temp_dir, WatcherConfig::default());
    let old = root.join("old.txt");
    let new = root.join("new.txt");

    fs::File::create(&old).unwrap();
    collect_until(&mut rx, &SemanticEvent::Added(old.clone())).await;

    fs::rename(&old, &new).unwrap();
    let seen = collect_until(&mut rx, &SemanticEvent::Added(new.clone())).await;

    let deleted_at = seen
        .iter()
        .position(|e| e == &SemanticEvent::Deleted(old.clone()))
        .expect("old path reported deleted");
    assert_eq!(deleted_at, seen.len() - 2);

    watcher.stop().await.unwrap();
}

#[tokio::test]
async fn test_no_events_after_stop() {
    let temp_dir = TempDir::new().unwrap();
    let (mut watcher, mut rx, root) = start(&temp_dir, WatcherConfig::default());

    watcher.stop().await.unwrap();
    fs::write(root.join("late.txt"), b"x").unwrap();

    // The worker dropped the sink on exit, so the stream just ends
    let next = timeout(WAIT, rx.recv()).await.unwrap();
    assert_eq!(next, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_returns_with_full_queues() {
    let temp_dir = TempDir::new().unwrap();
    let config = WatcherConfig {
        channel_capacity: 1,
        ..Default::default()
    };
    // Never drained, so the worker blocks on delivery and the event
    // queue fills up behind it
    let (tx, _rx) = mpsc::channel(1);
    let mut watcher = Watcher::new(temp_dir.path(), tx, config).unwrap();
    watcher.start().unwrap();
    let root = watcher.root().to_path_buf();

    for i in 0..32 {
        fs::File::create(root.join(format!("f{i}.txt"))).unwrap();
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    timeout(WAIT, watcher.stop())
        .await
        .expect("stop did not return")
        .unwrap();
    assert!(!watcher.is_running());
}
