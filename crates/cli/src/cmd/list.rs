//! Print the tracked paths of a directory

use crate::config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use watcher::{DirectoryLister, PathFilter, WalkLister};

pub async fn run(dir: &Path, ignore: Vec<String>, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load(config_path)?;
    config.watcher.ignore_patterns.extend(ignore);

    for path in tracked_paths(dir, &config.watcher.ignore_patterns)? {
        println!("{}", path.display());
    }
    Ok(())
}

/// Sorted listing of `dir`, filtered the same way the watcher filters it
fn tracked_paths(dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let root = std::fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve {}", dir.display()))?;
    let filter = PathFilter::new(&root, patterns)?;
    let snapshot = WalkLister::new(filter).list(&root)?;

    Ok(snapshot.sorted().into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tracked_paths_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/main.rs"), b"").unwrap();
        fs::write(root.join("b.txt"), b"").unwrap();
        fs::write(root.join("a.log"), b"").unwrap();
        fs::write(root.join(".hidden"), b"").unwrap();

        let paths = tracked_paths(&root, &["*.log".to_string()]).unwrap();

        assert_eq!(
            paths,
            vec![root.join("b.txt"), root.join("src"), root.join("src/main.rs")]
        );
    }

    #[test]
    fn test_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(tracked_paths(&temp_dir.path().join("missing"), &[]).is_err());
    }
}
