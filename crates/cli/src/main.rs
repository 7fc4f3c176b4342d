//! fmon - print classified file system changes

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod config;
mod output;

/// fmon - watch a directory and report added, changed and deleted paths
#[derive(Parser)]
#[command(name = "fmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a directory and print one line per change until Ctrl-C
    Watch {
        /// Directory to watch
        dir: PathBuf,
        /// Print JSON objects instead of text
        #[arg(long)]
        json: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
        /// Additional gitignore-style pattern to ignore (repeatable)
        #[arg(long = "ignore", value_name = "GLOB")]
        ignore: Vec<String>,
        /// Config file (default: <config dir>/fmon/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the paths the watcher would track for a directory
    List {
        /// Directory to list
        dir: PathBuf,
        /// Additional gitignore-style pattern to ignore (repeatable)
        #[arg(long = "ignore", value_name = "GLOB")]
        ignore: Vec<String>,
        /// Config file (default: <config dir>/fmon/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show configuration
    Config {
        /// Print a sample configuration file
        #[arg(long)]
        example: bool,
        /// Config file (default: <config dir>/fmon/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for events
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Watch {
            dir,
            json,
            no_color,
            ignore,
            config,
        } => {
            let options = cmd::watch::WatchOptions {
                json,
                no_color,
                ignore,
                config,
            };
            cmd::watch::run(&dir, options).await
        }
        Commands::List {
            dir,
            ignore,
            config,
        } => cmd::list::run(&dir, ignore, config.as_deref()).await,
        Commands::Config { example, config } => {
            if example {
                cmd::config::run_example()
            } else {
                cmd::config::run_show(config.as_deref())
            }
        }
    }
}
