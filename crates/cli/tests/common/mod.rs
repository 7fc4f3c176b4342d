//! Helpers for running the `fmon` binary

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// `fmon` invocation builder
pub struct FmonCommand {
    working_dir: PathBuf,
    args: Vec<String>,
}

impl FmonCommand {
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn execute(&self) -> Result<CommandResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_fmon"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run fmon")?;

        Ok(CommandResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub struct CommandResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "fmon failed\nstdout: {}\nstderr: {}",
            self.stdout, self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "fmon unexpectedly succeeded: {}", self.stdout);
        self
    }
}
