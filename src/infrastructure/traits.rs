//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing handlers
//! to be tested with mock implementations.

use std::io;
use std::path::PathBuf;

/// A fully resolved child process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the child
    pub cwd: PathBuf,
    /// Added to the inherited environment of the child only
    pub env: Vec<(String, String)>,
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    /// Exit code; `None` if terminated by a signal
    pub code: Option<i32>,
}

impl ChildExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run to completion with inherited stdio.
    fn run(&self, invocation: &Invocation) -> io::Result<ChildExit>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner using `std::process`.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ChildExit> {
        let status = std::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()?;

        Ok(ChildExit {
            code: status.code(),
        })
    }
}
