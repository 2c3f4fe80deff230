//! Explicit run configuration handed to every command handler
//!
//! Verbosity, color and the executing command travel in a `RunContext`
//! value. Child processes receive them through their own environment;
//! the dispatcher's environment is never modified.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{project_config_path, ConfigPaths, Settings};

/// Child env var carrying the log level (`verbose` or `normal`).
pub const LOG_LEVEL_ENV: &str = "RSDISPATCH_LOG_LEVEL";

/// Child env var carrying the name of the command being executed.
pub const EXECUTING_COMMAND_ENV: &str = "RSDISPATCH_EXECUTING_COMMAND";

/// Understood by most terminal color libraries; `0` disables color.
pub const FORCE_COLOR_ENV: &str = "FORCE_COLOR";

/// A directory carrying a `.rsdispatch.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub dir: PathBuf,
    pub config_file: PathBuf,
}

impl ProjectInfo {
    /// Returns `Some` if `dir` contains a project config file.
    pub fn detect(dir: &Path) -> Option<Self> {
        let config_file = project_config_path(dir);
        config_file.is_file().then(|| Self {
            dir: dir.to_path_buf(),
            config_file,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunContext {
    /// Name of the command being executed
    pub command: String,
    pub verbose: bool,
    pub no_color: bool,
    /// Base directory (`-C` or the process working directory)
    pub cwd: PathBuf,
    pub project: Option<ProjectInfo>,
    pub settings: Arc<Settings>,
    pub paths: ConfigPaths,
}

impl RunContext {
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "verbose"
        } else {
            "normal"
        }
    }

    /// The project, or `NotInProject` naming the current command.
    pub fn require_project(&self) -> ApplicationResult<&ProjectInfo> {
        self.project
            .as_ref()
            .ok_or_else(|| ApplicationError::NotInProject {
                command: self.command.clone(),
                dir: self.cwd.clone(),
            })
    }

    /// Environment for child processes spawned on behalf of this command.
    pub fn child_env(&self) -> Vec<(String, String)> {
        let mut env = vec![
            (LOG_LEVEL_ENV.to_string(), self.log_level().to_string()),
            (EXECUTING_COMMAND_ENV.to_string(), self.command.clone()),
        ];
        if self.no_color {
            env.push((FORCE_COLOR_ENV.to_string(), "0".to_string()));
        }
        env
    }
}
