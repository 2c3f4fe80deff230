//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsdispatch/rsdispatch.toml`
//!    (directory overridable with `RSDISPATCH_CONFIG_HOME`)
//! 3. Project config: `<project_dir>/.rsdispatch.toml`
//! 4. Environment variables: `RSDISPATCH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ApplicationError, IoResultExt};

/// File name of the global config inside the config directory.
pub const GLOBAL_CONFIG_FILE: &str = "rsdispatch.toml";

/// File name of the project config; its presence marks a project directory.
pub const PROJECT_CONFIG_FILE: &str = ".rsdispatch.toml";

/// Overrides the global config directory (mainly for tests and sandboxes).
pub const CONFIG_HOME_ENV: &str = "RSDISPATCH_CONFIG_HOME";

const ENV_PREFIX: &str = "RSDISPATCH";

/// An external command declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandSpec {
    /// Subcommand name as typed by the user
    pub name: String,
    /// Program to execute (`~` and `$VAR` are expanded)
    pub program: String,
    /// Arguments placed before any user-supplied arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// One-line help text
    #[serde(default)]
    pub description: Option<String>,
    /// Requires a project directory; runs with it as working directory
    #[serde(default)]
    pub local: bool,
}

/// Unified configuration for rsdispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Whether anonymous usage collection is enabled (default: true)
    pub telemetry: bool,
    /// External commands in registration order
    pub commands: Vec<CommandSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            telemetry: true,
            commands: vec![],
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub telemetry: Option<bool>,
    pub commands: Option<Vec<CommandSpec>>,
}

/// Where configuration lives for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Global config file; `None` when no home/config directory can be determined
    pub global_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Resolve paths from `RSDISPATCH_CONFIG_HOME`, falling back to XDG.
    pub fn resolve() -> Self {
        let dir = std::env::var_os(CONFIG_HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(global_config_dir);

        Self {
            global_file: dir.map(|d| d.join(GLOBAL_CONFIG_FILE)),
        }
    }

    /// Paths rooted at an explicit config directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            global_file: Some(dir.join(GLOBAL_CONFIG_FILE)),
        }
    }
}

/// Get the XDG config directory for rsdispatch.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsdispatch").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the project config file in a project directory.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_FILE)
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input untouched.
pub fn expand_env_vars(value: &str) -> String {
    shellexpand::full(value)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Look up a declared command by name.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    fn expand_programs(&mut self) {
        for spec in &mut self.commands {
            spec.program = expand_env_vars(&spec.program);
        }
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalars: overlay wins if Some
    /// - Commands: a name from a lower layer is replaced in place, new names
    ///   are appended. A name declared twice within the overlay is an error.
    ///   Commands from a project file are always `local`.
    fn merge_with(
        &self,
        overlay: &RawSettings,
        from_project: bool,
    ) -> Result<Self, ApplicationError> {
        let mut commands = self.commands.clone();
        let overlay_commands = overlay.commands.as_deref().unwrap_or_default();

        for (i, spec) in overlay_commands.iter().enumerate() {
            if overlay_commands[..i].iter().any(|c| c.name == spec.name) {
                return Err(ApplicationError::DuplicateCommand(spec.name.clone()));
            }

            let mut spec = spec.clone();
            spec.local |= from_project;

            match commands.iter_mut().find(|c| c.name == spec.name) {
                Some(existing) => *existing = spec,
                None => commands.push(spec),
            }
        }

        Ok(Self {
            telemetry: overlay.telemetry.unwrap_or(self.telemetry),
            commands,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global_file` - Global config file (skipped if missing)
    /// * `project_dir` - Project directory whose `.rsdispatch.toml` is merged on top
    pub fn load(
        global_file: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_file {
            if path.exists() {
                debug!("loading global config: {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw, false)?;
            }
        }

        if let Some(dir) = project_dir {
            let path = project_config_path(dir);
            if path.exists() {
                debug!("loading project config: {}", path.display());
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw, true)?;
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_programs();

        Ok(current)
    }

    /// Apply RSDISPATCH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(config_err)?;

        match config.get_bool("telemetry") {
            Ok(val) => settings.telemetry = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => warn!("ignoring {}_TELEMETRY: {}", ENV_PREFIX, e),
        }

        Ok(settings)
    }
}

/// Persist the telemetry flag into the global config file.
///
/// Other keys in the file are preserved; the file and its directory are
/// created if needed.
pub fn save_telemetry(path: &Path, enabled: bool) -> Result<(), ApplicationError> {
    let mut table: toml::Table = if path.exists() {
        let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
        toml::from_str(&content).map_err(|e| ApplicationError::Config {
            message: format!("parse {}: {}", path.display(), e),
        })?
    } else {
        toml::Table::new()
    };

    table.insert("telemetry".into(), toml::Value::Boolean(enabled));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
    }
    let content = toml::to_string_pretty(&table).map_err(|e| ApplicationError::Config {
        message: format!("serialize {}: {}", path.display(), e),
    })?;
    std::fs::write(path, content).with_path_context("write config", path)?;

    Ok(())
}
