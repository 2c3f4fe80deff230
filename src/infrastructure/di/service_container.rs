//! Service container for dependency injection
//!
//! Wires settings, project detection and the command runner into a
//! command registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::commands::{ExternalCommand, InfoCommand, TelemetryCommand, COMPLETION};
use crate::application::{ApplicationError, CommandRegistry, ProjectInfo, RunContext};
use crate::config::{ConfigPaths, Settings};
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding everything a dispatch needs.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Config file locations
    pub paths: ConfigPaths,

    /// Base directory (`-C` or the process working directory)
    pub cwd: PathBuf,

    /// Project rooted at `cwd`, if any
    pub project: Option<ProjectInfo>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Detect the project, load layered settings and use the real command runner.
    pub fn new(paths: ConfigPaths, project_dir: Option<&Path>) -> InfraResult<Self> {
        let (cwd, project) = locate(project_dir)?;

        let settings = Settings::load(
            paths.global_file.as_deref(),
            project.as_ref().map(|p| p.dir.as_path()),
        )?;

        Ok(Self::with_deps(
            settings,
            paths,
            cwd,
            project,
            Arc::new(RealCommandRunner),
        ))
    }

    /// Like [`Self::new`], but with compiled default settings: no config
    /// file is read, so only built-in commands get registered.
    pub fn with_default_settings(
        paths: ConfigPaths,
        project_dir: Option<&Path>,
    ) -> InfraResult<Self> {
        let (cwd, project) = locate(project_dir)?;

        Ok(Self::with_deps(
            Settings::default(),
            paths,
            cwd,
            project,
            Arc::new(RealCommandRunner),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        paths: ConfigPaths,
        cwd: PathBuf,
        project: Option<ProjectInfo>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            paths,
            cwd,
            project,
            cmd,
        }
    }

    /// Configured commands first (in config order), then the built-ins.
    pub fn build_registry(&self) -> InfraResult<CommandRegistry> {
        let mut registry = CommandRegistry::new();

        for spec in &self.settings.commands {
            validate_name(&spec.name)?;
            registry.register(Box::new(ExternalCommand::new(
                spec.clone(),
                self.cmd.clone(),
            )))?;
        }
        registry.register(Box::new(InfoCommand))?;
        registry.register(Box::new(TelemetryCommand))?;

        debug!("registered commands: {:?}", registry.names());
        Ok(registry)
    }

    /// Run context for one invocation of `command`.
    pub fn context(&self, command: &str, verbose: bool, no_color: bool) -> RunContext {
        RunContext {
            command: command.to_string(),
            verbose,
            no_color,
            cwd: self.cwd.clone(),
            project: self.project.clone(),
            settings: self.settings.clone(),
            paths: self.paths.clone(),
        }
    }
}

fn locate(project_dir: Option<&Path>) -> InfraResult<(PathBuf, Option<ProjectInfo>)> {
    let cwd = match project_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };
    let project = ProjectInfo::detect(&cwd);
    debug!("cwd: {}, project: {:?}", cwd.display(), project);
    Ok((cwd, project))
}

fn validate_name(name: &str) -> Result<(), ApplicationError> {
    if name == COMPLETION {
        return Err(ApplicationError::DuplicateCommand(name.to_string()));
    }
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(ApplicationError::Config {
            message: format!("invalid command name: {:?}", name),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandSpec;

    fn container(names: &[&str]) -> ServiceContainer {
        let settings = Settings {
            telemetry: true,
            commands: names
                .iter()
                .map(|n| CommandSpec {
                    name: n.to_string(),
                    program: "true".into(),
                    args: vec![],
                    description: None,
                    local: false,
                })
                .collect(),
        };
        ServiceContainer::with_deps(
            settings,
            ConfigPaths { global_file: None },
            PathBuf::from("/work"),
            None,
            Arc::new(RealCommandRunner),
        )
    }

    #[test]
    fn given_configured_commands_when_build_registry_then_builtins_follow() {
        let registry = container(&["build", "develop"]).build_registry().unwrap();
        assert_eq!(
            registry.names(),
            vec!["build", "develop", "info", "telemetry"]
        );
    }

    #[test]
    fn given_builtin_name_when_build_registry_then_duplicate() {
        let err = container(&["info"]).build_registry().unwrap_err();
        assert!(matches!(
            err,
            InfraError::Application(ApplicationError::DuplicateCommand(_))
        ));

        let err = container(&["completion"]).build_registry().unwrap_err();
        assert!(matches!(
            err,
            InfraError::Application(ApplicationError::DuplicateCommand(_))
        ));
    }

    #[test]
    fn given_invalid_name_when_build_registry_then_config_error() {
        for name in ["", "--build", "two words"] {
            let err = container(&[name]).build_registry().unwrap_err();
            assert!(matches!(
                err,
                InfraError::Application(ApplicationError::Config { .. })
            ));
        }
    }

    #[test]
    fn given_broken_project_config_when_default_settings_then_builtins_only() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join(".rsdispatch.toml"), "commands = [[[").unwrap();
        let paths = ConfigPaths { global_file: None };

        assert!(ServiceContainer::new(paths.clone(), Some(temp.path())).is_err());
        let container = ServiceContainer::with_default_settings(paths, Some(temp.path())).unwrap();

        assert!(container.project.is_some());
        assert_eq!(
            container.build_registry().unwrap().names(),
            vec!["info", "telemetry"]
        );
    }

    #[test]
    fn test_context_carries_flags() {
        let ctx = container(&[]).context("build", true, true);
        assert_eq!(ctx.command, "build");
        assert!(ctx.verbose);
        assert!(ctx.no_color);
        assert_eq!(ctx.cwd, PathBuf::from("/work"));
    }
}
