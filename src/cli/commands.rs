//! Bootstrap: settings and registry for the selected project, then dispatch

use std::ffi::OsString;
use std::io::Write;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::Cli;
use crate::cli::dispatch::Dispatcher;
use crate::cli::error::CliResult;
use crate::config::ConfigPaths;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Build the dispatcher for `globals.project_dir` and run `argv` through it.
///
/// Unreadable configuration does not block help or suggestions: the
/// dispatcher falls back to the built-in commands and reports the config
/// error afterwards.
#[instrument(skip_all, fields(project_dir = ?globals.project_dir))]
pub fn execute_command<I, T>(
    globals: &Cli,
    argv: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let paths = ConfigPaths::resolve();
    let project_dir = globals.project_dir.as_deref();

    let (container, config_error) = match ServiceContainer::new(paths.clone(), project_dir) {
        Ok(container) => (container, None),
        Err(InfraError::Application(e @ ApplicationError::DuplicateCommand(_))) => {
            (ServiceContainer::with_default_settings(paths, project_dir)?, Some(e.to_string()))
        }
        Err(InfraError::Application(ApplicationError::Config { message })) => {
            (ServiceContainer::with_default_settings(paths, project_dir)?, Some(message))
        }
        Err(e) => return Err(e.into()),
    };
    let registry = container.build_registry()?;
    let mut dispatcher = Dispatcher::new(container, registry);
    if let Some(message) = config_error {
        debug!("configuration not loaded, built-in commands only: {}", message);
        dispatcher = dispatcher.with_config_error(message);
    }
    dispatcher.run(argv, out, err)
}
