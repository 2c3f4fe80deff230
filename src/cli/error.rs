//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("unrecognized command '{0}'")]
    UnknownCommand(String),

    /// Already rendered by clap, including usage.
    #[error("{0}")]
    Parse(#[from] clap::Error),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::UnknownCommand(_) | CliError::Parse(_) | CliError::Usage(_) => {
                exitcode::USAGE
            }
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::DuplicateCommand(_) | ApplicationError::Config { .. } => {
                    exitcode::CONFIG
                }
                ApplicationError::NotInProject { .. } => exitcode::NOINPUT,
                ApplicationError::ProgramNotFound { .. }
                | ApplicationError::CommandUnavailable { .. } => exitcode::UNAVAILABLE,
                ApplicationError::CommandFailed { code, .. } => code.unwrap_or(exitcode::SOFTWARE),
                ApplicationError::Io { .. } => exitcode::IOERR,
            },
        }
    }
}
