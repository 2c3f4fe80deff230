//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: command resolution, invocation and configuration.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("command registered twice: {0}")]
    DuplicateCommand(String),

    #[error(
        "rsdispatch <{command}> can only be run inside a project.\n\
         The directory {} does not contain a .rsdispatch.toml",
        .dir.display()
    )]
    NotInProject { command: String, dir: PathBuf },

    #[error("command <{command}>: program not found: {program}")]
    ProgramNotFound { command: String, program: String },

    #[error("command <{command}> could not be started: {program}")]
    CommandUnavailable {
        command: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command <{command}> failed{}", exit_suffix(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => " (terminated by signal)".to_string(),
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
