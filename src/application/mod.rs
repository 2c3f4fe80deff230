//! Application layer: command registry, handlers and run context
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod commands;
pub mod context;
pub mod error;
pub mod error_ext;
pub mod registry;

pub use context::{ProjectInfo, RunContext};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use registry::{CommandHandler, CommandRegistry};
