//! Built-in and configured command handlers

mod external;
mod info;
mod telemetry;

pub use external::ExternalCommand;
pub use info::InfoCommand;
pub use telemetry::TelemetryCommand;

/// Reserved for shell completion generation, handled by the dispatcher itself.
pub const COMPLETION: &str = "completion";
