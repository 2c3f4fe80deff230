//! Domain layer: command-name matching
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod distance;
pub mod suggest;

pub use distance::{osa_distance, str_distance};
pub use suggest::{rank, suggest, MAX_SUGGESTIONS};
