//! rsdispatch: a command dispatcher with did-you-mean suggestions
//!
//! Commands are resolved through an explicit registry of handlers built
//! from configuration. Mistyped command names get suggestions from the
//! pure [`domain::suggest`] engine.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
