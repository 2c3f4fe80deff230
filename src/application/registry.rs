//! Command registry: explicit name → handler mapping
//!
//! Registration order is preserved; it is the order in which command names
//! are offered as "did you mean" candidates.

use std::fmt;
use std::io::Write;

use clap::{ArgMatches, Command};

use crate::application::{ApplicationError, ApplicationResult, RunContext};

/// A subcommand the dispatcher can resolve and invoke.
pub trait CommandHandler: Send + Sync {
    /// Name typed on the command line.
    fn name(&self) -> &str;

    /// Argument definition; the returned command must be named [`Self::name`].
    fn command(&self) -> Command;

    /// Execute with the subcommand's matches. User-facing output goes to `out`.
    fn run(
        &self,
        ctx: &RunContext,
        matches: &ArgMatches,
        out: &mut dyn Write,
    ) -> ApplicationResult<()>;
}

#[derive(Default)]
pub struct CommandRegistry {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler; names must be unique.
    pub fn register(&mut self, handler: Box<dyn CommandHandler>) -> ApplicationResult<()> {
        if self.contains(handler.name()) {
            return Err(ApplicationError::DuplicateCommand(handler.name().to_string()));
        }
        self.handlers.push(handler);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CommandHandler> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(&'static str);

    impl CommandHandler for Noop {
        fn name(&self) -> &str {
            self.0
        }

        fn command(&self) -> Command {
            Command::new(self.0)
        }

        fn run(&self, _: &RunContext, _: &ArgMatches, _: &mut dyn Write) -> ApplicationResult<()> {
            Ok(())
        }
    }

    #[test]
    fn given_handlers_when_registered_then_names_keep_order() {
        let mut registry = CommandRegistry::new();
        for name in ["serve", "build", "develop"] {
            registry.register(Box::new(Noop(name))).unwrap();
        }

        assert_eq!(registry.names(), vec!["serve", "build", "develop"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.get("build").is_some());
        assert!(registry.get("buidl").is_none());
    }

    #[test]
    fn given_duplicate_name_when_registered_then_error() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Noop("build"))).unwrap();

        let err = registry.register(Box::new(Noop("build"))).unwrap_err();

        assert!(matches!(err, ApplicationError::DuplicateCommand(name) if name == "build"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(Noop("build"))).unwrap();

        assert_eq!(
            format!("{:?}", registry),
            r#"CommandRegistry { names: ["build"] }"#
        );
    }
}
