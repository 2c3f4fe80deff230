//! Commands declared in configuration and run as child processes

use std::io::{ErrorKind, Write};
use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};
use tracing::{debug, instrument};

use crate::application::registry::CommandHandler;
use crate::application::{ApplicationError, ApplicationResult, RunContext};
use crate::config::CommandSpec;
use crate::infrastructure::traits::{CommandRunner, Invocation};

const ARGS: &str = "args";

pub struct ExternalCommand {
    spec: CommandSpec,
    runner: Arc<dyn CommandRunner>,
}

impl ExternalCommand {
    pub fn new(spec: CommandSpec, runner: Arc<dyn CommandRunner>) -> Self {
        Self { spec, runner }
    }

    /// Resolve program, arguments, working directory and child environment.
    pub fn invocation(
        &self,
        ctx: &RunContext,
        matches: &ArgMatches,
    ) -> ApplicationResult<Invocation> {
        let cwd = if self.spec.local {
            ctx.require_project()?.dir.clone()
        } else {
            ctx.cwd.clone()
        };

        let mut args = self.spec.args.clone();
        args.extend(matches.get_many::<String>(ARGS).into_iter().flatten().cloned());

        Ok(Invocation {
            program: self.spec.program.clone(),
            args,
            cwd,
            env: ctx.child_env(),
        })
    }
}

impl CommandHandler for ExternalCommand {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn command(&self) -> Command {
        let about = self
            .spec
            .description
            .clone()
            .unwrap_or_else(|| format!("Run {}", self.spec.program));

        // Everything after the name belongs to the child, including --help.
        Command::new(self.spec.name.clone())
            .about(about)
            .disable_help_flag(true)
            .arg(
                Arg::new(ARGS)
                    .value_name("ARGS")
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true)
                    .help("Arguments passed through to the command"),
            )
    }

    #[instrument(skip_all, fields(command = %self.spec.name))]
    fn run(&self, ctx: &RunContext, matches: &ArgMatches, _: &mut dyn Write) -> ApplicationResult<()> {
        let invocation = self.invocation(ctx, matches)?;
        debug!(
            "running command: {} {:?} in {}",
            invocation.program,
            invocation.args,
            invocation.cwd.display()
        );

        let exit = self
            .runner
            .run(&invocation)
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ApplicationError::ProgramNotFound {
                    command: self.spec.name.clone(),
                    program: invocation.program.clone(),
                },
                _ => ApplicationError::CommandUnavailable {
                    command: self.spec.name.clone(),
                    program: invocation.program.clone(),
                    source,
                },
            })?;

        if exit.success() {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: self.spec.name.clone(),
                code: exit.code,
            })
        }
    }
}
