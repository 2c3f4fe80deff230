//! Argument parsing and command dispatch over the command registry

use std::ffi::OsString;
use std::io::Write;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgMatches, Command, CommandFactory, FromArgMatches};
use clap_complete::Shell;
use tracing::{debug, instrument};

use crate::application::commands::COMPLETION;
use crate::application::{ApplicationError, CommandRegistry};
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::domain::suggest;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Reported when no command is given.
pub const NO_COMMAND_MESSAGE: &str = "Pass --help to see all available commands and options.";

pub struct Dispatcher {
    container: ServiceContainer,
    registry: CommandRegistry,
    /// Config load failure, reported once help and suggestions are shown
    config_error: Option<String>,
}

fn write_err(e: std::io::Error) -> CliError {
    CliError::Infra(InfraError::io("write output", e))
}

fn write_help(cmd: &mut Command, err: &mut dyn Write) -> CliResult<()> {
    writeln!(err, "{}", cmd.render_help()).map_err(write_err)
}

fn completion_command() -> Command {
    Command::new(COMPLETION)
        .about("Generate shell completions")
        .arg(
            Arg::new("shell")
                .required(true)
                .value_parser(value_parser!(Shell))
                .help("Shell type"),
        )
}

impl Dispatcher {
    pub fn new(container: ServiceContainer, registry: CommandRegistry) -> Self {
        Self {
            container,
            registry,
            config_error: None,
        }
    }

    /// Dispatch with a registry built without configuration. Help and
    /// suggestions still work; anything else fails with `message`.
    pub fn with_config_error(mut self, message: String) -> Self {
        self.config_error = Some(message);
        self
    }

    fn config_error(&self) -> Option<CliError> {
        self.config_error.as_ref().map(|message| {
            CliError::from(ApplicationError::Config {
                message: message.clone(),
            })
        })
    }

    /// Full command tree: global options, registered commands, `completion`.
    pub fn command(&self) -> Command {
        Cli::command()
            .disable_help_subcommand(true)
            .subcommands(self.registry.iter().map(|h| h.command()))
            .subcommand(completion_command())
    }

    /// Names offered as suggestions, in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names = self.registry.names();
        names.push(COMPLETION);
        names
    }

    /// Parse `argv` (including the binary name) and run the selected command.
    ///
    /// Command output goes to `out`; help and diagnostics that precede an
    /// error go to `err`. The error itself is returned for the caller to report.
    #[instrument(skip_all)]
    pub fn run<I, T>(&self, argv: I, out: &mut dyn Write, err: &mut dyn Write) -> CliResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = self.command();
        let matches = match cmd.try_get_matches_from_mut(argv) {
            Ok(matches) => matches,
            Err(e) => return self.report_parse_error(&mut cmd, e, out, err),
        };
        let cli = match Cli::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(e) => return self.report_parse_error(&mut cmd, e, out, err),
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            write_help(&mut cmd, err)?;
            let usage = CliError::Usage(NO_COMMAND_MESSAGE.to_string());
            return Err(self.config_error().unwrap_or(usage));
        };
        if let Some(e) = self.config_error() {
            return Err(e);
        }

        if name == COMPLETION {
            return self.completion(sub_matches, out);
        }

        let handler = self
            .registry
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;
        let ctx = self.container.context(name, cli.verbose, cli.no_color);
        debug!("running command: {}", name);
        handler.run(&ctx, sub_matches, out)?;
        Ok(())
    }

    fn report_parse_error(
        &self,
        cmd: &mut Command,
        e: clap::Error,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> CliResult<()> {
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                write!(out, "{}", e.render()).map_err(write_err)?;
                Ok(())
            }
            ErrorKind::InvalidSubcommand => {
                let token = match e.get(ContextKind::InvalidSubcommand) {
                    Some(ContextValue::String(token)) => token.clone(),
                    _ => String::new(),
                };
                let suggestion = suggest(&token, &self.command_names());
                debug!("unrecognized command {:?}, suggestion: {:?}", token, suggestion);

                write_help(cmd, err)?;
                if !suggestion.is_empty() {
                    writeln!(err).map_err(write_err)?;
                    write!(err, "{}", suggestion).map_err(write_err)?;
                }
                Err(self
                    .config_error()
                    .unwrap_or(CliError::UnknownCommand(token)))
            }
            _ => {
                write!(err, "{}", e.render()).map_err(write_err)?;
                Err(CliError::Parse(e))
            }
        }
    }

    fn completion(&self, matches: &ArgMatches, out: &mut dyn Write) -> CliResult<()> {
        let shell = matches
            .get_one::<Shell>("shell")
            .copied()
            .ok_or_else(|| CliError::Usage("missing shell".into()))?;

        let mut cmd = self.command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin_name, out);
        Ok(())
    }
}
