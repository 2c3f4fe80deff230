//! `telemetry`: persist the anonymous usage collection toggle

use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, instrument};

use crate::application::registry::CommandHandler;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt, RunContext};
use crate::config::save_telemetry;

pub const NAME: &str = "telemetry";

#[derive(Debug, Default)]
pub struct TelemetryCommand;

impl CommandHandler for TelemetryCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn command(&self) -> Command {
        Command::new(NAME)
            .about("Enable or disable anonymous usage collection")
            .arg(
                Arg::new("enable")
                    .long("enable")
                    .action(ArgAction::SetTrue)
                    .help("Enable telemetry (default)"),
            )
            .arg(
                Arg::new("disable")
                    .long("disable")
                    .action(ArgAction::SetTrue)
                    .help("Disable telemetry"),
            )
    }

    #[instrument(skip_all)]
    fn run(
        &self,
        ctx: &RunContext,
        matches: &ArgMatches,
        out: &mut dyn Write,
    ) -> ApplicationResult<()> {
        // --enable wins over --disable
        let enabled = matches.get_flag("enable") || !matches.get_flag("disable");

        let path = ctx
            .paths
            .global_file
            .as_deref()
            .ok_or_else(|| ApplicationError::Config {
                message: "cannot determine global config directory".into(),
            })?;
        debug!("writing telemetry={} to {}", enabled, path.display());
        save_telemetry(path, enabled)?;

        writeln!(
            out,
            "Telemetry collection {}",
            if enabled { "enabled" } else { "disabled" }
        )
        .with_context("write output")?;
        Ok(())
    }
}
