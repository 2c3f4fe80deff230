//! `info`: show dispatcher status and the configured commands

use std::io::Write;

use clap::{ArgMatches, Command};
use tracing::instrument;

use super::{telemetry, COMPLETION};
use crate::application::registry::CommandHandler;
use crate::application::{ApplicationResult, IoResultExt, RunContext};

pub const NAME: &str = "info";

#[derive(Debug, Default)]
pub struct InfoCommand;

impl InfoCommand {
    fn render(ctx: &RunContext, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "rsdispatch {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "Directory: {}", ctx.cwd.display())?;

        match &ctx.project {
            Some(project) => writeln!(out, "Project: {}", project.config_file.display())?,
            None => writeln!(out, "Project: none")?,
        }

        match &ctx.paths.global_file {
            Some(path) if path.exists() => writeln!(out, "Global config: {}", path.display())?,
            Some(path) => writeln!(out, "Global config: {} (not found)", path.display())?,
            None => writeln!(out, "Global config: unavailable")?,
        }

        writeln!(
            out,
            "Telemetry: {}",
            if ctx.settings.telemetry { "enabled" } else { "disabled" }
        )?;

        writeln!(
            out,
            "Built-in commands: {}, {}, {}",
            NAME,
            telemetry::NAME,
            COMPLETION
        )?;

        if ctx.settings.commands.is_empty() {
            writeln!(out, "Commands: none configured")?;
            return Ok(());
        }

        writeln!(out, "Commands:")?;
        let width = ctx
            .settings
            .commands
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for spec in &ctx.settings.commands {
            let scope = if spec.local { "local" } else { "global" };
            writeln!(
                out,
                "  {:<width$}  [{}] {}",
                spec.name,
                scope,
                spec.description.as_deref().unwrap_or(&spec.program),
                width = width
            )?;
        }
        Ok(())
    }
}

impl CommandHandler for InfoCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn command(&self) -> Command {
        Command::new(NAME).about("Show status and configured commands")
    }

    #[instrument(skip_all)]
    fn run(&self, ctx: &RunContext, _: &ArgMatches, out: &mut dyn Write) -> ApplicationResult<()> {
        Self::render(ctx, out).with_context("write output")
    }
}
