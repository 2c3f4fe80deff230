//! CLI argument definitions using clap
//!
//! Only the global options live here. Subcommands come from the
//! command registry and are attached at dispatch time.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, ValueHint};

/// Command dispatcher with did-you-mean suggestions
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "rsdispatch")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "rsdispatch [OPTIONS] <COMMAND> [ARGS]...")]
pub struct Cli {
    /// Turn on verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse only the options preceding the command name.
    ///
    /// The registry depends on the project directory, so these options are
    /// needed before the full command line can be parsed. Anything unparsable
    /// here falls back to defaults and is reported by the full parse.
    pub fn parse_globals<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cmd = Self::command()
            .allow_external_subcommands(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .ignore_errors(true);

        cmd.try_get_matches_from(argv)
            .ok()
            .and_then(|matches| Self::from_arg_matches(&matches).ok())
            .unwrap_or_default()
    }
}
