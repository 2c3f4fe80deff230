use std::ffi::OsString;
use std::{env, io, process};

use rsdispatch::cli::{execute_command, output, Cli, CliError};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let argv: Vec<OsString> = env::args_os().collect();

    // Only options before the command; the full parse happens in dispatch.
    let globals = Cli::parse_globals(argv.iter().cloned());
    if globals.no_color {
        output::disable_colors();
    }
    setup_logging(globals.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let result = execute_command(&globals, argv, &mut stdout.lock(), &mut stderr.lock());

    if let Err(e) = result {
        // clap errors are already rendered with usage
        if !matches!(e, CliError::Parse(_)) {
            output::error(&e);
        }
        process::exit(e.exit_code());
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    // RUST_LOG refines the level chosen by -v
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Create a noisy module filter
    let noisy_modules = ["config::"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(env_filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    if verbose {
        tracing::debug!("Debug mode: debug");
    }
}
