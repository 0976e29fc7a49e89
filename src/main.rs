use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use ticklist::cli::commands::Cli;
use ticklist::cli::handlers::{self, Context};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file written next to todos.json while the TUI owns the terminal
const LOG_FILE: &str = "ticklist.log";

/// Tracing is opt-in via RUST_LOG; invalid filters turn it off
fn env_filter() -> Option<EnvFilter> {
    let raw = std::env::var("RUST_LOG").ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    EnvFilter::try_new(raw).ok()
}

fn init_cli_logging() {
    let Some(filter) = env_filter() else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn init_tui_logging(ctx: &Context) {
    let Some(filter) = env_filter() else {
        return;
    };
    let Ok(file) = File::create(ctx.dir.join(LOG_FILE)) else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
}

fn run_tui(dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::open(dir)?;
    init_tui_logging(&ctx);
    tracing::info!(dir = %ctx.dir.display(), "starting tui");
    ticklist::tui::run(ctx.store, &ctx.config)
}

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI
        if let Err(e) = run_tui(cli.dir.as_deref()) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    init_cli_logging();
    if let Err(e) = handlers::dispatch(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
