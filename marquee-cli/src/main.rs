//! Marquee CLI - Command-line interface
//!
//! Searches the movie catalog from the terminal.

mod commands;
mod display;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Find movies you'll enjoy without the hassle")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Use the built-in demo catalog instead of the remote API
    #[arg(long, global = true)]
    demo: bool,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Directory for the full debug log of this run
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    /// Quiet period in milliseconds before a typed query is fetched
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref()) {
        eprintln!("Warning: {}", e.user_message());
    }

    let options = commands::GlobalOptions {
        demo: cli.demo,
        debounce_ms: cli.debounce_ms,
    };

    match commands::handle_command(cli.command, options).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
