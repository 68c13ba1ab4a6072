//! CLI binary for `taskboard`.
//!
//! This binary is a thin wrapper that parses arguments, sets up logging, and
//! delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use taskboard::cli::{run, Cli, CliContext};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = match CliContext::from_cli(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let output = run(cli.command, &ctx).await;

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskboard={default_level}")));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
