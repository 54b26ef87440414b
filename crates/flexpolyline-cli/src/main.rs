//! Command-line tool for flexible polylines.
//!
//! Decodes polylines to JSON, encodes JSON point lists, and prints headers.
//! Logs go to stderr and are filtered with `RUST_LOG`.

mod cli;
mod commands;
mod error;

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;
use cli::{CliArgs, Command};
use error::{Error, Result};

fn main() -> ExitCode {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Decode { encoded } => commands::decode(&encoded, args.pretty, &mut stdout),
        Command::Encode {
            precision,
            third_dimension,
            third_dimension_precision,
            input,
        } => match input {
            Some(path) => {
                let file = File::open(&path).map_err(|source| Error::Io {
                    context: "open input file",
                    source,
                })?;
                tracing::debug!(path = %path.display(), "reading points");
                commands::encode(
                    &mut BufReader::new(file),
                    precision,
                    third_dimension,
                    third_dimension_precision,
                    &mut stdout,
                )
            }
            None => commands::encode(
                &mut io::stdin().lock(),
                precision,
                third_dimension,
                third_dimension_precision,
                &mut stdout,
            ),
        },
        Command::Header { encoded } => commands::header(&encoded, args.pretty, &mut stdout),
    }
}
