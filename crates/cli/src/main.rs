//! `songbook-check` -- validate profile and song records stored as JSON.
//!
//! ```text
//! songbook-check <profile|song> [PATH ...] [--format text|json] [--max-bytes N]
//! ```
//!
//! Reports go to stdout, logs to stderr.
//!
//! # Environment variables
//!
//! | Variable                   | Default              | Description                          |
//! |----------------------------|----------------------|--------------------------------------|
//! | `RUST_LOG`                 | `songbook_check=warn` | Log filter                         |
//! | `SONGBOOK_LOG_FORMAT`      | `text`               | `text` or `json` log lines           |
//! | `SONGBOOK_MAX_INPUT_BYTES` | `10485760`           | Size cap for any one input source    |

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songbook_check::check::{self, CheckOptions};
use songbook_check::cli::Cli;
use songbook_check::config::{CheckConfig, LogFormat};
use songbook_check::input::Source;

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CheckConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "songbook_check=warn".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }

    let options = CheckOptions {
        kind: cli.kind,
        format: cli.format,
        max_input_bytes: cli.max_bytes.unwrap_or(config.max_input_bytes),
    };
    tracing::debug!(?options, "Loaded checker configuration");

    let sources = Source::from_args(&cli.paths);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = check::run(&sources, options, &mut out).context("failed to write report")?;
    out.flush().context("failed to flush report")?;

    Ok(ExitCode::from(summary.exit_code()))
}
