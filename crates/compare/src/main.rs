// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mockprobe-compare CLI entry point.

use clap::{Parser, Subcommand};
use mockprobe_capture::{cleanup_old_captures, default_capture_dir, CaptureFile};
use mockprobe_compare::baseline::{baseline_to_json, load_baseline, merge_baseline};
use mockprobe_compare::{analyze, compare, render_comparison, render_report};
use mockprobe_compare::{synthesize_baseline, BaselineStrategy};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Analyze captured service traffic and check mocks against it
#[derive(Parser, Debug)]
#[command(name = "mockprobe-compare", version)]
#[command(about = "Analyze captures, compare mocks and synthesize baselines")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize recent capture files
    Analyze {
        /// Capture directory
        #[arg(long, env = "MOCKPROBE_CAPTURE_DIR")]
        dir: Option<PathBuf>,

        /// Only include files from the last N days
        #[arg(long, default_value_t = 7)]
        days: u64,

        /// Emit JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Diff a capture file against a mock baseline
    Compare {
        /// Capture file to check
        capture: PathBuf,

        /// Baseline JSON mapping `service.operation` to response
        baseline: PathBuf,

        /// Emit JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a baseline from a capture file
    Baseline {
        /// Capture file to read
        capture: PathBuf,

        /// Which response represents an operation
        #[arg(long, value_enum, default_value = "first-wins")]
        strategy: BaselineStrategy,

        /// Merge into this existing baseline file and rewrite it
        #[arg(long, conflicts_with = "output")]
        update: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete capture files older than the retention window
    Cleanup {
        /// Capture directory
        #[arg(long, env = "MOCKPROBE_CAPTURE_DIR")]
        dir: Option<PathBuf>,

        /// Retention window in days
        #[arg(long, default_value_t = 7)]
        days: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            dir,
            days,
            json,
            output,
        } => {
            let dir = dir.unwrap_or_else(default_capture_dir);
            let analysis = analyze(&dir, days);
            let text = if json {
                serde_json::to_string_pretty(&analysis)?
            } else {
                render_report(&analysis)
            };
            emit(&text, output.as_deref()).await?;
        }
        Command::Compare {
            capture,
            baseline,
            json,
            output,
        } => {
            let capture = CaptureFile::load(&capture)?;
            let baseline = load_baseline(&baseline)?;
            let result = compare(&capture, &baseline);
            let text = if json {
                serde_json::to_string_pretty(&result)?
            } else {
                render_comparison(&result)
            };
            emit(&text, output.as_deref()).await?;
        }
        Command::Baseline {
            capture,
            strategy,
            update,
            output,
        } => {
            let capture = CaptureFile::load(&capture)?;
            let (synthesized, count) = synthesize_baseline(&capture, strategy);
            tracing::info!(count, "baseline synthesized");
            match update {
                Some(path) => {
                    let mut existing = if path.exists() {
                        load_baseline(&path)?
                    } else {
                        Default::default()
                    };
                    let stats = merge_baseline(&mut existing, synthesized);
                    tokio::fs::write(&path, baseline_to_json(&existing)).await?;
                    eprintln!(
                        "{}: {} added, {} updated",
                        path.display(),
                        stats.added,
                        stats.updated
                    );
                }
                None => emit(&baseline_to_json(&synthesized), output.as_deref()).await?,
            }
        }
        Command::Cleanup { dir, days } => {
            let dir = dir.unwrap_or_else(default_capture_dir);
            let removed = cleanup_old_captures(&dir, days)?;
            println!("removed {} capture file(s) from {}", removed, dir.display());
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn emit(text: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, text).await,
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
