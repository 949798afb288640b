//! # Inkboard
//!
//! Replays a drawing script and prints recognition results.

use clap::Parser;
use ink_cli::replay::{self, SubmissionOutcome};
use ink_cli::{script, CliArgs, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,ink_core=debug,ink_client=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ink_core=debug,ink_client=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let mut config = ReplayConfig::from(&args);
    if let Some(path) = &args.vars {
        config.variables = script::load_variables(path)?;
    }
    let steps = script::load_script(&args.script)?;

    tracing::info!(
        "Surface {}x{}, endpoint {}",
        config.width,
        config.height,
        config.client.endpoint
    );

    let summary = replay::run(&config, steps).await?;
    tracing::info!(
        "Processed {} events ({} segments, {} resets, {} skipped)",
        summary.events.processed,
        summary.events.segments,
        summary.events.resets,
        summary.events.failed
    );

    for (i, outcome) in summary.submissions.iter().enumerate() {
        match outcome {
            SubmissionOutcome::Completed(results) if results.is_empty() => {
                println!("[{}] no results", i + 1);
            }
            SubmissionOutcome::Completed(results) => {
                for result in results {
                    println!("[{}] {result}", i + 1);
                }
            }
            SubmissionOutcome::Failed(e) => println!("[{}] failed: {e}", i + 1),
            SubmissionOutcome::Rejected(e) => println!("[{}] skipped: {e}", i + 1),
        }
    }

    if !summary.variables.is_empty() {
        println!("{}", serde_json::to_string_pretty(&summary.variables)?);
    }

    Ok(())
}
