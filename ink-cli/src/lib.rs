//! # Inkboard CLI
//!
//! Command-line host that replays a scripted pointer session onto a drawing
//! surface and submits it to a recognition endpoint.
//!
//! ## Usage
//!
//! ```bash
//! inkboard --script strokes.json --output canvas.png
//! ```
//!
//! ## With a custom endpoint and seeded variables:
//!
//! ```bash
//! INK_ENDPOINT=http://localhost:8900/calculate inkboard --script s.json --vars vars.json
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod replay;
pub mod script;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ink_client::{ClientConfig, DEFAULT_ENDPOINT};
use ink_core::VariableContext;

/// Command-line arguments for inkboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "inkboard")]
#[command(about = "Replay a drawing session and submit it for recognition")]
#[command(version)]
pub struct CliArgs {
    /// JSON script of canvas events and submit steps
    #[arg(long)]
    pub script: PathBuf,

    /// Recognition endpoint URL
    #[arg(long, env = "INK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Surface width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// JSON object seeding the variable context
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// Write the final canvas as PNG
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Recognition client settings.
    pub client: ClientConfig,
    /// Initial variable context.
    pub variables: VariableContext,
    /// Where to write the final PNG.
    pub output: Option<PathBuf>,
}

impl ReplayConfig {
    /// Replay configuration with default surface and client settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
            client: ClientConfig::default(),
            variables: VariableContext::new(),
            output: None,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CliArgs> for ReplayConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            client: ClientConfig::new(args.endpoint.clone())
                .with_timeout(Duration::from_secs(args.timeout_secs)),
            variables: VariableContext::new(),
            output: args.output.clone(),
        }
    }
}
