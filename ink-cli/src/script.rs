//! Scripted input sessions.
//!
//! A script is a JSON array of steps. Each step is either a canvas event
//! (`pointer`, `select_color`, `reset`) or a host control (`submit`, `wait`).
//!
//! ```json
//! [
//!   {"type": "select_color", "color": "#ee3333"},
//!   {"type": "pointer", "phase": "down", "x": 100, "y": 100},
//!   {"type": "pointer", "phase": "move", "x": 200, "y": 100},
//!   {"type": "pointer", "phase": "up", "x": 200, "y": 100},
//!   {"type": "submit"},
//!   {"type": "wait", "ms": 500}
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use ink_core::{CanvasEvent, VariableContext};
use serde::{Deserialize, Serialize};

/// Host-level control steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Capture the canvas and send it to the recognition endpoint.
    Submit,
    /// Pause event delivery, letting outstanding submissions complete.
    Wait {
        /// Milliseconds to wait.
        ms: u64,
    },
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// A host control.
    Control(Control),
    /// An event delivered to the drawing session.
    Canvas(CanvasEvent),
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of valid steps.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<ScriptStep>> {
    serde_json::from_str(text).context("invalid script")
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("in {}", path.display()))
}

/// Read a JSON object of initial variables.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object.
pub fn load_variables(path: &Path) -> anyhow::Result<VariableContext> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read variables {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("variables in {} must be a JSON object", path.display()))
}
