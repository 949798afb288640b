//! # Inkboard Core
//!
//! Raster drawing surface and stroke capture for handwritten input that is
//! sent to a recognition service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               DrawingSession                │
//! │        (one ordered event queue)            │
//! ├──────────────────┬──────────────────────────┤
//! │  StrokeMachine   │  Palette                 │
//! │  - Idle/Drawing  │  - Fixed swatches        │
//! │  - Pen position  │  - Next-stroke color     │
//! ├──────────────────┴──────────────────────────┤
//! │  Surface (RGBA buffer)  ──►  Snapshot (PNG) │
//! │                              ExportPayload  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod context;
pub mod error;
pub mod event;
pub mod export;
pub mod session;
pub mod snapshot;
pub mod stroke;
pub mod surface;

pub use color::{Color, Palette, SWATCHES};
pub use context::VariableContext;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, Point, PointerEvent, PointerPhase};
pub use export::{ExportPayload, RecognitionResult};
pub use session::{DrawingSession, ProcessReport, SessionConfig};
pub use snapshot::{decode_data_url, decode_png, Snapshot};
pub use stroke::{StrokeMachine, StrokeState, StrokeTransition, STROKE_WIDTH};
pub use surface::{Surface, MAX_PIXELS};

/// Inkboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
