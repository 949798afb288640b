//! # Inkboard Client
//!
//! Submit pipeline for sending canvas snapshots to a recognition endpoint.
//!
//! ```text
//! DrawingSession ──capture──► ExportPayload ──POST──► endpoint
//!                                                       │
//!        VariableContext ◄──apply assignments── results ┘
//! ```
//!
//! The snapshot is captured synchronously on the caller's event loop; only
//! the HTTP exchange is asynchronous.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod response;

pub use client::{RecognitionClient, REQUEST_ID_HEADER};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::{SubmitError, SubmitResult};
pub use response::parse_results;
