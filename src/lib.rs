//! framelog - ordered multi-sink log delivery for long-running video jobs
//!
//! Background workers push entries through a [`logging::LogHandle`]; a single
//! serialized dispatcher renders them to an optional display surface and
//! appends them to per-channel files.

pub mod config;
pub mod constants;
pub mod error;
pub mod jobs;
pub mod logging;

pub use error::{LogError, Result};
pub use logging::{LogEntry, LogHandle, LogPipeline};
