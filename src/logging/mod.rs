//! Log delivery pipeline
//!
//! Centralizes all log-related types and utilities:
//! - `LogEntry` - One unit of log data pushed by a producer
//! - `DeliveryQueue` - Unbounded multi-producer FIFO
//! - `Dispatcher` - Serialized consumer applying entries to the sinks
//! - `DisplaySink` / `TextBuffer` - Display surface contract and in-memory surface
//! - `FileSink` - Append-only channel files
//! - `StateTracker` - Last visible / last logged line
//! - `LogPipeline` / `LogHandle` - Owner and producer handle

pub mod channel;
pub mod dispatcher;
pub mod display;
pub mod entry;
pub mod file;
pub mod pipeline;
pub mod queue;
pub mod state;

pub use dispatcher::{Delivery, Dispatcher};
pub use display::{DisplaySink, RepaintGuard, TextBuffer};
pub use entry::LogEntry;
pub use file::{FileSink, LineMode};
pub use pipeline::{LogHandle, LogPipeline};
pub use queue::DeliveryQueue;
pub use state::StateTracker;

/// Initialize internal tracing for pipeline diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
