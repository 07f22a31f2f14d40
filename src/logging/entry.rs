//! Log entry type
//!
//! One unit of log data submitted to the pipeline.

/// A log event as pushed by a producer.
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry {
    pub message: String,
    /// Skip the display, still written to the channel file
    pub hidden: bool,
    /// Retract the previously displayed line before appending this one
    pub replace_last_line: bool,
    /// Logical channel name (empty = default channel)
    pub channel: String,
}

impl LogEntry {
    /// Create a visible entry for the default channel
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Mark the entry as file-only
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Mark the entry as a progress update replacing the last display line
    pub fn replacing(mut self) -> Self {
        self.replace_last_line = true;
        self
    }

    /// Route the entry to a named channel
    pub fn to_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Whitespace-only messages are dropped by the dispatcher
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }
}
