//! Dispatcher
//!
//! Applies one entry at a time to the display and file sinks. Callers hold the
//! dispatcher lock for the whole pop-and-process step, which serializes sink
//! writes and keeps enqueue order even when several threads drain.
//!
//! Sink failures never reach producers. They are reported once through
//! `tracing` and returned in the [`Delivery`] report.

use super::display::{self, DisplaySink};
use super::file::{FileSink, LineMode};
use super::{DeliveryQueue, LogEntry, StateTracker};
use crate::constants::{LINE_ENDING, REPLACE_MARKER, UI_MARKER};
use crate::error::{LogError, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracing::warn;

/// Slot holding the attached display surface, if any
pub type DisplaySlot = Mutex<Option<Box<dyn DisplaySink>>>;

/// Outcome of processing one entry
#[derive(Debug)]
pub struct Delivery {
    /// Sequence id consumed by the file write
    pub id: u64,
    /// Text was appended to the display
    pub displayed: bool,
    /// Swallowed display failure
    pub display_error: Option<LogError>,
    /// Swallowed file failure
    pub file_error: Option<LogError>,
}

pub struct Dispatcher {
    file: FileSink,
    state: Arc<StateTracker>,
    display: Arc<DisplaySlot>,
    console_mirror: bool,
}

impl Dispatcher {
    pub fn new(
        file: FileSink,
        state: Arc<StateTracker>,
        display: Arc<DisplaySlot>,
        console_mirror: bool,
    ) -> Self {
        Self {
            file,
            state,
            display,
            console_mirror,
        }
    }

    /// Pop and process at most one entry.
    ///
    /// Returns `None` when the queue was empty or the entry was blank.
    pub fn drain_one(&mut self, queue: &DeliveryQueue) -> Option<Delivery> {
        let entry = queue.try_pop()?;
        self.process(entry)
    }

    /// Process every queued entry; returns how many were popped
    pub fn drain_all(&mut self, queue: &DeliveryQueue) -> usize {
        let mut count = 0;
        while let Some(entry) = queue.try_pop() {
            self.process(entry);
            count += 1;
        }
        count
    }

    /// Apply one entry to both sinks
    pub fn process(&mut self, entry: LogEntry) -> Option<Delivery> {
        if entry.is_blank() {
            return None;
        }

        let LogEntry {
            message,
            hidden,
            replace_last_line,
            channel,
        } = entry;

        self.state.record(&message, hidden);

        if self.console_mirror {
            let _ = writeln!(std::io::stderr().lock(), "{}", message);
        }

        let mut text = display::normalize_line_breaks(&message);

        let (displayed, display_error) = if hidden {
            (false, None)
        } else {
            self.render(&text, replace_last_line)
        };
        if let Some(e) = &display_error {
            warn!("Display update failed: {}", e);
        }

        if replace_last_line {
            text = format!("{} {}", REPLACE_MARKER, text);
        }
        if !hidden {
            text = format!("{} {}", UI_MARKER, text);
        }

        let (id, result) = self.file.append(&channel, &text, LineMode::NewLine);
        let file_error = result.err();
        if let Some(e) = &file_error {
            warn!("Log write #{} dropped: {}", id, e);
        }

        Some(Delivery {
            id,
            displayed,
            display_error,
            file_error,
        })
    }

    /// File sink, for direct writes that bypass the queue
    pub fn file_mut(&mut self) -> &mut FileSink {
        &mut self.file
    }

    fn render(&self, text: &str, replace_last_line: bool) -> (bool, Option<LogError>) {
        let mut slot = self.display.lock();
        let Some(sink) = slot.as_deref_mut() else {
            return (false, None);
        };

        if replace_last_line {
            let mut guard = display::suspend(sink);
            let retracted = retract_last_line(&mut *guard);
            let appended = append_line(&mut *guard, text);
            (appended.is_ok(), appended.err().or(retracted.err()))
        } else {
            let appended = append_line(sink, text);
            (appended.is_ok(), appended.err())
        }
    }
}

/// Drop the last display line
pub fn retract_last_line(sink: &mut dyn DisplaySink) -> Result<()> {
    let text = sink.full_text();
    sink.set_full_text(&display::without_last_line(&text))
}

/// Append a line, separated only when the surface already has content
fn append_line(sink: &mut dyn DisplaySink, text: &str) -> Result<()> {
    if sink.full_text().is_empty() {
        sink.append_text(text)
    } else {
        sink.append_text(&format!("{}{}", LINE_ENDING, text))
    }
}
