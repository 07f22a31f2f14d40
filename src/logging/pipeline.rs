//! Pipeline owner and producer handle
//!
//! `LogPipeline` is constructed once at startup and owns the consumer thread.
//! Producers receive cloneable `LogHandle`s instead of reaching for globals.
//!
//! Delivery modes:
//! - `Dedicated`: a named consumer thread blocks on the queue and drains
//!   continuously; `log` only enqueues.
//! - `Inline`: each `log` makes one drain attempt on the caller's thread.
//!
//! In both modes `flush` processes everything queued before the call.

use super::dispatcher::{Delivery, Dispatcher, DisplaySlot};
use super::display::{self, DisplaySink};
use super::file::{FileSink, LineMode};
use super::{DeliveryQueue, LogEntry, StateTracker};
use crate::config::{DeliveryMode, LogsConfig};
use crate::constants::DISPATCHER_THREAD_NAME;
use crate::error::{LogError, Result};
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

struct Shared {
    queue: DeliveryQueue,
    dispatcher: Mutex<Dispatcher>,
    state: Arc<StateTracker>,
    display: Arc<DisplaySlot>,
    mode: DeliveryMode,
}

/// Cloneable producer handle
#[derive(Clone)]
pub struct LogHandle {
    shared: Arc<Shared>,
}

/// Owner of the pipeline; closes and drains the queue on drop
pub struct LogPipeline {
    handle: LogHandle,
    consumer: Option<JoinHandle<()>>,
}

impl LogPipeline {
    /// Build the pipeline and, in dedicated mode, spawn the consumer thread
    pub fn start(cfg: &LogsConfig) -> Result<Self> {
        let state = Arc::new(StateTracker::new());
        let display: Arc<DisplaySlot> = Arc::new(Mutex::new(None));
        let dispatcher = Dispatcher::new(
            FileSink::new(&cfg.dir, &cfg.default_channel),
            state.clone(),
            display.clone(),
            cfg.console_mirror,
        );

        let shared = Arc::new(Shared {
            queue: DeliveryQueue::new(),
            dispatcher: Mutex::new(dispatcher),
            state,
            display,
            mode: cfg.delivery,
        });

        let consumer = match cfg.delivery {
            DeliveryMode::Dedicated => {
                let shared = shared.clone();
                let handle = thread::Builder::new()
                    .name(DISPATCHER_THREAD_NAME.to_string())
                    .spawn(move || run_consumer(shared))
                    .map_err(|e| LogError::Runtime { source: e })?;
                Some(handle)
            }
            DeliveryMode::Inline => None,
        };

        debug!(
            "Log pipeline started ({} delivery, dir {})",
            cfg.delivery,
            cfg.dir.display()
        );

        Ok(Self {
            handle: LogHandle { shared },
            consumer,
        })
    }

    /// New producer handle
    pub fn handle(&self) -> LogHandle {
        self.handle.clone()
    }

    /// Close the queue, drain what remains and join the consumer
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.handle.shared.queue.close();
        if let Some(consumer) = self.consumer.take() {
            if consumer.join().is_err() {
                warn!("Log dispatcher thread panicked");
            }
        }
        self.handle.flush();
    }
}

impl Deref for LogPipeline {
    type Target = LogHandle;

    fn deref(&self) -> &LogHandle {
        &self.handle
    }
}

impl Drop for LogPipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_consumer(shared: Arc<Shared>) {
    while shared.queue.wait_for_entry() {
        shared.dispatcher.lock().drain_one(&shared.queue);
    }
    debug!("Log dispatcher stopped");
}

impl LogHandle {
    // === Push ===

    /// Queue a visible message for the default channel
    pub fn log(&self, message: impl Into<String>) {
        self.log_entry(LogEntry::new(message));
    }

    /// Queue a message with every option spelled out
    pub fn log_with(
        &self,
        message: impl Into<String>,
        hidden: bool,
        replace_last_line: bool,
        channel: impl Into<String>,
    ) {
        self.log_entry(LogEntry {
            message: message.into(),
            hidden,
            replace_last_line,
            channel: channel.into(),
        });
    }

    /// Queue an entry. Never blocks on the sinks in dedicated mode, never fails.
    pub fn log_entry(&self, entry: LogEntry) {
        let shared = &self.shared;
        shared.queue.enqueue(entry);
        if shared.mode == DeliveryMode::Inline || shared.queue.is_closed() {
            self.drain_one();
        }
    }

    /// Log the entry unless the last display line already contains it.
    ///
    /// Without a display, compares against the last visible message instead.
    /// Everything queued earlier is processed first and the check and the
    /// write happen under the dispatcher lock, so the comparison always sees
    /// the latest line in either delivery mode.
    pub fn log_if_last_line_differs(&self, entry: LogEntry) {
        let shared = &self.shared;
        let mut dispatcher = shared.dispatcher.lock();
        dispatcher.drain_all(&shared.queue);

        let last = match shared.display.lock().as_deref() {
            Some(sink) => display::last_line(&sink.full_text()),
            None => shared.state.last_ui_line(),
        };
        if !last.contains(entry.message.as_str()) {
            dispatcher.process(entry);
        }
    }

    // === Draining ===

    /// Pop and process at most one entry
    pub fn drain_one(&self) -> Option<Delivery> {
        self.shared.dispatcher.lock().drain_one(&self.shared.queue)
    }

    /// Process every entry queued so far; returns how many were popped
    pub fn flush(&self) -> usize {
        self.shared.dispatcher.lock().drain_all(&self.shared.queue)
    }

    /// Entries waiting to be processed
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn mode(&self) -> DeliveryMode {
        self.shared.mode
    }

    // === State ===

    /// Last message shown on the display
    pub fn last_ui_line(&self) -> String {
        self.shared.state.last_ui_line()
    }

    /// Last message processed, hidden or not
    pub fn last_log_line(&self) -> String {
        self.shared.state.last_log_line()
    }

    // === Display ===

    /// Attach a display surface, returning the previous one
    pub fn attach_display(&self, sink: Box<dyn DisplaySink>) -> Option<Box<dyn DisplaySink>> {
        self.shared.display.lock().replace(sink)
    }

    pub fn detach_display(&self) -> Option<Box<dyn DisplaySink>> {
        self.shared.display.lock().take()
    }

    /// Last line currently on the display (empty without one)
    pub fn last_line(&self) -> String {
        self.shared
            .display
            .lock()
            .as_deref()
            .map(|sink| display::last_line(&sink.full_text()))
            .unwrap_or_default()
    }

    /// Remove the last display line; files are untouched
    pub fn remove_last_line(&self) -> Result<()> {
        let mut slot = self.shared.display.lock();
        let sink = slot.as_deref_mut().ok_or(LogError::DisplayUnavailable)?;
        super::dispatcher::retract_last_line(sink)
    }

    /// Empty the display; files are untouched
    pub fn clear_display(&self) -> Result<()> {
        let mut slot = self.shared.display.lock();
        let sink = slot.as_deref_mut().ok_or(LogError::DisplayUnavailable)?;
        sink.set_full_text("")
    }

    // === Direct file access ===

    /// Write a timestamped block straight to a channel file.
    ///
    /// Bypasses the queue and the sequence counter; `append = false`
    /// overwrites the file.
    pub fn write_to_file(&self, content: &str, append: bool, channel: &str) -> Result<()> {
        self.shared
            .dispatcher
            .lock()
            .file_mut()
            .write_block(content, append, channel)
    }

    /// Append one stamped (or continued) line straight to a channel file,
    /// skipping the display and the last-line state. Returns the sequence id.
    pub fn log_to_file(&self, text: &str, mode: LineMode, channel: &str) -> Result<u64> {
        let (id, result) = self
            .shared
            .dispatcher
            .lock()
            .file_mut()
            .append(channel, text, mode);
        result.map(|()| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TextBuffer;
    use std::fs;
    use std::path::PathBuf;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("framelog-pipeline-{}-{}-{}", tag, pid, ts))
    }

    fn config(dir: &PathBuf, delivery: DeliveryMode) -> LogsConfig {
        LogsConfig {
            dir: dir.clone(),
            delivery,
            console_mirror: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_inline_processes_on_push() {
        let dir = unique_temp_dir("inline");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Inline)).unwrap();
        let display = TextBuffer::new();
        pipeline.attach_display(Box::new(display.clone()));

        pipeline.log("Loading RIFE model");
        assert_eq!(pipeline.pending(), 0);
        assert_eq!(display.text(), "Loading RIFE model");
        assert_eq!(pipeline.last_ui_line(), "Loading RIFE model");

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_dedicated_flush_is_barrier() {
        let dir = unique_temp_dir("dedicated");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Dedicated)).unwrap();
        let display = TextBuffer::new();
        pipeline.attach_display(Box::new(display.clone()));

        for i in 1..=20 {
            pipeline.log(format!("frame {}", i));
        }
        pipeline.flush();

        assert_eq!(pipeline.pending(), 0);
        assert_eq!(display.line_count(), 20);
        assert_eq!(pipeline.last_line(), "frame 20");

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_shutdown_drains_remaining() {
        let dir = unique_temp_dir("shutdown");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Dedicated)).unwrap();
        let handle = pipeline.handle();

        for i in 0..50 {
            handle.log(format!("entry {}", i));
        }
        pipeline.shutdown();

        let content = fs::read_to_string(dir.join("sessionlog.txt")).unwrap();
        assert_eq!(content.lines().filter(|l| !l.is_empty()).count(), 50);

        // Pushes after shutdown are processed inline
        handle.log("late");
        assert_eq!(handle.pending(), 0);
        assert_eq!(handle.last_log_line(), "late");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_display_queries() {
        let dir = unique_temp_dir("queries");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Inline)).unwrap();

        assert_eq!(pipeline.last_line(), "");
        assert!(matches!(
            pipeline.clear_display(),
            Err(LogError::DisplayUnavailable)
        ));

        let display = TextBuffer::new();
        pipeline.attach_display(Box::new(display.clone()));
        pipeline.log("one");
        pipeline.log("two");
        assert_eq!(pipeline.last_line(), "two");

        pipeline.remove_last_line().unwrap();
        assert_eq!(display.text(), "one");

        pipeline.clear_display().unwrap();
        assert_eq!(display.text(), "");

        // Files are untouched by display resets
        let content = fs::read_to_string(dir.join("sessionlog.txt")).unwrap();
        assert_eq!(content.lines().filter(|l| !l.is_empty()).count(), 2);

        assert!(pipeline.detach_display().is_some());
        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_if_last_line_differs() {
        let dir = unique_temp_dir("dedup");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Inline)).unwrap();
        let display = TextBuffer::new();
        pipeline.attach_display(Box::new(display.clone()));

        pipeline.log_if_last_line_differs(LogEntry::new("Waiting for GPU"));
        pipeline.log_if_last_line_differs(LogEntry::new("Waiting for GPU"));
        pipeline.log_if_last_line_differs(LogEntry::new("GPU ready"));

        assert_eq!(display.line_count(), 2);

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_if_last_line_differs_dedicated() {
        for run in 0..50 {
            let dir = unique_temp_dir(&format!("dedup-dedicated-{}", run));
            let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Dedicated)).unwrap();
            let display = TextBuffer::new();
            pipeline.attach_display(Box::new(display.clone()));

            pipeline.log_if_last_line_differs(LogEntry::new("Waiting for GPU"));
            pipeline.log_if_last_line_differs(LogEntry::new("Waiting for GPU"));
            pipeline.flush();

            assert_eq!(display.line_count(), 1, "duplicate line on run {}", run);

            drop(pipeline);
            let _ = fs::remove_dir_all(&dir);
        }
    }

    #[test]
    fn test_log_if_last_line_differs_sees_queued_entries() {
        let dir = unique_temp_dir("dedup-queued");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Dedicated)).unwrap();
        let display = TextBuffer::new();
        pipeline.attach_display(Box::new(display.clone()));

        pipeline.log("Extracting frames");
        pipeline.log("Waiting for GPU");
        pipeline.log_if_last_line_differs(LogEntry::new("Waiting for GPU"));
        pipeline.flush();

        assert_eq!(display.line_count(), 2);
        assert_eq!(pipeline.last_line(), "Waiting for GPU");

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_log_if_last_line_differs_without_display() {
        let dir = unique_temp_dir("dedup-headless");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Inline)).unwrap();

        pipeline.log_if_last_line_differs(LogEntry::new("Idle"));
        pipeline.log_if_last_line_differs(LogEntry::new("Idle"));

        let content = fs::read_to_string(dir.join("sessionlog.txt")).unwrap();
        assert_eq!(content.lines().filter(|l| !l.is_empty()).count(), 1);

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_direct_writes_share_sequence() {
        let dir = unique_temp_dir("direct");
        let pipeline = LogPipeline::start(&config(&dir, DeliveryMode::Inline)).unwrap();

        pipeline.log("queued");
        let id = pipeline
            .log_to_file("direct", LineMode::NewLine, "")
            .unwrap();
        assert_eq!(id, 1);

        pipeline.write_to_file("[logs]\ndir = \"logs\"", false, "config").unwrap();
        let dump = fs::read_to_string(dir.join("config.txt")).unwrap();
        assert!(dump.contains("dir = \"logs\""));

        // Direct writes leave the last-line state alone
        assert_eq!(pipeline.last_log_line(), "queued");

        drop(pipeline);
        let _ = fs::remove_dir_all(&dir);
    }
}
