//! Display surface contract
//!
//! The pipeline never talks to a UI toolkit. It drives anything implementing
//! [`DisplaySink`]: a narrow text-surface capability with a scoped repaint
//! suspension for flicker-free multi-step edits.

use crate::constants::LINE_ENDING;
use crate::error::Result;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Text surface the dispatcher renders visible entries to
pub trait DisplaySink: Send {
    /// Full text currently held by the surface
    fn full_text(&self) -> String;

    /// Append text at the end
    fn append_text(&mut self, text: &str) -> Result<()>;

    /// Replace the whole text
    fn set_full_text(&mut self, text: &str) -> Result<()>;

    /// Stop repainting until `resume_repaint`
    fn suspend_repaint(&mut self);

    /// Resume repainting
    fn resume_repaint(&mut self);
}

/// Scoped repaint suspension; repaint resumes when the guard drops.
pub struct RepaintGuard<'a> {
    sink: &'a mut dyn DisplaySink,
}

/// Suspend repaint on `sink` for the lifetime of the returned guard
pub fn suspend(sink: &mut dyn DisplaySink) -> RepaintGuard<'_> {
    sink.suspend_repaint();
    RepaintGuard { sink }
}

impl<'a> Deref for RepaintGuard<'a> {
    type Target = dyn DisplaySink + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.sink
    }
}

impl<'a> DerefMut for RepaintGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.sink
    }
}

impl Drop for RepaintGuard<'_> {
    fn drop(&mut self) {
        self.sink.resume_repaint();
    }
}

/// Split surface text into lines, accepting both `\n` and `\r\n`
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// Text with its final line dropped, rejoined with the host line ending
pub fn without_last_line(text: &str) -> String {
    let lines = split_lines(text);
    let keep = lines.len().saturating_sub(1);
    lines[..keep].join(LINE_ENDING)
}

/// Last line of the surface text (empty if none)
pub fn last_line(text: &str) -> String {
    split_lines(text)
        .last()
        .map(|l| l.to_string())
        .unwrap_or_default()
}

/// Convert any line breaks to the host line ending
pub fn normalize_line_breaks(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    if LINE_ENDING == "\n" {
        unified
    } else {
        unified.replace('\n', LINE_ENDING)
    }
}

// =============================================================================
// In-memory surface
// =============================================================================

#[derive(Debug, Default)]
struct TextState {
    /// Working text, mutated by the pipeline
    text: String,
    /// Snapshot a renderer may show; frozen while repaint is suspended
    visible: String,
    suspended: usize,
    repaints: u64,
}

impl TextState {
    fn repaint(&mut self) {
        if self.suspended == 0 {
            self.visible.clone_from(&self.text);
            self.repaints += 1;
        }
    }
}

/// Shared in-memory text surface.
///
/// Clones share the same buffer, so one clone can be attached to the pipeline
/// while another is read by a renderer or a test.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    inner: Arc<Mutex<TextState>>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current working text
    pub fn text(&self) -> String {
        self.inner.lock().text.clone()
    }

    /// Text as last repainted
    pub fn visible(&self) -> String {
        self.inner.lock().visible.clone()
    }

    /// Number of lines in the working text
    pub fn line_count(&self) -> usize {
        split_lines(&self.inner.lock().text).len()
    }

    pub fn is_suspended(&self) -> bool {
        self.inner.lock().suspended > 0
    }

    /// Number of repaints performed so far
    pub fn repaints(&self) -> u64 {
        self.inner.lock().repaints
    }
}

impl DisplaySink for TextBuffer {
    fn full_text(&self) -> String {
        self.text()
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        let mut state = self.inner.lock();
        state.text.push_str(text);
        state.repaint();
        Ok(())
    }

    fn set_full_text(&mut self, text: &str) -> Result<()> {
        let mut state = self.inner.lock();
        state.text = text.to_string();
        state.repaint();
        Ok(())
    }

    fn suspend_repaint(&mut self) {
        self.inner.lock().suspended += 1;
    }

    fn resume_repaint(&mut self) {
        let mut state = self.inner.lock();
        state.suspended = state.suspended.saturating_sub(1);
        state.repaint();
    }
}
