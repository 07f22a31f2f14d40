//! Last-line memory
//!
//! Written only by the dispatcher, readable from any producer thread.

use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct StateTracker {
    last_ui: RwLock<String>,
    last_log: RwLock<String>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last message shown on the display (filtered stream)
    pub fn last_ui_line(&self) -> String {
        self.last_ui.read().clone()
    }

    /// Last message processed, hidden or not (unfiltered stream)
    pub fn last_log_line(&self) -> String {
        self.last_log.read().clone()
    }

    pub(crate) fn record(&self, message: &str, hidden: bool) {
        self.last_log.write().replace_range(.., message);
        if !hidden {
            self.last_ui.write().replace_range(.., message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = StateTracker::new();
        assert_eq!(state.last_ui_line(), "");
        assert_eq!(state.last_log_line(), "");
    }

    #[test]
    fn test_hidden_updates_log_line_only() {
        let state = StateTracker::new();
        state.record("visible", false);
        state.record("hidden", true);

        assert_eq!(state.last_ui_line(), "visible");
        assert_eq!(state.last_log_line(), "hidden");
    }
}
