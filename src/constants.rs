//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Channels & Files
// =============================================================================

/// Channel used when an entry does not name one
pub const DEFAULT_CHANNEL: &str = "sessionlog";

/// Extension every channel file is normalized to
pub const LOG_FILE_EXTENSION: &str = "txt";

/// Default logs root, relative to the working directory
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Channel used by `framelog snapshot` for configuration dumps
pub const CONFIG_SNAPSHOT_CHANNEL: &str = "config";

/// Host line ending used for display text and file lines
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

// =============================================================================
// Markers
// =============================================================================

/// File-side prefix for entries that replaced the previous display line
pub const REPLACE_MARKER: &str = "[REPL]";

/// File-side prefix for entries that reached the display
pub const UI_MARKER: &str = "[UI]";

// =============================================================================
// Threads
// =============================================================================

/// Name of the dedicated consumer thread
pub const DISPATCHER_THREAD_NAME: &str = "framelog-dispatcher";

// =============================================================================
// UI
// =============================================================================

/// Frame duration for TUI loop (milliseconds, ~60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// Number of lines to scroll per page (PageUp/PageDown)
pub const PAGE_SCROLL_LINES: usize = 10;

/// Status message display timeout (seconds)
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 2;

/// Width threshold for wide/narrow layout switch
pub const WIDE_THRESHOLD: u16 = 80;

// =============================================================================
// Demo jobs
// =============================================================================

/// Default number of concurrent simulated encode jobs
pub const DEFAULT_DEMO_JOBS: usize = 3;

/// Default number of frames each simulated job processes
pub const DEFAULT_DEMO_FRAMES: u32 = 40;

/// Default delay between simulated frames (milliseconds)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 60;
