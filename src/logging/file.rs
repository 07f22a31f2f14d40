//! Append-only channel files
//!
//! One text file per channel under the logs root. Lines carry a sequence id
//! shared by all channels and a local timestamp. Writers are serialized by the
//! dispatcher lock, so files are opened per write without any file locking.

use super::channel;
use crate::constants::LINE_ENDING;
use crate::error::{LogError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a line is joined to the existing file content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// New stamped line: `<LE>[<id>] [<time>]: <text>`
    NewLine,
    /// Continue the current last line: `" " + text`
    Continue,
}

#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    default_channel: String,
    next_id: u64,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, default_channel: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_channel: default_channel.into(),
            next_id: 0,
        }
    }

    /// Logs root
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Id the next write will carry
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Path a channel resolves to
    pub fn channel_path(&self, channel: &str) -> Result<PathBuf> {
        channel::resolve(&self.dir, channel, &self.default_channel)
    }

    /// Append one line to a channel file.
    ///
    /// Returns the sequence id consumed by this write. The id is consumed even
    /// when the write fails, so every attempt advances the counter exactly once.
    pub fn append(&mut self, channel: &str, text: &str, mode: LineMode) -> (u64, Result<()>) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        let text = flatten(text);
        let line = match mode {
            LineMode::NewLine => format_line(id, &timestamp(&Local::now()), &text),
            LineMode::Continue => format!(" {}", text),
        };

        let result = self
            .channel_path(channel)
            .and_then(|path| self.write(&path, &line, true));
        (id, result)
    }

    /// Write a timestamped block, bypassing the sequence counter.
    ///
    /// Used for one-shot dumps (configuration snapshots) rather than streamed
    /// lines. `append = false` truncates the channel file first.
    pub fn write_block(&self, content: &str, append: bool, channel: &str) -> Result<()> {
        let path = self.channel_path(channel)?;
        let block = format!(
            "{le}{time}:{le}{content}",
            le = LINE_ENDING,
            time = timestamp(&Local::now()),
            content = content
        );
        self.write(&path, &block, append)
    }

    fn write(&self, path: &Path, data: &str, append: bool) -> Result<()> {
        let io_err = |source| LogError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|source| LogError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut file = if append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
        }
        .map_err(io_err)?;

        file.write_all(data.as_bytes()).map_err(io_err)
    }
}

/// `M-D-YYYY H:M:S`, no zero padding
pub fn timestamp(now: &DateTime<Local>) -> String {
    now.format("%-m-%-d-%Y %-H:%-M:%-S").to_string()
}

fn format_line(id: u64, time: &str, text: &str) -> String {
    format!("{}[{}] [{}]: {}", LINE_ENDING, id, time, text)
}

/// Replace embedded line breaks with spaces and trim
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("framelog-file-{}-{}-{}", tag, pid, ts))
    }

    #[test]
    fn test_timestamp_is_unpadded() {
        let t = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(timestamp(&t), "3-7-2024 9:5:2");

        let t = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
        assert_eq!(timestamp(&t), "12-31-2024 23:59:58");
    }

    #[test]
    fn test_flatten_strips_breaks() {
        assert_eq!(flatten("  a\r\nb\nc\rd  "), "a b c d");
    }

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(4, "1-2-2024 3:4:5", "[UI] hello"),
            format!("{}[4] [1-2-2024 3:4:5]: [UI] hello", LINE_ENDING)
        );
    }

    #[test]
    fn test_append_creates_dir_and_file() {
        let dir = unique_temp_dir("create");
        let mut sink = FileSink::new(&dir, "sessionlog");

        let (id, result) = sink.append("", "first", LineMode::NewLine);
        assert!(result.is_ok());
        assert_eq!(id, 0);

        let content = fs::read_to_string(dir.join("sessionlog.txt")).unwrap();
        assert!(content.starts_with(LINE_ENDING));
        assert!(content.contains("[0] ["));
        assert!(content.ends_with("]: first"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_ids_shared_across_channels() {
        let dir = unique_temp_dir("ids");
        let mut sink = FileSink::new(&dir, "sessionlog");

        assert_eq!(sink.append("a", "one", LineMode::NewLine).0, 0);
        assert_eq!(sink.append("b", "two", LineMode::NewLine).0, 1);
        assert_eq!(sink.append("a", "three", LineMode::NewLine).0, 2);
        assert_eq!(sink.next_id(), 3);

        let a = fs::read_to_string(dir.join("a.txt")).unwrap();
        assert_eq!(a.lines().filter(|l| !l.is_empty()).count(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_continue_appends_to_last_line() {
        let dir = unique_temp_dir("continue");
        let mut sink = FileSink::new(&dir, "sessionlog");

        sink.append("", "Encoding", LineMode::NewLine).1.unwrap();
        sink.append("", "done", LineMode::Continue).1.unwrap();

        let content = fs::read_to_string(dir.join("sessionlog.txt")).unwrap();
        assert!(content.ends_with("]: Encoding done"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_write_still_consumes_id() {
        let dir = unique_temp_dir("fail");
        fs::create_dir_all(&dir).unwrap();
        // A directory where the channel file should be makes the open fail.
        fs::create_dir_all(dir.join("blocked.txt")).unwrap();
        let mut sink = FileSink::new(&dir, "sessionlog");

        let (id, result) = sink.append("blocked", "lost", LineMode::NewLine);
        assert_eq!(id, 0);
        assert!(matches!(result, Err(LogError::Io { .. })));
        assert_eq!(sink.next_id(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_block_overwrite_and_append() {
        let dir = unique_temp_dir("block");
        let sink = FileSink::new(&dir, "sessionlog");

        sink.write_block("first dump", false, "config").unwrap();
        sink.write_block("second dump", false, "config").unwrap();
        let content = fs::read_to_string(dir.join("config.txt")).unwrap();
        assert!(!content.contains("first dump"));
        assert!(content.ends_with(&format!(":{}second dump", LINE_ENDING)));

        sink.write_block("third dump", true, "config").unwrap();
        let content = fs::read_to_string(dir.join("config.txt")).unwrap();
        assert!(content.contains("second dump"));
        assert!(content.ends_with("third dump"));
        assert_eq!(sink.next_id(), 0);

        let _ = fs::remove_dir_all(&dir);
    }
}
