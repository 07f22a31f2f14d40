//! Channel name resolution
//!
//! Maps a logical channel name to its file under the logs root.

use crate::constants::{DEFAULT_CHANNEL, LOG_FILE_EXTENSION};
use crate::error::{LogError, Result};
use std::path::{Path, PathBuf};

/// Normalize a channel name to its file name (`<channel>.txt`).
///
/// Empty names fall back to `default_channel`. Directory components are
/// stripped so a channel can never point outside the logs root, and any other
/// extension is replaced by `.txt`.
pub fn file_name(channel: &str, default_channel: &str) -> Result<String> {
    let trimmed = channel.trim();
    let name = if trimmed.is_empty() {
        if default_channel.trim().is_empty() {
            DEFAULT_CHANNEL
        } else {
            default_channel.trim()
        }
    } else {
        trimmed
    };

    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .ok_or_else(|| LogError::InvalidChannel {
            name: channel.to_string(),
        })?;

    let with_ext = Path::new(base).with_extension(LOG_FILE_EXTENSION);
    with_ext
        .to_str()
        .map(String::from)
        .ok_or_else(|| LogError::InvalidChannel {
            name: channel.to_string(),
        })
}

/// Full path of a channel file under `dir`
pub fn resolve(dir: &Path, channel: &str, default_channel: &str) -> Result<PathBuf> {
    Ok(dir.join(file_name(channel, default_channel)?))
}
