//! Configuration management
//!
//! Config file is `framelog.toml` in the working directory unless a path is
//! given on the command line. Every field has a default, so partial files and
//! an absent file are both valid.

use crate::constants::{
    DEFAULT_CHANNEL, DEFAULT_DEMO_FRAMES, DEFAULT_DEMO_JOBS, DEFAULT_FRAME_INTERVAL_MS,
    DEFAULT_LOGS_DIR,
};
use crate::error::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "framelog.toml";

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logs: LogsConfig,
    pub demo: DemoConfig,
}

// =============================================================================
// Delivery Mode
// =============================================================================

/// How queued entries get drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// A dedicated consumer thread drains continuously
    #[default]
    Dedicated,
    /// Each push drains one entry on the producer's thread
    Inline,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dedicated => write!(f, "dedicated"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

// =============================================================================
// Logs Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Directory holding one `<channel>.txt` per channel
    pub dir: PathBuf,
    /// Channel for entries that name none
    pub default_channel: String,
    /// Draining strategy
    pub delivery: DeliveryMode,
    /// Mirror every message to stderr
    pub console_mirror: bool,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOGS_DIR),
            default_channel: DEFAULT_CHANNEL.to_string(),
            delivery: DeliveryMode::Dedicated,
            console_mirror: true,
        }
    }
}

// =============================================================================
// Demo Configuration
// =============================================================================

/// Simulated encode jobs driven by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Concurrent jobs
    pub jobs: usize,
    /// Frames per job
    pub frames: u32,
    /// Delay between frames (milliseconds)
    pub frame_interval_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            jobs: DEFAULT_DEMO_JOBS,
            frames: DEFAULT_DEMO_FRAMES,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Reject values the pipeline or the demo cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.logs.default_channel.trim().is_empty() {
            return Err(LogError::ConfigValidation {
                field: "logs.default_channel",
                reason: "must not be empty".to_string(),
            });
        }
        if self.logs.dir.as_os_str().is_empty() {
            return Err(LogError::ConfigValidation {
                field: "logs.dir",
                reason: "must not be empty".to_string(),
            });
        }
        if self.demo.jobs == 0 {
            return Err(LogError::ConfigValidation {
                field: "demo.jobs",
                reason: "at least one job is required".to_string(),
            });
        }
        if self.demo.frames == 0 {
            return Err(LogError::ConfigValidation {
                field: "demo.frames",
                reason: "at least one frame is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Config path: explicit override or `framelog.toml` in the working directory
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load config from file, falling back to defaults on any problem
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Config parse error in {:?}: {}, using defaults", path, e);
                Config::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config {:?}: {}, using defaults", path, e);
            Config::default()
        }
    }
}

/// Save config to file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let content = snapshot(config)?;
    fs::write(path, content).map_err(|e| LogError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render the config as pretty TOML (used for snapshot dumps)
pub fn snapshot(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| LogError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_file(tag: &str) -> PathBuf {
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("framelog-config-{}-{}-{}.toml", tag, pid, ts))
    }

    #[test]
    fn test_default_logs_config_values() {
        let config = LogsConfig::default();

        assert_eq!(config.dir, PathBuf::from("logs"));
        assert_eq!(config.default_channel, "sessionlog");
        assert_eq!(config.delivery, DeliveryMode::Dedicated);
        assert!(config.console_mirror);
    }

    #[test]
    fn test_default_demo_config_values() {
        let config = DemoConfig::default();

        assert_eq!(config.jobs, DEFAULT_DEMO_JOBS);
        assert_eq!(config.frames, DEFAULT_DEMO_FRAMES);
        assert_eq!(config.frame_interval_ms, DEFAULT_FRAME_INTERVAL_MS);
    }

    #[test]
    fn test_delivery_mode_toml() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            delivery: DeliveryMode,
        }

        let inline = toml::to_string(&Wrapper {
            delivery: DeliveryMode::Inline,
        })
        .unwrap();
        assert!(inline.contains("delivery = \"inline\""));

        let parsed: Wrapper = toml::from_str("delivery = \"dedicated\"").unwrap();
        assert_eq!(parsed.delivery, DeliveryMode::Dedicated);
    }

    #[test]
    fn test_config_partial_logs_section() {
        let partial_toml = r#"
[logs]
dir = "/tmp/flow/logs"
delivery = "inline"
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.logs.dir, PathBuf::from("/tmp/flow/logs"));
        assert_eq!(config.logs.delivery, DeliveryMode::Inline);
        // Rest should be defaults
        assert_eq!(config.logs.default_channel, "sessionlog");
        assert!(config.logs.console_mirror);
        assert_eq!(config.demo.jobs, DEFAULT_DEMO_JOBS);
    }

    #[test]
    fn test_config_empty_file() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.logs.default_channel, "sessionlog");
        assert_eq!(config.logs.delivery, DeliveryMode::Dedicated);
        assert_eq!(config.demo.frames, DEFAULT_DEMO_FRAMES);
    }

    #[test]
    fn test_validate_rejects_empty_channel() {
        let mut config = Config::default();
        config.logs.default_channel = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(LogError::ConfigValidation {
                field: "logs.default_channel",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let mut config = Config::default();
        config.demo.jobs = 0;
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let path = unique_temp_file("roundtrip");
        let mut config = Config::default();
        config.logs.default_channel = "interp".to_string();
        config.logs.console_mirror = false;
        config.demo.jobs = 7;

        save(&config, &path).unwrap();
        let restored = load(&path);

        assert_eq!(restored.logs.default_channel, "interp");
        assert!(!restored.logs.console_mirror);
        assert_eq!(restored.demo.jobs, 7);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_or_malformed_uses_defaults() {
        let missing = unique_temp_file("missing");
        assert_eq!(load(&missing).logs.default_channel, "sessionlog");

        let broken = unique_temp_file("broken");
        fs::write(&broken, "[logs\nnot toml").unwrap();
        assert_eq!(load(&broken).demo.jobs, DEFAULT_DEMO_JOBS);
        let _ = fs::remove_file(&broken);
    }

    #[test]
    fn test_config_path_override() {
        assert_eq!(config_path(None), PathBuf::from("framelog.toml"));
        assert_eq!(
            config_path(Some(Path::new("/etc/framelog.toml"))),
            PathBuf::from("/etc/framelog.toml")
        );
    }
}
