// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [server]
/// base_url = "http://localhost:8000"
/// request_timeout = "30s"
///
/// [refresh]
/// table_interval = "8s"
/// statistics_interval = "8s"
///
/// [upload]
/// allowed_extensions = ["zip", "geojson"]
///
/// [ui]
/// page_size = 10
/// notice_timeout = "3s"
/// state_dir = ".taskboard"
/// download_dir = "."
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated form; see [`ConfigFile`] for the checked one.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub refresh: RefreshSection,

    #[serde(default)]
    pub upload: UploadSection,

    #[serde(default)]
    pub ui: UiSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout of the HTTP client.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> String {
    "30s".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// `[refresh]` section: the two independent polling periods.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSection {
    #[serde(default = "default_interval")]
    pub table_interval: String,

    #[serde(default = "default_interval")]
    pub statistics_interval: String,
}

fn default_interval() -> String {
    "8s".to_string()
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            table_interval: default_interval(),
            statistics_interval: default_interval(),
        }
    }
}

/// `[upload]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSection {
    /// File extensions (without the dot) accepted by the upload session.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

pub fn default_allowed_extensions() -> Vec<String> {
    vec!["zip".to_string(), "geojson".to_string()]
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiSection {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How long a notice stays on screen before it is dropped.
    #[serde(default = "default_notice_timeout")]
    pub notice_timeout: String,

    /// Where persisted preferences live.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Target directory for downloaded artifacts.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_page_size() -> usize {
    10
}

fn default_notice_timeout() -> String {
    "3s".to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".taskboard")
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            notice_timeout: default_notice_timeout(),
            state_dir: default_state_dir(),
            download_dir: default_download_dir(),
        }
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`),
/// so every duration is non-zero and the base URL is usable.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub table_interval: Duration,
    pub statistics_interval: Duration,
    pub allowed_extensions: Vec<String>,
    pub page_size: usize,
    pub notice_timeout: Duration,
    pub state_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl ConfigFile {
    /// Replace the base URL (e.g. from `--base-url`).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{}' is too large", s))
}
