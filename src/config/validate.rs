// src/config/validate.rs

use std::time::Duration;

use url::Url;

use crate::config::model::{parse_duration, ConfigFile, RawConfigFile};
use crate::errors::{DashboardError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DashboardError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let base_url = validate_base_url(&raw.server.base_url)?;
        let request_timeout = positive_duration("server.request_timeout", &raw.server.request_timeout)?;
        let table_interval = positive_duration("refresh.table_interval", &raw.refresh.table_interval)?;
        let statistics_interval =
            positive_duration("refresh.statistics_interval", &raw.refresh.statistics_interval)?;
        let notice_timeout = positive_duration("ui.notice_timeout", &raw.ui.notice_timeout)?;
        let allowed_extensions = validate_extensions(&raw.upload.allowed_extensions)?;

        if raw.ui.page_size == 0 {
            return Err(DashboardError::ConfigError(
                "[ui].page_size must be >= 1 (got 0)".to_string(),
            ));
        }

        Ok(ConfigFile {
            base_url,
            request_timeout,
            table_interval,
            statistics_interval,
            allowed_extensions,
            page_size: raw.ui.page_size,
            notice_timeout,
            state_dir: raw.ui.state_dir,
            download_dir: raw.ui.download_dir,
        })
    }
}

/// Parse and normalise the backend base URL.
///
/// Endpoint paths are joined onto it, so a trailing slash is enforced.
pub fn validate_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(DashboardError::ConfigError(format!(
            "[server].base_url must be an http(s) URL (got '{raw}')"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Upper bound for every configured period and timeout.
pub const MAX_DURATION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn positive_duration(key: &str, raw: &str) -> Result<Duration> {
    let duration = parse_duration(raw)
        .map_err(|e| DashboardError::ConfigError(format!("{key}: {e}")))?;

    if duration.is_zero() {
        return Err(DashboardError::ConfigError(format!(
            "{key} must be greater than zero (got '{raw}')"
        )));
    }

    if duration > MAX_DURATION {
        return Err(DashboardError::ConfigError(format!(
            "{key} must be at most {}h (got '{raw}')",
            MAX_DURATION.as_secs() / 3600
        )));
    }

    Ok(duration)
}

fn validate_extensions(raw: &[String]) -> Result<Vec<String>> {
    let extensions: Vec<String> = raw
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect();

    if extensions.is_empty() {
        return Err(DashboardError::ConfigError(
            "[upload].allowed_extensions must list at least one extension".to_string(),
        ));
    }

    Ok(extensions)
}
