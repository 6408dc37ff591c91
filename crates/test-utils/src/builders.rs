#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use serde_json::{json, Value};
use taskboard::config::{ConfigFile, RawConfigFile};
use url::Url;

/// JSON record of a task as the backend returns it.
pub fn task_json(id: i64, kpt: &str, kad: &str) -> Value {
    json!({
        "id": id,
        "name": format!("task-{id}"),
        "added": "2024-03-05T14:07:00",
        "group_id": null,
        "kpt_status": { "state": kpt, "error": null },
        "kad_status": { "state": kad, "error": null },
    })
}

/// JSON record of a group with the given in-progress count.
pub fn group_json(id: i64, in_progress: u64) -> Value {
    json!({
        "id": id,
        "name": format!("group-{id}"),
        "added": "2024-03-05T14:07:00",
        "statistics": {
            "loaded": 4,
            "in_progress": in_progress,
            "completed": 1,
            "failed": 0,
            "remaining": 3,
        },
    })
}

/// `count` tasks with distinct ids, all in the same state.
pub fn tasks_json(count: i64, state: &str) -> Vec<Value> {
    (1..=count).map(|id| task_json(id, state, state)).collect()
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: ConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: ConfigFile::try_from(RawConfigFile::default())
                .expect("default config must validate"),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.config.base_url = Url::parse(url).expect("valid url");
        self
    }

    pub fn with_table_interval(mut self, interval: Duration) -> Self {
        self.config.table_interval = interval;
        self
    }

    pub fn with_statistics_interval(mut self, interval: Duration) -> Self {
        self.config.statistics_interval = interval;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn with_notice_timeout(mut self, timeout: Duration) -> Self {
        self.config.notice_timeout = timeout;
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.state_dir = dir.into();
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.download_dir = dir.into();
        self
    }

    pub fn build(self) -> ConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
