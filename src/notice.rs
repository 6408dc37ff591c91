// src/notice.rs

//! Timed, dismissible notices shown above the table.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

/// Newest-first list of notices. Each one expires `timeout` after creation.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    timeout: Duration,
}

impl NoticeBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            notices: Vec::new(),
            timeout,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        debug!(?level, %message, "notice");
        self.notices.insert(
            0,
            Notice {
                level,
                message,
                created: Instant::now(),
            },
        );
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Danger, message);
    }

    /// Drop every notice older than the timeout.
    pub fn prune(&mut self, now: Instant) {
        let timeout = self.timeout;
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < timeout);
    }

    /// When the oldest notice expires, if any is shown.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.notices.iter().map(|n| n.created + self.timeout).min()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Dismiss the newest notice. Returns false when there was none.
    pub fn dismiss_latest(&mut self) -> bool {
        if self.notices.is_empty() {
            return false;
        }
        self.notices.remove(0);
        true
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.first()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
