// src/status/resolver.rs

//! Mapping from backend state to what an operator sees.
//!
//! Priorities order rows so that active work (started, newly accepted)
//! surfaces above terminal states, which surface above unknown and
//! not-yet-submitted ones.

use crate::status::model::{GroupStatistics, ResourceState, ResourceStatus, Task};

/// Visual emphasis of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Secondary,
    Warning,
    Success,
    Danger,
    Info,
}

/// Display bundle for one status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatus {
    pub label: String,
    pub priority: i32,
    /// `None` means the status is not rendered at all.
    pub badge: Option<Badge>,
}

/// Sort priority of a single state.
pub fn priority(state: ResourceState) -> i32 {
    match state {
        ResourceState::Preparing => -1,
        ResourceState::Success => 2,
        ResourceState::Failed => 3,
        ResourceState::Accepted => 4,
        ResourceState::Started => 5,
        ResourceState::Cancelled | ResourceState::Rejected => 0,
    }
}

pub fn resolve(status: &ResourceStatus) -> ResolvedStatus {
    let (label, badge) = match status.state {
        ResourceState::Accepted => ("Accepted for processing".to_string(), Some(Badge::Secondary)),
        ResourceState::Started => ("Processing".to_string(), Some(Badge::Warning)),
        ResourceState::Success => ("Done".to_string(), Some(Badge::Success)),
        ResourceState::Failed => {
            let label = match status.error.as_deref().map(str::trim) {
                Some(err) if !err.is_empty() => format!("Error: {err}"),
                _ => "Error".to_string(),
            };
            (label, Some(Badge::Danger))
        }
        ResourceState::Cancelled => ("Cancelled".to_string(), Some(Badge::Secondary)),
        ResourceState::Preparing => ("Preparing".to_string(), Some(Badge::Secondary)),
        ResourceState::Rejected => (String::new(), None),
    };

    ResolvedStatus {
        label,
        priority: priority(status.state),
        badge,
    }
}

/// Either sub-process being urgent makes the whole entity urgent.
pub fn combined_priority(a: &ResourceStatus, b: &ResourceStatus) -> i32 {
    priority(a.state).max(priority(b.state))
}

impl Task {
    pub fn sort_priority(&self) -> i32 {
        combined_priority(&self.kpt_status, &self.kad_status)
    }
}

impl GroupStatistics {
    /// Groups sort by how much of their work is still running.
    pub fn sort_priority(&self) -> i64 {
        i64::try_from(self.in_progress).unwrap_or(i64::MAX)
    }

    /// Labelled counters in display order, with the in-progress counter
    /// emphasised only while something is running.
    pub fn badges(&self) -> [(Badge, String); 5] {
        let in_progress_badge = if self.in_progress > 0 {
            Badge::Warning
        } else {
            Badge::Secondary
        };
        [
            (Badge::Info, format!("Loaded: {}", self.loaded)),
            (in_progress_badge, format!("In progress: {}", self.in_progress)),
            (Badge::Success, format!("Completed: {}", self.completed)),
            (Badge::Danger, format!("Failed: {}", self.failed)),
            (Badge::Secondary, format!("Remaining: {}", self.remaining)),
        ]
    }
}
