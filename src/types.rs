use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend identifier of a task or group.
pub type ResourceId = i64;

/// The two schedulable entity kinds the dashboard can show.
///
/// The lowercase name doubles as the URL path segment (`/tasks`, `/groups`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Tasks,
    Groups,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Tasks => "tasks",
            ResourceKind::Groups => "groups",
        }
    }

    /// The other kind; used by the table switcher.
    pub fn toggled(self) -> Self {
        match self {
            ResourceKind::Tasks => ResourceKind::Groups,
            ResourceKind::Groups => ResourceKind::Tasks,
        }
    }

    /// Singular noun for user-facing messages.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Tasks => "task",
            ResourceKind::Groups => "group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tasks" | "task" => Ok(ResourceKind::Tasks),
            "groups" | "group" => Ok(ResourceKind::Groups),
            other => Err(format!(
                "invalid resource kind: {other} (expected \"tasks\" or \"groups\")"
            )),
        }
    }
}

/// User-triggered operation against a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    Download,
    Delete,
    Restart,
}

impl ResourceAction {
    /// Last path segment of the action endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceAction::Download => "download",
            ResourceAction::Delete => "delete",
            ResourceAction::Restart => "restart",
        }
    }

    /// Message shown when the action fails for a resource of `kind`.
    pub fn error_text(&self, kind: ResourceKind) -> String {
        match self {
            ResourceAction::Download => "Error downloading file!".to_string(),
            ResourceAction::Delete => format!("Error deleting {}!", kind.singular()),
            ResourceAction::Restart => format!("Error restarting {}!", kind.singular()),
        }
    }
}

impl fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "download" => Ok(ResourceAction::Download),
            "delete" => Ok(ResourceAction::Delete),
            "restart" => Ok(ResourceAction::Restart),
            other => Err(format!("invalid action: {other}")),
        }
    }
}

/// Colour theme of the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!(
                "invalid theme: {other} (expected \"light\" or \"dark\")"
            )),
        }
    }
}
