// src/status/model.rs

//! Backend records as the dashboard sees them.
//!
//! The backend stores sub-process statuses and group statistics as serialized
//! JSON text, and depending on the endpoint they arrive either as nested
//! objects or as strings. [`json_or_string`] accepts both, and `null` or an
//! empty string fall back to the type's default.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::types::ResourceId;

/// State tag reported by the backend for one sub-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceState {
    Preparing,
    Accepted,
    Started,
    Success,
    Failed,
    Cancelled,
    /// Absent or unrecognised state.
    #[default]
    Rejected,
}

impl ResourceState {
    pub const ALL: [ResourceState; 7] = [
        ResourceState::Preparing,
        ResourceState::Accepted,
        ResourceState::Started,
        ResourceState::Success,
        ResourceState::Failed,
        ResourceState::Cancelled,
        ResourceState::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceState::Preparing => "PREPARING",
            ResourceState::Accepted => "ACCEPTED",
            ResourceState::Started => "STARTED",
            ResourceState::Success => "SUCCESS",
            ResourceState::Failed => "FAILED",
            ResourceState::Cancelled => "CANCELLED",
            ResourceState::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceState {
    type Err = std::convert::Infallible;

    /// Never fails: anything unknown normalises to `Rejected`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "PREPARING" => ResourceState::Preparing,
            "ACCEPTED" => ResourceState::Accepted,
            "STARTED" => ResourceState::Started,
            "SUCCESS" => ResourceState::Success,
            "FAILED" => ResourceState::Failed,
            "CANCELLED" => ResourceState::Cancelled,
            _ => ResourceState::Rejected,
        })
    }
}

impl<'de> Deserialize<'de> for ResourceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::String(s) => s.parse().unwrap_or_default(),
            _ => ResourceState::Rejected,
        })
    }
}

impl Serialize for ResourceState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Status of one backend sub-process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceStatus {
    #[serde(default)]
    pub state: ResourceState,

    /// Only populated when `state` is `Failed`.
    #[serde(default)]
    pub error: Option<String>,
}

impl ResourceStatus {
    pub fn new(state: ResourceState) -> Self {
        Self { state, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: ResourceState::Failed,
            error: Some(error.into()),
        }
    }
}

/// A unit of backend processing with two tracked sub-processes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: ResourceId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "timestamp")]
    pub added: Option<NaiveDateTime>,

    #[serde(default)]
    pub group_id: Option<ResourceId>,

    #[serde(default, deserialize_with = "json_or_string")]
    pub kpt_status: ResourceStatus,

    #[serde(default, deserialize_with = "json_or_string")]
    pub kad_status: ResourceStatus,
}

/// Per-group aggregate, computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupStatistics {
    #[serde(default)]
    pub loaded: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub remaining: u64,
}

/// A named collection of tasks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    pub id: ResourceId,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "timestamp")]
    pub added: Option<NaiveDateTime>,

    #[serde(default, deserialize_with = "json_or_string")]
    pub statistics: GroupStatistics,
}

/// Response of `/tasks/statistics`.
///
/// Same shape as a group's statistics, but over every task.
pub type Statistics = GroupStatistics;

/// Response of `/run_tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RunTasksResponse {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub errors: Vec<String>,
}

/// Response of the delete / restart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// A downloaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Server-suggested file name, if the response carried one.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Accept either a nested JSON value or a string containing JSON.
///
/// Anything that does not parse into `T` falls back to `T::default()` so the
/// surrounding record is kept.
pub fn json_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match value {
        Value::Null => return Ok(T::default()),
        Value::String(s) if s.trim().is_empty() => return Ok(T::default()),
        Value::String(s) => serde_json::from_str(&s),
        other => serde_json::from_value(other),
    };
    Ok(parsed.unwrap_or_else(|error| {
        warn!(%error, "unreadable embedded value; using default");
        T::default()
    }))
}

/// Timestamps arrive as RFC 3339 with offset or as naive ISO strings.
/// The wall-clock value is kept as sent; unparsable values become `None`.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(parse_timestamp(&s)),
        _ => Ok(None),
    }
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
