// src/table/rows.rs

//! Row derivation: raw backend records to display rows with a sort key.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::warn;

use crate::status::{resolve, Group, GroupStatistics, ResolvedStatus, Task};
use crate::table::config::{SortOrder, TableConfig};
use crate::types::{ResourceAction, ResourceId, ResourceKind};

/// Derived status column of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBundle {
    Task {
        kpt: ResolvedStatus,
        kad: ResolvedStatus,
    },
    Group(GroupStatistics),
}

impl StatusBundle {
    /// Sub-process prefixes shown in front of task statuses.
    pub const KPT_PREFIX: &'static str = "kpt:";
    pub const KAD_PREFIX: &'static str = "kad:";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: ResourceId,
    pub name: String,
    pub added: String,
    pub status: StatusBundle,
    /// Status column sort key (task priority or group in-progress count).
    pub sort_key: i64,
    pub actions: &'static [ResourceAction],
}

impl TableRow {
    pub fn from_task(task: Task, actions: &'static [ResourceAction]) -> Self {
        let sort_key = i64::from(task.sort_priority());
        Self {
            id: task.id,
            added: format_added(task.added),
            status: StatusBundle::Task {
                kpt: resolve(&task.kpt_status),
                kad: resolve(&task.kad_status),
            },
            name: task.name,
            sort_key,
            actions,
        }
    }

    pub fn from_group(group: Group, actions: &'static [ResourceAction]) -> Self {
        Self {
            id: group.id,
            added: format_added(group.added),
            sort_key: group.statistics.sort_priority(),
            status: StatusBundle::Group(group.statistics),
            name: group.name,
            actions,
        }
    }
}

/// Turn raw records into rows for `config.kind`.
///
/// A record that does not parse is skipped with a warning; one bad row
/// should not blank the whole table.
pub fn derive_rows(config: &TableConfig, values: Vec<Value>) -> Vec<TableRow> {
    let mut rows = Vec::with_capacity(values.len());

    for value in values {
        let parsed = match config.kind {
            ResourceKind::Tasks => serde_json::from_value::<Task>(value)
                .map(|task| TableRow::from_task(task, config.actions)),
            ResourceKind::Groups => serde_json::from_value::<Group>(value)
                .map(|group| TableRow::from_group(group, config.actions)),
        };

        match parsed {
            Ok(row) => rows.push(row),
            Err(error) => warn!(kind = %config.kind, %error, "skipping malformed record"),
        }
    }

    sort_rows(&mut rows, config.base.order);
    rows
}

/// Stable sort by the status key, so equal keys keep backend order.
pub fn sort_rows(rows: &mut [TableRow], order: SortOrder) {
    match order {
        SortOrder::Ascending => rows.sort_by_key(|r| r.sort_key),
        SortOrder::Descending => rows.sort_by(|a, b| b.sort_key.cmp(&a.sort_key)),
    }
}

pub fn format_added(added: Option<NaiveDateTime>) -> String {
    added
        .map(|dt| dt.format("%d.%m.%Y, %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
