// src/table/config.rs

//! Per-kind table configuration.
//!
//! A `TableConfig` is the shared [`BaseOptions`] plus the parts that depend
//! on the [`ResourceKind`]: where rows come from, what the columns are
//! called and which actions each row offers.

use crate::api::FetchSource;
use crate::types::{ResourceAction, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Options shared by every table kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseOptions {
    pub page_size: usize,
    /// Order of the status column, which is the default sort.
    pub order: SortOrder,
}

impl BaseOptions {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            order: SortOrder::Descending,
        }
    }
}

impl Default for BaseOptions {
    fn default() -> Self {
        Self::new(10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// Relative width in the rendered table.
    pub width: usize,
    pub orderable: bool,
}

const fn column(title: &'static str, width: usize) -> Column {
    Column {
        title,
        width,
        orderable: true,
    }
}

const ROW_ACTIONS: &[ResourceAction] = &[
    ResourceAction::Download,
    ResourceAction::Delete,
    ResourceAction::Restart,
];

const TASK_COLUMNS: &[Column] = &[
    column("ID", 6),
    column("Name", 24),
    column("Status", 48),
    column("Added", 18),
    Column {
        title: "Actions",
        width: 8,
        orderable: false,
    },
];

const GROUP_COLUMNS: &[Column] = &[
    column("ID", 6),
    column("Group", 24),
    column("Statistics", 48),
    column("Added", 18),
    Column {
        title: "Actions",
        width: 8,
        orderable: false,
    },
];

/// Index of the status column, the default sort target.
pub const STATUS_COLUMN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub kind: ResourceKind,
    pub source: FetchSource,
    pub columns: &'static [Column],
    pub actions: &'static [ResourceAction],
    pub base: BaseOptions,
}

impl TableConfig {
    pub fn for_kind(kind: ResourceKind, base: BaseOptions) -> Self {
        let (source, columns) = match kind {
            ResourceKind::Tasks => (
                FetchSource {
                    path: "tasks",
                    data_src: "tasks",
                },
                TASK_COLUMNS,
            ),
            ResourceKind::Groups => (
                FetchSource {
                    path: "groups",
                    data_src: "groups",
                },
                GROUP_COLUMNS,
            ),
        };

        Self {
            kind,
            source,
            columns,
            actions: ROW_ACTIONS,
            base,
        }
    }
}
