// src/table/mod.rs

//! The resource table: configuration per kind ([`config`]), row derivation
//! and sorting ([`rows`]) and the stateful, auto-refreshing view ([`view`]).

pub mod config;
pub mod rows;
pub mod view;

pub use config::{BaseOptions, Column, SortOrder, TableConfig, STATUS_COLUMN};
pub use rows::{derive_rows, format_added, sort_rows, StatusBundle, TableRow};
pub use view::ResourceTable;
