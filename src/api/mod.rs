// src/api/mod.rs

//! Backend access layer.
//!
//! - [`backend`] defines the `DashboardBackend` trait the rest of the crate
//!   depends on, plus the small request types it exchanges.
//! - [`http`] is the production implementation on top of `reqwest`.

pub mod backend;
pub mod http;

pub use backend::{action_path, BackendFuture, DashboardBackend, FetchSource, UploadFile};
pub use http::{content_disposition_file_name, HttpBackend};
