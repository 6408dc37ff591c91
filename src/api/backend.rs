// src/api/backend.rs

//! Pluggable backend abstraction.
//!
//! Every component talks to a `DashboardBackend` instead of an HTTP client.
//! Production code uses [`crate::api::HttpBackend`]; tests provide their own
//! implementation that records calls and returns canned responses.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::errors::Result;
use crate::status::{Download, MessageResponse, RunTasksResponse, Statistics};
use crate::types::{ResourceAction, ResourceId, ResourceKind};

/// Boxed future returned by backend calls.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Where a table loads its rows from: an endpoint path and the response field
/// holding the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSource {
    pub path: &'static str,
    pub data_src: &'static str,
}

/// One file of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Trait abstracting the REST backend.
pub trait DashboardBackend: Send + Sync {
    /// GET `source.path` and return the array under `source.data_src`.
    fn fetch_collection(&self, source: FetchSource) -> BackendFuture<'_, Vec<Value>>;

    /// GET `/tasks/statistics`.
    fn statistics(&self) -> BackendFuture<'_, Statistics>;

    /// POST `/run_tasks` as one multipart request.
    fn run_tasks(&self, files: Vec<UploadFile>, name: String) -> BackendFuture<'_, RunTasksResponse>;

    /// DELETE `/{kind}/{id}/delete` or POST `/{kind}/{id}/restart`.
    fn mutate(
        &self,
        kind: ResourceKind,
        id: ResourceId,
        action: ResourceAction,
    ) -> BackendFuture<'_, MessageResponse>;

    /// GET `/{kind}/{id}/download`.
    fn download(&self, kind: ResourceKind, id: ResourceId) -> BackendFuture<'_, Download>;
}

/// Relative endpoint path of an action against one resource.
pub fn action_path(kind: ResourceKind, id: ResourceId, action: ResourceAction) -> String {
    format!("{}/{}/{}", kind.as_str(), id, action.as_str())
}
