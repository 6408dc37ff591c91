use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use taskboard::api::{BackendFuture, DashboardBackend, FetchSource, UploadFile};
use taskboard::engine::TimerActivity;
use taskboard::errors::DashboardError;
use taskboard::status::{Download, MessageResponse, RunTasksResponse, Statistics};
use taskboard::types::{ResourceAction, ResourceId, ResourceKind};

/// One recorded backend call.
///
/// `auto_refresh_active` is the state of the watched table timer at the
/// moment the call was made (`None` when no timer is watched).
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Fetch {
        path: &'static str,
        auto_refresh_active: Option<bool>,
    },
    Statistics,
    RunTasks {
        files: Vec<UploadFile>,
        name: String,
    },
    Mutate {
        kind: ResourceKind,
        id: ResourceId,
        action: ResourceAction,
        auto_refresh_active: Option<bool>,
    },
    Download {
        kind: ResourceKind,
        id: ResourceId,
        auto_refresh_active: Option<bool>,
    },
}

#[derive(Debug, Default)]
struct State {
    collections: HashMap<&'static str, Vec<Value>>,
    statistics: Option<Statistics>,
    run_tasks: RunTasksResponse,
    download: Option<Download>,
    fail_fetch: bool,
    fail_statistics: bool,
    fail_run_tasks: bool,
    fail_actions: bool,
    timer: Option<TimerActivity>,
    calls: Vec<BackendCall>,
}

/// A fake backend that:
/// - serves canned collections, statistics and responses
/// - fails selected endpoints on request
/// - records every call, together with the watched timer state.
///
/// Clones share state, so a test can keep one handle while the runtime owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(self, tasks: Vec<Value>) -> Self {
        self.set_collection("tasks", tasks);
        self
    }

    pub fn with_groups(self, groups: Vec<Value>) -> Self {
        self.set_collection("groups", groups);
        self
    }

    pub fn with_statistics(self, stats: Statistics) -> Self {
        self.state.lock().unwrap().statistics = Some(stats);
        self
    }

    pub fn with_run_tasks_response(self, response: RunTasksResponse) -> Self {
        self.state.lock().unwrap().run_tasks = response;
        self
    }

    pub fn with_download(self, download: Download) -> Self {
        self.state.lock().unwrap().download = Some(download);
        self
    }

    pub fn set_collection(&self, path: &'static str, values: Vec<Value>) {
        self.state.lock().unwrap().collections.insert(path, values);
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetch = fail;
    }

    pub fn fail_statistics(&self, fail: bool) {
        self.state.lock().unwrap().fail_statistics = fail;
    }

    pub fn fail_run_tasks(&self, fail: bool) {
        self.state.lock().unwrap().fail_run_tasks = fail;
    }

    /// Make delete, restart and download fail.
    pub fn fail_actions(&self, fail: bool) {
        self.state.lock().unwrap().fail_actions = fail;
    }

    /// Record the state of `timer` with every fetch and action call.
    pub fn watch_timer(&self, timer: TimerActivity) {
        self.state.lock().unwrap().timer = Some(timer);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Fetch { path: p, .. } if *p == path))
            .count()
    }

    pub fn statistics_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Statistics))
            .count()
    }

    pub fn run_tasks_calls(&self) -> Vec<(Vec<UploadFile>, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BackendCall::RunTasks { files, name } => Some((files, name)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, make: impl FnOnce(Option<bool>) -> BackendCall) {
        let mut state = self.state.lock().unwrap();
        let active = state.timer.as_ref().map(|t| t.is_active());
        state.calls.push(make(active));
    }

    fn failure(path: String) -> DashboardError {
        DashboardError::BackendStatus {
            status: 500,
            url: format!("http://fake/{path}"),
        }
    }
}

impl DashboardBackend for FakeBackend {
    fn fetch_collection(&self, source: FetchSource) -> BackendFuture<'_, Vec<Value>> {
        self.record(|active| BackendCall::Fetch {
            path: source.path,
            auto_refresh_active: active,
        });
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_fetch {
                Err(Self::failure(source.path.to_string()))
            } else {
                Ok(state
                    .collections
                    .get(source.path)
                    .cloned()
                    .unwrap_or_default())
            }
        };
        Box::pin(async move { result })
    }

    fn statistics(&self) -> BackendFuture<'_, Statistics> {
        self.record(|_| BackendCall::Statistics);
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_statistics {
                Err(Self::failure("tasks/statistics".to_string()))
            } else {
                Ok(state.statistics.unwrap_or_default())
            }
        };
        Box::pin(async move { result })
    }

    fn run_tasks(&self, files: Vec<UploadFile>, name: String) -> BackendFuture<'_, RunTasksResponse> {
        self.record(|_| BackendCall::RunTasks { files, name });
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_run_tasks {
                Err(Self::failure("run_tasks".to_string()))
            } else {
                Ok(state.run_tasks.clone())
            }
        };
        Box::pin(async move { result })
    }

    fn mutate(
        &self,
        kind: ResourceKind,
        id: ResourceId,
        action: ResourceAction,
    ) -> BackendFuture<'_, MessageResponse> {
        self.record(|active| BackendCall::Mutate {
            kind,
            id,
            action,
            auto_refresh_active: active,
        });
        let result = if self.state.lock().unwrap().fail_actions {
            Err(Self::failure(format!("{kind}/{id}/{action}")))
        } else {
            Ok(MessageResponse {
                message: format!("{} {id} {action} ok", kind.singular()),
            })
        };
        Box::pin(async move { result })
    }

    fn download(&self, kind: ResourceKind, id: ResourceId) -> BackendFuture<'_, Download> {
        self.record(|active| BackendCall::Download {
            kind,
            id,
            auto_refresh_active: active,
        });
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_actions {
                Err(Self::failure(format!("{kind}/{id}/download")))
            } else {
                Ok(state.download.clone().unwrap_or(Download {
                    file_name: None,
                    bytes: b"PK".to_vec(),
                }))
            }
        };
        Box::pin(async move { result })
    }
}
