// src/coordinator.rs

//! Serialises user actions with the table's auto-refresh.
//!
//! While a delete / restart / download is outstanding, the table's timer is
//! stopped so no refresh can reload the rows the action refers to. The
//! timer is restarted and the triggering control restored in both outcome
//! branches.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::api::DashboardBackend;
use crate::engine::ActionRequest;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::notice::NoticeBoard;
use crate::table::ResourceTable;
use crate::types::ResourceAction;

/// The control that triggered an action (a button, a spinner line, ...).
pub trait ActionControl: Send {
    /// `true`: disable and show a busy indicator. `false`: restore.
    fn set_busy(&mut self, busy: bool);
}

/// A control with no visual representation.
#[derive(Debug, Default)]
pub struct NoopControl;

impl ActionControl for NoopControl {
    fn set_busy(&mut self, _busy: bool) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub request: ActionRequest,
    pub success: bool,
    /// Backend message on success, or the user-facing error text.
    pub message: String,
    /// Where a download was written.
    pub saved_to: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    fs: Arc<dyn FileSystem>,
    download_dir: PathBuf,
}

impl RefreshCoordinator {
    pub fn new(fs: Arc<dyn FileSystem>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            download_dir: download_dir.into(),
        }
    }

    pub async fn run<B>(
        &self,
        request: ActionRequest,
        table: &mut ResourceTable,
        backend: &B,
        control: &mut dyn ActionControl,
        notices: &mut NoticeBoard,
    ) -> ActionOutcome
    where
        B: DashboardBackend + ?Sized,
    {
        table.stop_auto_refresh();
        control.set_busy(true);

        let ActionRequest { kind, id, action } = request;
        info!(%kind, id, %action, "action started");

        let outcome = match action {
            ResourceAction::Delete | ResourceAction::Restart => {
                match backend.mutate(kind, id, action).await {
                    Ok(response) => {
                        notices.success(response.message.clone());
                        if let Err(error) = table.refresh(backend, false).await {
                            warn!(%error, "force refresh after action failed");
                        }
                        ActionOutcome {
                            request,
                            success: true,
                            message: response.message,
                            saved_to: None,
                        }
                    }
                    Err(cause) => self.failed(request, notices, &cause),
                }
            }
            ResourceAction::Download => match self.download(request, backend).await {
                Ok(path) => {
                    let message = format!("Saved {}", path.display());
                    notices.success(message.clone());
                    ActionOutcome {
                        request,
                        success: true,
                        message,
                        saved_to: Some(path),
                    }
                }
                Err(cause) => self.failed(request, notices, &cause),
            },
        };

        control.set_busy(false);
        table.start_auto_refresh();

        info!(%kind, id, %action, success = outcome.success, "action finished");
        outcome
    }

    fn failed(
        &self,
        request: ActionRequest,
        notices: &mut NoticeBoard,
        cause: &dyn std::fmt::Display,
    ) -> ActionOutcome {
        let message = request.action.error_text(request.kind);
        error!(
            kind = %request.kind,
            id = request.id,
            action = %request.action,
            error = %cause,
            "action failed"
        );
        notices.danger(message.clone());
        ActionOutcome {
            request,
            success: false,
            message,
            saved_to: None,
        }
    }

    async fn download<B>(&self, request: ActionRequest, backend: &B) -> Result<PathBuf>
    where
        B: DashboardBackend + ?Sized,
    {
        let download = backend.download(request.kind, request.id).await?;
        let file_name = download
            .file_name
            .unwrap_or_else(|| default_download_name(&request));
        let path = self.download_dir.join(file_name);
        self.fs.write(&path, &download.bytes)?;
        Ok(path)
    }
}

/// `task_5_files.zip` / `group_5_files.zip`.
pub fn default_download_name(request: &ActionRequest) -> String {
    format!("{}_{}_files.zip", request.kind.singular(), request.id)
}
