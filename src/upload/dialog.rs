// src/upload/dialog.rs

use tracing::{error, warn};

use crate::api::DashboardBackend;
use crate::errors::DashboardError;
use crate::fs::FileSystem;
use crate::notice::NoticeBoard;
use crate::status::RunTasksResponse;
use crate::table::ResourceTable;
use crate::upload::session::{ExtensionFilter, UploadSession};

/// Hosts an [`UploadSession`] for as long as the dialog is open.
#[derive(Debug, Clone)]
pub struct UploadDialog {
    session: UploadSession,
    open: bool,
}

impl UploadDialog {
    pub fn new(filter: ExtensionFilter) -> Self {
        Self {
            session: UploadSession::new(filter),
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.session.clear();
        self.open = true;
    }

    /// Close and forget everything pending, whatever happened before.
    pub fn dismiss(&mut self) {
        self.session.clear();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut UploadSession {
        &mut self.session
    }

    /// Submit the session and report the result as notices.
    ///
    /// - nothing selected: warning, dialog stays open, no request;
    /// - transport error: danger notice, dialog stays open;
    /// - any response: warning listing backend errors or a success notice,
    ///   then the dialog closes and the table is force-refreshed once.
    pub async fn confirm<B>(
        &mut self,
        backend: &B,
        fs: &dyn FileSystem,
        table: &mut ResourceTable,
        notices: &mut NoticeBoard,
    ) -> Option<RunTasksResponse>
    where
        B: DashboardBackend + ?Sized,
    {
        let response = match self.session.submit(backend, fs).await {
            Ok(response) => response,
            Err(DashboardError::NoFilesSelected) => {
                notices.warning("No files selected!");
                return None;
            }
            Err(cause) => {
                error!(error = %cause, "upload failed");
                notices.danger("Error uploading files!");
                return None;
            }
        };

        if response.errors.is_empty() {
            notices.success(response.message.clone());
        } else {
            warn!(errors = ?response.errors, "backend reported upload errors");
            notices.warning(response.errors.join("\n"));
        }

        self.dismiss();

        if let Err(error) = table.refresh(backend, false).await {
            warn!(%error, "force refresh after upload failed");
        }

        Some(response)
    }
}
