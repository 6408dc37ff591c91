// src/upload/session.rs

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::api::{DashboardBackend, UploadFile};
use crate::errors::{DashboardError, Result};
use crate::fs::FileSystem;
use crate::status::RunTasksResponse;

/// Identity of a pending file within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub id: FileId,
    pub path: PathBuf,
    pub name: String,
}

/// Accepts file names by extension (`*.zip`, `*.geojson`, ...).
///
/// Matching is case-sensitive and only looks at the final path component.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
    set: GlobSet,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.');
            if ext.is_empty() {
                continue;
            }
            let glob = Glob::new(&format!("*.{ext}")).map_err(|e| {
                DashboardError::ConfigError(format!("invalid upload extension '{ext}': {e}"))
            })?;
            builder.add(glob);
            kept.push(ext.to_string());
        }

        let set = builder
            .build()
            .map_err(|e| DashboardError::ConfigError(format!("building extension filter: {e}")))?;

        Ok(Self {
            extensions: kept,
            set,
        })
    }

    pub fn allows(&self, file_name: &str) -> bool {
        self.set.is_match(file_name)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Files and label collected for a single `/run_tasks` request.
///
/// No de-duplication by name: the same path added twice is two entries, each
/// with its own [`FileId`].
#[derive(Debug, Clone)]
pub struct UploadSession {
    files: Vec<PendingFile>,
    name: String,
    filter: ExtensionFilter,
    next_id: u64,
}

impl UploadSession {
    pub fn new(filter: ExtensionFilter) -> Self {
        Self {
            files: Vec::new(),
            name: String::new(),
            filter,
            next_id: 0,
        }
    }

    /// Append the candidates whose extension is allowed. Returns the ids of
    /// the files that were kept.
    pub fn add_files<I, P>(&mut self, candidates: I) -> Vec<FileId>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut added = Vec::new();

        for candidate in candidates {
            let path = candidate.as_ref();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !self.filter.allows(name) {
                debug!(file = %name, "rejected by extension filter");
                continue;
            }

            let id = FileId(self.next_id);
            self.next_id += 1;
            self.files.push(PendingFile {
                id,
                path: path.to_path_buf(),
                name: name.to_string(),
            });
            added.push(id);
        }

        added
    }

    pub fn remove_file(&mut self, id: FileId) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.name.clear();
    }

    /// Send every pending file plus the label as one multipart request.
    ///
    /// Fails with [`DashboardError::NoFilesSelected`] before touching the
    /// backend when nothing is pending.
    pub async fn submit<B>(&self, backend: &B, fs: &dyn FileSystem) -> Result<RunTasksResponse>
    where
        B: DashboardBackend + ?Sized,
    {
        if self.files.is_empty() {
            return Err(DashboardError::NoFilesSelected);
        }

        let mut upload = Vec::with_capacity(self.files.len());
        for file in &self.files {
            upload.push(UploadFile {
                file_name: file.name.clone(),
                bytes: fs.read(&file.path)?,
            });
        }

        debug!(files = upload.len(), name = %self.name, "submitting upload session");
        backend.run_tasks(upload, self.name.clone()).await
    }
}
