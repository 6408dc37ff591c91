// src/upload/mod.rs

//! File upload: the pending set with its extension filter ([`session`]) and
//! the dialog that hosts it and reports outcomes ([`dialog`]).

pub mod dialog;
pub mod session;

pub use dialog::UploadDialog;
pub use session::{ExtensionFilter, FileId, PendingFile, UploadSession};
