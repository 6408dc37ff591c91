// src/engine/mod.rs

//! Event loop for the interactive dashboard.
//!
//! Timer ticks, user commands and shutdown signals are all turned into
//! [`DashboardEvent`]s on a single channel. The pure core state machine
//! lives in [`core`] and decides what should happen; the async/IO shell in
//! [`runtime`] owns the components and carries the decisions out, one event
//! at a time.

use std::path::PathBuf;

use crate::notice::NoticeLevel;
use crate::types::{ResourceAction, ResourceId, ResourceKind};

/// Which periodic poller a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTarget {
    Table,
    Statistics,
}

/// A user-triggered action against one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ResourceKind,
    pub id: ResourceId,
    pub action: ResourceAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Next,
    Prev,
}

/// Commands addressed to the upload dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadCommand {
    Open,
    Add(Vec<PathBuf>),
    /// 1-based position in the pending list.
    Remove(usize),
    Name(String),
    Submit,
    Cancel,
}

/// Everything an operator can ask for from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Switch to the given kind, or to the other one when `None`.
    Switch(Option<ResourceKind>),
    Action {
        id: ResourceId,
        action: ResourceAction,
    },
    Page(PageMove),
    Refresh,
    Upload(UploadCommand),
    ToggleTheme,
    Dismiss,
    Help,
    Quit,
}

/// Events flowing into the runtime from timers, stdin and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// A periodic timer fired. `generation` identifies the timer instance.
    Tick {
        target: TimerTarget,
        generation: u64,
    },
    /// The operator issued a command.
    Input(UserCommand),
    /// A coordinated action completed (fed back by the runtime itself).
    ActionFinished {
        request: ActionRequest,
        success: bool,
    },
    /// Something worth telling the operator that is not a command, such as
    /// an unparseable input line.
    Notify(NoticeLevel, String),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Render a single frame after the first load, then exit.
    pub exit_after_first_frame: bool,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;
pub mod timer;

pub use core::CoreDashboard;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::{Dashboard, DashboardView, Frame, Runtime};
pub use timer::{RefreshTimer, TimerActivity};
