// src/engine/event_handlers.rs

//! Event handling logic for the core dashboard.

use tracing::debug;

use crate::engine::{ActionRequest, PageMove, TimerTarget, UploadCommand, UserCommand};
use crate::notice::NoticeLevel;
use crate::types::ResourceKind;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Re-fetch the table. `tick` is the generation of the timer that asked
    /// for it, `None` for an explicit refresh.
    RefreshTable {
        reset_pagination: bool,
        tick: Option<u64>,
    },
    /// Fetch statistics for the tick of the given generation.
    PollStatistics { tick: u64 },
    SwitchTable(ResourceKind),
    RunAction(ActionRequest),
    Paginate(PageMove),
    Upload(UploadCommand),
    ToggleTheme,
    DismissNotice,
    ShowHelp,
    Notify(NoticeLevel, String),
    RequestExit,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn run(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    pub fn idle() -> Self {
        Self::run(Vec::new())
    }

    pub fn exit() -> Self {
        Self {
            commands: vec![CoreCommand::RequestExit],
            keep_running: false,
        }
    }
}

/// Handle a timer tick.
///
/// Table ticks are dropped while an action is in flight: the action owns the
/// table until it completes and refreshes it itself.
pub fn handle_tick(
    target: TimerTarget,
    generation: u64,
    action_in_flight: Option<&ActionRequest>,
) -> CoreStep {
    match target {
        TimerTarget::Table => {
            if let Some(request) = action_in_flight {
                debug!(generation, ?request, "table tick ignored while action in flight");
                return CoreStep::idle();
            }
            CoreStep::run(vec![CoreCommand::RefreshTable {
                reset_pagination: false,
                tick: Some(generation),
            }])
        }
        TimerTarget::Statistics => {
            CoreStep::run(vec![CoreCommand::PollStatistics { tick: generation }])
        }
    }
}

/// Handle an operator command.
pub fn handle_user_command(
    command: UserCommand,
    kind: &mut ResourceKind,
    action_in_flight: &mut Option<ActionRequest>,
) -> CoreStep {
    match command {
        UserCommand::Switch(target) => {
            let target = target.unwrap_or_else(|| kind.toggled());
            if target == *kind {
                debug!(%target, "already showing requested kind");
                return CoreStep::idle();
            }
            *kind = target;
            CoreStep::run(vec![CoreCommand::SwitchTable(target)])
        }
        UserCommand::Action { id, action } => {
            if let Some(running) = action_in_flight {
                return CoreStep::run(vec![CoreCommand::Notify(
                    NoticeLevel::Warning,
                    format!(
                        "Still running {} on {} {}",
                        running.action,
                        running.kind.singular(),
                        running.id
                    ),
                )]);
            }
            let request = ActionRequest {
                kind: *kind,
                id,
                action,
            };
            *action_in_flight = Some(request);
            CoreStep::run(vec![CoreCommand::RunAction(request)])
        }
        UserCommand::Page(direction) => CoreStep::run(vec![CoreCommand::Paginate(direction)]),
        UserCommand::Refresh => CoreStep::run(vec![CoreCommand::RefreshTable {
            reset_pagination: false,
            tick: None,
        }]),
        UserCommand::Upload(upload) => CoreStep::run(vec![CoreCommand::Upload(upload)]),
        UserCommand::ToggleTheme => CoreStep::run(vec![CoreCommand::ToggleTheme]),
        UserCommand::Dismiss => CoreStep::run(vec![CoreCommand::DismissNotice]),
        UserCommand::Help => CoreStep::run(vec![CoreCommand::ShowHelp]),
        UserCommand::Quit => CoreStep::exit(),
    }
}

/// Handle completion of a coordinated action.
pub fn handle_action_finished(
    request: ActionRequest,
    success: bool,
    action_in_flight: &mut Option<ActionRequest>,
) -> CoreStep {
    if action_in_flight.as_ref() == Some(&request) {
        *action_in_flight = None;
    } else {
        debug!(?request, "completion for an action that is not in flight");
    }
    debug!(?request, success, "action finished");
    CoreStep::idle()
}
