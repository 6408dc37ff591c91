// src/engine/core.rs

//! Pure core dashboard state machine.
//!
//! Consumes [`DashboardEvent`]s and produces the commands the IO shell
//! (`engine::runtime::Runtime`) should carry out. It has no channels, no
//! Tokio types and performs no IO, so it can be tested directly.

use crate::engine::event_handlers::{
    handle_action_finished, handle_tick, handle_user_command, CoreCommand, CoreStep,
};
use crate::engine::{ActionRequest, DashboardEvent};
use crate::types::ResourceKind;

#[derive(Debug, Clone)]
pub struct CoreDashboard {
    kind: ResourceKind,
    action_in_flight: Option<ActionRequest>,
}

impl CoreDashboard {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            action_in_flight: None,
        }
    }

    /// Kind of resource currently shown.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn action_in_flight(&self) -> Option<&ActionRequest> {
        self.action_in_flight.as_ref()
    }

    /// Handle a single event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: DashboardEvent) -> CoreStep {
        match event {
            DashboardEvent::Tick { target, generation } => {
                handle_tick(target, generation, self.action_in_flight.as_ref())
            }
            DashboardEvent::Input(command) => {
                handle_user_command(command, &mut self.kind, &mut self.action_in_flight)
            }
            DashboardEvent::ActionFinished { request, success } => {
                handle_action_finished(request, success, &mut self.action_in_flight)
            }
            DashboardEvent::Notify(level, message) => {
                CoreStep::run(vec![CoreCommand::Notify(level, message)])
            }
            DashboardEvent::ShutdownRequested => CoreStep::exit(),
        }
    }
}
