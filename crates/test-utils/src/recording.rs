use std::sync::{Arc, Mutex};

use taskboard::coordinator::ActionControl;
use taskboard::engine::{ActionRequest, DashboardView, Frame};
use taskboard::render::render_frame;

/// Records every `set_busy` transition.
#[derive(Debug, Clone, Default)]
pub struct RecordingControl {
    transitions: Arc<Mutex<Vec<bool>>>,
}

impl RecordingControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<bool> {
        self.transitions.lock().unwrap().clone()
    }
}

impl ActionControl for RecordingControl {
    fn set_busy(&mut self, busy: bool) {
        self.transitions.lock().unwrap().push(busy);
    }
}

/// A view that keeps the text of every frame and hands out recording
/// controls for actions.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    frames: Arc<Mutex<Vec<String>>>,
    control: RecordingControl,
    requests: Arc<Mutex<Vec<ActionRequest>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.frames.lock().unwrap().last().cloned()
    }

    /// Busy transitions of every control handed out so far.
    pub fn control(&self) -> &RecordingControl {
        &self.control
    }

    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DashboardView for RecordingView {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.lock().unwrap().push(render_frame(frame));
    }

    fn action_control(&mut self, request: &ActionRequest) -> Box<dyn ActionControl> {
        self.requests.lock().unwrap().push(*request);
        Box::new(self.control.clone())
    }
}
