use std::time::Duration;
use tokio::time::Instant;

/// Tracks when the current quiet period ends.
///
/// Every `mark` pushes the deadline out by a full window, so a burst of
/// edits produces one deadline after the last of them.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }
    pub fn mark(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
