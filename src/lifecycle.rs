//! Stop signal for the animation-frame loop.

use std::cell::Cell;
use std::rc::Rc;

/// Shared between the view handle and the frame callback. The callback
/// checks [`LoopControl::is_running`] before scheduling the next frame.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    stopped: Rc<Cell<bool>>,
    frames: Rc<Cell<u64>>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// Count a rendered frame. Returns whether another should be scheduled.
    pub fn tick(&self) -> bool {
        if self.stopped.get() {
            return false;
        }
        self.frames.set(self.frames.get() + 1);
        true
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}
