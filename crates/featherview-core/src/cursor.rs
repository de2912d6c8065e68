//! Pointer cursor resource and the idle timer that hides it.

use std::time::{Duration, Instant};

use tracing::debug;

/// What the toolkit should show for the pointer this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorShape {
    #[default]
    Default,
    Move,
    Hidden,
}

/// The process-wide pointer cursor, owned by one view.
///
/// Overrides stack like a toolkit override cursor; hiding wins over any
/// override. `release` returns everything to the default so a torn-down
/// view never leaves the pointer hidden.
#[derive(Debug, Default)]
pub struct PointerCursor {
    hidden: bool,
    overrides: Vec<CursorShape>,
}

impl PointerCursor {
    pub fn hide(&mut self) {
        if !self.hidden {
            debug!("hiding idle pointer");
        }
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn push_override(&mut self, shape: CursorShape) {
        self.overrides.push(shape);
    }

    pub fn pop_override(&mut self) {
        self.overrides.pop();
    }

    pub fn has_override(&self) -> bool {
        !self.overrides.is_empty()
    }

    pub fn release(&mut self) {
        self.hidden = false;
        self.overrides.clear();
    }

    pub fn shape(&self) -> CursorShape {
        if self.hidden {
            return CursorShape::Hidden;
        }
        self.overrides.last().copied().unwrap_or_default()
    }
}

/// One-shot timer driven by the caller's clock.
#[derive(Debug)]
pub struct IdleTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Stop and start again from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True exactly once when the deadline has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
