//! Deferred focus after a mode switch.
//!
//! The widget finishes re-rendering after the toggle call returns, so focus
//! is applied a little later from `tick`. There is one pending slot: each
//! schedule replaces it and bumps the generation, so a task scheduled
//! before a newer transition is gone before it can fire.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The editable text surface.
    Editor,
    /// The rendered preview surface.
    Preview,
}

#[derive(Debug, Clone, Copy)]
struct PendingFocus {
    generation: u64,
    target: FocusTarget,
    due: Instant,
}

#[derive(Debug, Default)]
pub struct FocusScheduler {
    generation: u64,
    pending: Option<PendingFocus>,
}

impl FocusScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules focus on `target` at `due`, superseding any pending task.
    /// Returns the generation of the new task.
    pub fn schedule(&mut self, target: FocusTarget, due: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some(PendingFocus {
            generation: self.generation,
            target,
            due,
        });
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_target(&self) -> Option<FocusTarget> {
        self.pending.map(|p| p.target)
    }

    /// Generation of the task still waiting to fire, if any.
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.map(|p| p.generation)
    }

    /// Takes the pending task if it is due.
    pub fn poll(&mut self, now: Instant) -> Option<FocusTarget> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        Some(pending.target)
    }
}
