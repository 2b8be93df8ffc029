//! Single-slot pointer mailbox.
//!
//! Input events overwrite the slot; the stepper takes whatever is there once
//! per frame. Moves between two frames add up into one net delta, so a burst
//! of events becomes one impulse.

use glam::Vec2;

/// A drag the stepper should turn into a splat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Normalized position, origin bottom-left.
    pub position: Vec2,
    /// Aspect-corrected movement since the last frame.
    pub delta: Vec2,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerMailbox {
    position: Vec2,
    delta: Vec2,
    down: bool,
    moved: bool,
}

impl PointerMailbox {
    pub fn press(&mut self, uv: Vec2) {
        self.position = uv;
        self.delta = Vec2::ZERO;
        self.down = true;
        self.moved = false;
    }

    /// Record a move to `uv`. Ignored while the pointer is up.
    pub fn move_to(&mut self, uv: Vec2, aspect: f32) {
        if !self.down {
            return;
        }
        let mut step = uv - self.position;
        if aspect < 1.0 {
            step.x *= aspect;
        }
        if aspect > 1.0 {
            step.y /= aspect;
        }
        self.position = uv;
        self.delta += step;
        self.moved = self.delta != Vec2::ZERO;
    }

    pub fn release(&mut self) {
        self.down = false;
        self.moved = false;
        self.delta = Vec2::ZERO;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Consume the pending move. Returns it only if it is faster than
    /// `min_speed` (normalized units per frame).
    pub fn take(&mut self, min_speed: f32) -> Option<PointerSample> {
        if !self.moved {
            return None;
        }
        self.moved = false;
        let delta = std::mem::take(&mut self.delta);
        (delta.length() > min_speed).then_some(PointerSample { position: self.position, delta })
    }
}
