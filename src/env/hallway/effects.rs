//! Cosmetic ground flash after an episode outcome
//!
//! A one-shot timer counted in ticks. It is scheduled when the arbiter
//! settles a goal contact and only ever read by renderers; it never gates
//! rewards or episode transitions and survives the reset that follows.

use serde::Serialize;

use super::arbiter::Outcome;

/// Ground material to show while a flash is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroundMaterial {
    /// Normal floor
    Default,
    /// Flash after a success
    GoalScored,
    /// Flash after a failure
    Fail,
}

/// Scheduled one-shot material swap
#[derive(Debug, Clone, Default)]
pub struct GroundFlash {
    active: Option<(GroundMaterial, usize)>,
}

impl GroundFlash {
    /// Start a flash for `outcome`, replacing any running one
    pub fn schedule(&mut self, outcome: Outcome, ticks: usize) {
        let material = match outcome {
            Outcome::Success => GroundMaterial::GoalScored,
            Outcome::Failure => GroundMaterial::Fail,
        };
        self.active = (ticks > 0).then_some((material, ticks));
    }

    /// Count down one tick
    pub fn tick(&mut self) {
        if let Some((_, remaining)) = self.active.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                self.active = None;
            }
        }
    }

    /// Material to render right now
    pub fn material(&self) -> GroundMaterial {
        self.active.map_or(GroundMaterial::Default, |(material, _)| material)
    }
}
