//! Scripted policy for both roles
//!
//! Acts on observations alone: the Spotter announces the index of the symbol
//! it sees, the Seeker waits for an announcement and then steers toward the
//! goal tagged with the announced symbol. Useful as a baseline and to check
//! that the task is solvable through the channel.

use super::environment::{Movement, ObservationLayout};
use super::types::{Role, Symbol};

/// Observation-only scripted policy
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPolicy {
    layout: ObservationLayout,
    turn_tolerance_deg: f32,
}

impl HeuristicPolicy {
    /// Create a policy for observations shaped by `layout`
    pub fn new(layout: ObservationLayout) -> Self {
        Self { layout, turn_tolerance_deg: 10.0 }
    }

    /// Heading error (degrees) tolerated before the Seeker turns instead of moving
    pub fn turn_tolerance(mut self, degrees: f32) -> Self {
        self.turn_tolerance_deg = degrees;
        self
    }

    /// Action vector for `role` given its observation
    pub fn act(&self, role: Role, observation: &[f32]) -> Vec<i64> {
        match role {
            Role::Spotter => self.spotter_action(observation),
            Role::Seeker => self.seeker_action(observation),
        }
    }

    /// Action vectors for both agents, Spotter first
    pub fn act_all(&self, observations: &[Vec<f32>]) -> Vec<Vec<i64>> {
        observations
            .iter()
            .enumerate()
            .map(|(i, obs)| self.act(if i == 0 { Role::Spotter } else { Role::Seeker }, obs))
            .collect()
    }

    fn spotter_action(&self, observation: &[f32]) -> Vec<i64> {
        let start = self.layout.payload_start();
        let seen = observation
            .get(start..start + ObservationLayout::SPOTTER_PAYLOAD)
            .and_then(hot_index)
            .unwrap_or(0);
        vec![Movement::Idle.to_action(), seen as i64]
    }

    fn seeker_action(&self, observation: &[f32]) -> Vec<i64> {
        let movement = self
            .received_symbol(observation)
            .map_or(Movement::Idle, |symbol| self.steer(observation, symbol));
        vec![movement.to_action(), 0]
    }

    fn received_symbol(&self, observation: &[f32]) -> Option<Symbol> {
        observation
            .get(self.layout.message())
            .and_then(hot_index)
            .and_then(Symbol::from_index)
    }

    fn steer(&self, observation: &[f32], target: Symbol) -> Movement {
        let start = self.layout.payload_start();
        let Some(payload) = observation.get(start..start + ObservationLayout::SEEKER_PAYLOAD) else {
            return Movement::Idle;
        };

        let (facing_x, facing_z) = (payload[2], payload[3]);
        let goal = 4 + 2 * target.index();
        let (dx, dz) = (payload[goal], payload[goal + 1]);

        let current = facing_x.atan2(facing_z).to_degrees();
        let desired = dx.atan2(dz).to_degrees();
        let error = (desired - current + 540.0).rem_euclid(360.0) - 180.0;

        if error.abs() <= self.turn_tolerance_deg {
            Movement::Forward
        } else if error > 0.0 {
            Movement::RotateRight
        } else {
            Movement::RotateLeft
        }
    }
}

/// Index of the single hot entry, if any
fn hot_index(values: &[f32]) -> Option<usize> {
    values.iter().position(|&v| v > 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ObservationLayout {
        ObservationLayout { has_progress: true, vocab: 3 }
    }

    fn seeker_obs(message: Option<usize>, facing: (f32, f32), o_goal: (f32, f32), x_goal: (f32, f32)) -> Vec<f32> {
        let mut obs = vec![0.0; layout().len(Role::Seeker)];
        if let Some(m) = message {
            obs[1 + m] = 1.0;
        }
        let p = layout().payload_start();
        obs[p + 2] = facing.0;
        obs[p + 3] = facing.1;
        obs[p + 4] = o_goal.0;
        obs[p + 5] = o_goal.1;
        obs[p + 6] = x_goal.0;
        obs[p + 7] = x_goal.1;
        obs
    }

    #[test]
    fn test_spotter_announces_visible_symbol() {
        let policy = HeuristicPolicy::new(layout());
        let mut obs = vec![0.0; layout().len(Role::Spotter)];
        obs[layout().payload_start() + 1] = 1.0;

        assert_eq!(policy.act(Role::Spotter, &obs), vec![0, 1]);
    }

    #[test]
    fn test_seeker_waits_without_message() {
        let policy = HeuristicPolicy::new(layout());
        let obs = seeker_obs(None, (0.0, 1.0), (0.3, 0.9), (-0.3, 0.9));
        assert_eq!(policy.act(Role::Seeker, &obs)[0], Movement::Idle.to_action());
    }

    #[test]
    fn test_seeker_moves_forward_when_aligned() {
        let policy = HeuristicPolicy::new(layout());
        let obs = seeker_obs(Some(0), (0.0, 1.0), (0.0, 0.9), (-0.5, 0.9));
        assert_eq!(policy.act(Role::Seeker, &obs)[0], Movement::Forward.to_action());
    }

    #[test]
    fn test_seeker_turns_toward_announced_goal() {
        let policy = HeuristicPolicy::new(layout());

        // Facing +z, X-goal to the right
        let obs = seeker_obs(Some(1), (0.0, 1.0), (-0.5, 0.5), (0.5, 0.5));
        assert_eq!(policy.act(Role::Seeker, &obs)[0], Movement::RotateRight.to_action());

        // Same layout, O announced: turn left
        let obs = seeker_obs(Some(0), (0.0, 1.0), (-0.5, 0.5), (0.5, 0.5));
        assert_eq!(policy.act(Role::Seeker, &obs)[0], Movement::RotateLeft.to_action());
    }

    #[test]
    fn test_unknown_message_is_ignored() {
        let policy = HeuristicPolicy::new(layout());
        let obs = seeker_obs(Some(2), (0.0, 1.0), (0.0, 0.9), (-0.5, 0.9));
        assert_eq!(policy.act(Role::Seeker, &obs)[0], Movement::Idle.to_action());
    }
}
