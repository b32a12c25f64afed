//! Reward and termination rules
//!
//! The [`RewardArbiter`] charges the per-tick cost, judges the Seeker's goal
//! contact against the episode's ground truth and ends both agents' episodes
//! in the same call so neither can act on a stale episode.

use super::agent::{AgentPair, AgentState};
use super::config::HallwayConfig;
use super::coordinator::EpisodeState;
use super::types::{Contact, Role, Symbol};
use crate::env::EndReason;

/// Result of a goal contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Seeker reached the goal tagged with the selected symbol
    Success,
    /// Seeker reached the other goal
    Failure,
}

impl Outcome {
    /// Matching episode end reason
    pub fn end_reason(self) -> EndReason {
        match self {
            Outcome::Success => EndReason::Success,
            Outcome::Failure => EndReason::Failure,
        }
    }
}

/// Applies step and terminal rewards
#[derive(Debug, Clone, PartialEq)]
pub struct RewardArbiter {
    success_reward: f32,
    failure_reward: f32,
    step_penalty: f32,
}

impl RewardArbiter {
    /// Build from the configured reward constants
    pub fn new(config: &HallwayConfig) -> Self {
        Self {
            success_reward: config.rewards.success,
            failure_reward: config.rewards.failure,
            step_penalty: config.step_penalty(),
        }
    }

    /// Per-tick cost (`-1 / max_steps`, or zero when disabled)
    pub fn step_penalty(&self) -> f32 {
        self.step_penalty
    }

    /// Charge the per-tick cost to the agent that is acting
    pub fn charge_step(&self, agent: &mut AgentState) {
        agent.add_reward(self.step_penalty);
    }

    /// Compare the touched goal with the ground truth
    pub fn judge(&self, state: &EpisodeState, goal: Symbol) -> Outcome {
        if goal == state.selection() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Terminal reward for an outcome
    pub fn reward_for(&self, outcome: Outcome) -> f32 {
        match outcome {
            Outcome::Success => self.success_reward,
            Outcome::Failure => self.failure_reward,
        }
    }

    /// Settle a Seeker goal contact for both agents
    ///
    /// Returns `None` when the episode was already over.
    pub fn on_seeker_reached_goal(
        &self,
        pair: &mut AgentPair,
        state: &EpisodeState,
        goal: Symbol,
    ) -> Option<Outcome> {
        if !pair.get(Role::Seeker).is_active() {
            return None;
        }

        let outcome = self.judge(state, goal);
        pair.set_reward_both(self.reward_for(outcome));
        pair.end_episode_both(outcome.end_reason());

        tracing::info!(
            episode = state.episode(),
            ?outcome,
            ?goal,
            selection = ?state.selection(),
            "seeker reached goal"
        );
        Some(outcome)
    }

    /// Route a contact reported for `role`; only Seeker goal contacts count
    pub fn on_contact(
        &self,
        pair: &mut AgentPair,
        state: &EpisodeState,
        role: Role,
        contact: Contact,
    ) -> Option<Outcome> {
        match (role, contact) {
            (Role::Seeker, Contact::Goal(symbol)) => self.on_seeker_reached_goal(pair, state, symbol),
            _ => None,
        }
    }

    /// End both episodes on step-budget exhaustion, without a terminal reward
    pub fn on_truncation(&self, pair: &mut AgentPair, state: &EpisodeState) -> bool {
        let ended = pair.end_episode_both(EndReason::Truncated);
        if ended {
            tracing::info!(episode = state.episode(), "episode truncated");
        }
        ended
    }
}
