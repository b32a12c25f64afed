//! Multi-agent environment trait
//!
//! Interface for environments where several agents act in the same game
//! instance and are stepped together, one action per agent per tick.

use anyhow::Result;

use crate::env::{SpaceInfo, StepInfo};

/// Multi-agent environment trait
///
/// Environments implementing this trait step all agents inside one logical
/// tick, so shared state is never observed half-updated.
pub trait MultiAgentEnvironment {
    /// Observation type
    type Observation;

    /// Action type
    type Action;

    /// Number of agents in this environment
    fn num_agents(&self) -> usize;

    /// Begin a new episode and return the first observation of every agent
    fn reset(&mut self) -> Result<Vec<Self::Observation>>;

    /// Get observation for a specific agent
    ///
    /// # Arguments
    ///
    /// * `agent_id` - Index of the agent (0 to num_agents - 1)
    fn get_observation(&self, agent_id: usize) -> Result<Self::Observation>;

    /// Step the environment with multiple actions (one per agent)
    ///
    /// # Arguments
    ///
    /// * `actions` - Slice of actions, one for each agent
    ///
    /// # Returns
    ///
    /// Multi-agent result containing observations, rewards, and termination
    /// flags for each agent.
    fn step_multi(&mut self, actions: &[Self::Action]) -> Result<MultiAgentResult<Self::Observation>>;

    /// Observation space of one agent
    fn observation_space(&self, agent_id: usize) -> SpaceInfo;

    /// Action space of one agent
    fn action_space(&self, agent_id: usize) -> SpaceInfo;

    /// Get which agents are currently active (not terminated)
    fn active_agents(&self) -> Vec<bool>;
}

/// Result of a multi-agent environment step
///
/// Contains per-agent observations, rewards, and termination flags.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiAgentResult<O> {
    /// Observations for each agent
    pub observations: Vec<O>,

    /// Rewards for each agent
    pub rewards: Vec<f32>,

    /// Terminal states for each agent
    pub terminated: Vec<bool>,

    /// Truncation flags for each agent
    pub truncated: Vec<bool>,

    /// Additional information (shared across all agents)
    pub info: StepInfo,
}

impl<O> MultiAgentResult<O> {
    /// Create a new multi-agent result
    pub fn new(
        observations: Vec<O>,
        rewards: Vec<f32>,
        terminated: Vec<bool>,
        truncated: Vec<bool>,
    ) -> Self {
        Self { observations, rewards, terminated, truncated, info: StepInfo::default() }
    }

    /// Attach step info
    pub fn with_info(mut self, info: StepInfo) -> Self {
        self.info = info;
        self
    }

    /// Check if all agents are done (either terminated or truncated)
    pub fn all_done(&self) -> bool {
        self.terminated
            .iter()
            .zip(&self.truncated)
            .all(|(term, trunc)| *term || *trunc)
    }

    /// Check if any agent is done
    pub fn any_done(&self) -> bool {
        self.terminated
            .iter()
            .zip(&self.truncated)
            .any(|(term, trunc)| *term || *trunc)
    }
}
