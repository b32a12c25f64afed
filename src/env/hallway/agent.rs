//! Per-agent episode state and reward bookkeeping
//!
//! Agents never reference each other. They belong to an [`AgentPair`] owned
//! by the environment and are addressed from outside through opaque
//! [`AgentHandle`]s that carry the session they were issued for.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, bail};

use super::types::{Pose, Role, Vec2};
use crate::env::EndReason;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No episode has begun yet
    Uninitialized,
    /// Acting in the current episode
    Active,
    /// Episode over, waiting for the next begin
    Ended(EndReason),
}

/// Opaque reference to one agent of a specific pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentHandle {
    role: Role,
    session: u64,
}

impl AgentHandle {
    /// Role of the referenced agent
    pub fn role(&self) -> Role {
        self.role
    }
}

/// State of one agent
#[derive(Debug, Clone)]
pub struct AgentState {
    /// Role, fixed for the lifetime of the pair
    pub role: Role,

    /// Lifecycle phase
    pub phase: EpisodePhase,

    /// Body pose on the ground plane
    pub pose: Pose,

    /// Body velocity (always zero for the Spotter)
    pub velocity: Vec2,

    /// Reward accumulated during the current tick
    pub step_reward: f32,

    /// Reward accumulated during the current episode
    pub cumulative_reward: f32,
}

impl AgentState {
    fn new(role: Role) -> Self {
        Self {
            role,
            phase: EpisodePhase::Uninitialized,
            pose: Pose::default(),
            velocity: Vec2::ZERO,
            step_reward: 0.0,
            cumulative_reward: 0.0,
        }
    }

    /// Start a new episode at `pose`, at rest and with cleared rewards
    pub fn begin_episode(&mut self, pose: Pose) {
        self.phase = EpisodePhase::Active;
        self.pose = pose;
        self.velocity = Vec2::ZERO;
        self.step_reward = 0.0;
        self.cumulative_reward = 0.0;
    }

    /// Whether the agent may act this tick
    pub fn is_active(&self) -> bool {
        self.phase == EpisodePhase::Active
    }

    /// Add to the current step reward
    pub fn add_reward(&mut self, delta: f32) {
        self.step_reward += delta;
        self.cumulative_reward += delta;
    }

    /// Replace the current step reward
    pub fn set_reward(&mut self, value: f32) {
        self.cumulative_reward += value - self.step_reward;
        self.step_reward = value;
    }

    /// Mark the episode as over; returns false if it had already ended
    pub fn end_episode(&mut self, reason: EndReason) -> bool {
        if self.is_active() {
            self.phase = EpisodePhase::Ended(reason);
            true
        } else {
            false
        }
    }

    /// Read and clear the reward for the tick that just finished
    pub fn take_step_reward(&mut self) -> f32 {
        std::mem::take(&mut self.step_reward)
    }
}

/// The Spotter and Seeker of one session
///
/// Cloning copies the agent states under a fresh session id, so handles
/// issued by the original are not accepted by the copy and vice versa.
#[derive(Debug)]
pub struct AgentPair {
    session: u64,
    agents: [AgentState; 2],
}

impl Clone for AgentPair {
    fn clone(&self) -> Self {
        Self {
            session: NEXT_SESSION.fetch_add(1, Ordering::Relaxed),
            agents: self.agents.clone(),
        }
    }
}

impl AgentPair {
    /// Create a bound pair under a fresh session id
    pub fn new() -> Self {
        Self {
            session: NEXT_SESSION.fetch_add(1, Ordering::Relaxed),
            agents: [AgentState::new(Role::Spotter), AgentState::new(Role::Seeker)],
        }
    }

    /// Handle for the agent playing `role`
    pub fn handle(&self, role: Role) -> AgentHandle {
        AgentHandle { role, session: self.session }
    }

    /// Resolve a handle, rejecting handles issued by another pair
    pub fn resolve(&self, handle: AgentHandle) -> Result<Role> {
        if handle.session != self.session {
            bail!(
                "agent handle belongs to session {} but this pair is session {}",
                handle.session,
                self.session
            );
        }
        Ok(handle.role)
    }

    /// Agent playing `role`
    pub fn get(&self, role: Role) -> &AgentState {
        &self.agents[role.index()]
    }

    /// Mutable agent playing `role`
    pub fn get_mut(&mut self, role: Role) -> &mut AgentState {
        &mut self.agents[role.index()]
    }

    /// Both agents, Spotter first
    pub fn iter(&self) -> impl Iterator<Item = &AgentState> {
        self.agents.iter()
    }

    /// Set the same step reward on both agents
    pub fn set_reward_both(&mut self, value: f32) {
        for agent in &mut self.agents {
            agent.set_reward(value);
        }
    }

    /// End both episodes together; returns false if neither was active
    pub fn end_episode_both(&mut self, reason: EndReason) -> bool {
        let mut ended = false;
        for agent in &mut self.agents {
            ended |= agent.end_episode(reason);
        }
        ended
    }

    /// True before the first episode has begun
    pub fn is_uninitialized(&self) -> bool {
        self.agents.iter().any(|a| a.phase == EpisodePhase::Uninitialized)
    }

    /// True once both agents have ended the current episode
    pub fn all_ended(&self) -> bool {
        self.agents.iter().all(|a| matches!(a.phase, EpisodePhase::Ended(_)))
    }

    /// Reason the current episode ended, if it has
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.get(Role::Seeker).phase {
            EpisodePhase::Ended(reason) => Some(reason),
            _ => None,
        }
    }
}

impl Default for AgentPair {
    fn default() -> Self {
        Self::new()
    }
}
