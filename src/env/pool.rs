//! Vectorized multi-agent environment pool for parallel execution
//!
//! Many independent copies of a multi-agent environment are stepped in
//! parallel with Rayon, the way a training scene replicates its arena.
//! Each copy keeps its own tick ordering; parallelism is only across copies.
//!
//! # Example
//!
//! ```rust
//! use hallway_collab::env::{hallway::{HallwayCollabEnv, HallwayConfig}, pool::MultiAgentPool};
//!
//! // Create pool with 4 parallel arenas, each with its own seed
//! let mut pool = MultiAgentPool::new(|i| HallwayCollabEnv::new(HallwayConfig::new().seed(i as u64)), 4)?;
//!
//! // Reset all arenas in parallel
//! let observations = pool.reset()?;
//! assert_eq!(observations.len(), 4);
//!
//! // Step all arenas in parallel, one action vector per agent per arena
//! let actions = vec![vec![vec![0, 0], vec![1, 0]]; 4];
//! let step = pool.step(&actions)?;
//! assert_eq!(step.results.len(), 4);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use rayon::prelude::*;

use crate::env::hallway::HallwayCollabEnv;
use crate::env::SpaceInfo;
use crate::multi_agent::{EpisodeStats, MultiAgentEnvironment, MultiAgentResult};

/// A pool of multi-agent environments for parallel execution
pub struct MultiAgentPool<E: MultiAgentEnvironment> {
    /// Vector of environment instances
    envs: Vec<E>,

    /// Number of environments
    num_envs: usize,
}

/// Result of stepping the pool
#[derive(Debug, Clone)]
pub struct PoolStep<O> {
    /// Per-environment step results (terminal observations included)
    pub results: Vec<MultiAgentResult<O>>,

    /// Observations to act on next; fresh episode observations where an
    /// environment finished and was reset
    pub next_observations: Vec<Vec<O>>,
}

impl<E> MultiAgentPool<E>
where
    E: MultiAgentEnvironment + Send,
    E::Observation: Clone + Send,
    E::Action: Sync,
{
    /// Create a new environment pool
    ///
    /// # Arguments
    ///
    /// * `env_fn` - Factory called with the environment index
    /// * `num_envs` - Number of parallel environments
    pub fn new<F>(env_fn: F, num_envs: usize) -> Result<Self>
    where
        F: FnMut(usize) -> Result<E>,
    {
        let envs = (0..num_envs).map(env_fn).collect::<Result<Vec<_>>>()?;
        Ok(Self { envs, num_envs })
    }

    /// Reset all environments in parallel
    ///
    /// Returns the initial observations of every agent of every environment.
    pub fn reset(&mut self) -> Result<Vec<Vec<E::Observation>>> {
        self.envs.par_iter_mut().map(|env| env.reset()).collect()
    }

    /// Step all environments in parallel with given actions
    ///
    /// Environments whose episode finished are reset automatically.
    ///
    /// # Arguments
    ///
    /// * `actions` - One slice of per-agent actions per environment
    ///
    /// # Panics
    ///
    /// Panics if the number of action sets doesn't match the number of
    /// environments.
    pub fn step(&mut self, actions: &[Vec<E::Action>]) -> Result<PoolStep<E::Observation>> {
        assert_eq!(
            actions.len(),
            self.num_envs,
            "Number of action sets must match number of environments"
        );

        let stepped = self
            .envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .map(|(env, env_actions)| -> Result<_> {
                let result = env.step_multi(env_actions)?;
                let next = if result.all_done() {
                    env.reset()?
                } else {
                    result.observations.clone()
                };
                Ok((result, next))
            })
            .collect::<Result<Vec<_>>>()?;

        let (results, next_observations) = stepped.into_iter().unzip();
        Ok(PoolStep { results, next_observations })
    }

    /// Get the number of environments in the pool
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Observation space of one agent, from the first environment
    pub fn observation_space(&self, agent_id: usize) -> Option<SpaceInfo> {
        self.envs.first().map(|env| env.observation_space(agent_id))
    }

    /// Action space of one agent, from the first environment
    pub fn action_space(&self, agent_id: usize) -> Option<SpaceInfo> {
        self.envs.first().map(|env| env.action_space(agent_id))
    }

    /// Reset a specific environment by index
    pub fn reset_env(&mut self, env_id: usize) -> Result<Vec<E::Observation>> {
        match self.envs.get_mut(env_id) {
            Some(env) => env.reset(),
            None => anyhow::bail!("environment {env_id} out of range 0..{}", self.num_envs),
        }
    }

    /// Environments in the pool
    pub fn envs(&self) -> &[E] {
        &self.envs
    }
}

impl MultiAgentPool<HallwayCollabEnv> {
    /// Episode statistics merged over every arena
    pub fn stats(&self) -> EpisodeStats {
        let mut total = EpisodeStats::zeros();
        for env in &self.envs {
            total += env.stats();
        }
        total
    }
}
