//! Multi-agent environment infrastructure
//!
//! This module provides the interface shared by environments in which
//! several agents are stepped together inside one logical tick, plus
//! episode statistics for rollouts over such environments.
//!
//! # Example
//!
//! ```rust
//! use hallway_collab::env::hallway::{HallwayCollabEnv, HallwayConfig};
//! use hallway_collab::multi_agent::MultiAgentEnvironment;
//!
//! let mut env = HallwayCollabEnv::new(HallwayConfig::new().seed(7))?;
//! let observations = env.reset()?;
//! assert_eq!(observations.len(), env.num_agents());
//!
//! let result = env.step_multi(&[vec![0, 1], vec![1, 0]])?;
//! assert_eq!(result.rewards.len(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod environment;
pub mod stats;

pub use environment::{MultiAgentEnvironment, MultiAgentResult};
pub use stats::{EpisodeRecord, EpisodeStats};
