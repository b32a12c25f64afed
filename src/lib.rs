//! # Hallway Collab
//!
//! Two-agent collaborative hallway with asymmetric information
//!
//! A stationary Spotter sees which symbol is shown; a mobile Seeker must
//! reach the goal tagged with that symbol. The two can only cooperate through
//! a one-slot message channel with one tick of latency, and they share a
//! single outcome reward.
//!
//! ## Quick Start
//!
//! ```rust
//! use hallway_collab::prelude::*;
//!
//! let mut env = HallwayCollabEnv::new(HallwayConfig::new().seed(42).max_steps(300))?;
//! let policy = HeuristicPolicy::new(env.layout());
//!
//! let mut observations = env.reset()?;
//! loop {
//!     let result = env.step_multi(&policy.act_all(&observations))?;
//!     if result.all_done() {
//!         assert_eq!(result.info.end_reason, Some(EndReason::Success));
//!         break;
//!     }
//!     observations = result.observations;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Environment types and the hallway game
pub mod env;

/// Multi-agent environment interface and episode statistics
pub mod multi_agent;

/// Prelude module for convenient imports
///
/// This module re-exports commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::env::hallway::{
        AgentHandle, CommPolicy, Contact, GoalLayout, HallwayCollabEnv, HallwayConfig, HeuristicPolicy, Movement,
        Role, Symbol,
    };
    pub use crate::env::pool::MultiAgentPool;
    pub use crate::env::{EndReason, SpaceInfo, StepInfo};
    pub use crate::multi_agent::{EpisodeStats, MultiAgentEnvironment, MultiAgentResult};
}

/// Current version of hallway-collab
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
