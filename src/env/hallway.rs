//! Collaborative hallway
//!
//! A two-agent game with asymmetric information:
//! - The Spotter stands still and sees which of two symbols (O or X) is shown
//! - The Seeker moves but cannot see the symbol
//! - Two goals, tagged O and X, sit at the far end on randomly swapped sides
//! - The only link between the agents is a one-integer message per tick
//! - Rewards: +1 to both if the Seeker reaches the goal matching the shown
//!   symbol, -0.1 to both otherwise, and a `-1 / max_steps` cost per tick

// Re-export main components
pub use agent::{AgentHandle, AgentPair, AgentState, EpisodePhase};
pub use arbiter::{Outcome, RewardArbiter};
pub use channel::{MessageChannel, NO_MESSAGE, PairChannels, encode_one_hot};
pub use config::{ArenaConfig, CommConfig, CommPolicy, HallwayConfig, RewardConfig};
pub use coordinator::{EpisodeCoordinator, EpisodeState, GoalRegion, SymbolMarker};
pub use effects::{GroundFlash, GroundMaterial};
pub use environment::{HallwayCollabEnv, HallwaySnapshot, MOVE_ACTIONS, Movement, ObservationLayout, TickReport};
pub use heuristic::HeuristicPolicy;
pub use types::{Contact, GoalLayout, Pose, Rect, Role, Symbol, Vec2};

// Submodules
pub mod agent;
pub mod arbiter;
pub mod channel;
pub mod config;
pub mod coordinator;
pub mod effects;
pub mod environment;
pub mod heuristic;
pub mod types;

use anyhow::Result;

/// Create a hallway environment with the default arena and the given step budget
pub fn make_hallway_env(max_steps: usize, seed: Option<u64>) -> Result<HallwayCollabEnv> {
    let mut config = HallwayConfig::new().max_steps(max_steps);
    config.seed = seed;
    HallwayCollabEnv::new(config)
}
