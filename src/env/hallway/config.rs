//! Hallway configuration
//!
//! Arena geometry, reward constants and communication settings. Defaults
//! follow the collaborative hallway scene; every value can be overridden from
//! JSON or with the builder-style setters, and [`HallwayConfig::validate`]
//! rejects inconsistent setups before an environment is built.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::types::{Pose, Rect, Symbol, Vec2};

/// How the Spotter fills its outgoing message slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommPolicy {
    /// Forward the message branch of the action verbatim
    #[default]
    Learned,
    /// Spotter sends the index of the true selection, ignoring its action
    Oracle,
}

/// Communication settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommConfig {
    /// Spotter message policy
    pub policy: CommPolicy,

    /// Number of distinct message values (size of the message action branch)
    pub message_vocab: usize,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self { policy: CommPolicy::Learned, message_vocab: 3 }
    }
}

/// Reward constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Terminal reward for both agents when the Seeker reaches the matching goal
    pub success: f32,

    /// Terminal reward for both agents when the Seeker reaches the other goal
    pub failure: f32,

    /// Charge `-1 / max_steps` to the acting agent every tick
    pub step_penalty: bool,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self { success: 1.0, failure: -0.1, step_penalty: true }
    }
}

/// Arena geometry and Seeker kinematics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Region the Seeker can move in
    pub playable: Rect,

    /// Region the Seeker spawns in (uniform position, uniform heading)
    pub seeker_spawn: Rect,

    /// Fixed Spotter pose
    pub spotter_pose: Pose,

    /// Where the visible symbol marker is placed
    pub symbol_slot: Vec2,

    /// Lateral distance of each goal from the hallway axis
    pub goal_lateral_offset: f32,

    /// Position of both goals along the hallway
    pub goal_z: f32,

    /// Half extents of each goal region
    pub goal_half_extents: Vec2,

    /// Seeker collision radius
    pub agent_radius: f32,

    /// Velocity change per forward/backward action
    pub run_speed: f32,

    /// Fraction of velocity kept from one tick to the next
    pub velocity_damping: f32,

    /// Rotation per turn action, in degrees
    pub turn_degrees: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            playable: Rect::new(Vec2::ZERO, Vec2::new(10.0, 25.0)),
            seeker_spawn: Rect::new(Vec2::new(0.0, -7.0), Vec2::new(3.0, 5.0)),
            spotter_pose: Pose::new(Vec2::new(0.0, -18.0), 0.0),
            symbol_slot: Vec2::new(0.0, -22.0),
            goal_lateral_offset: 7.0,
            goal_z: 22.0,
            goal_half_extents: Vec2::new(2.5, 1.5),
            agent_radius: 0.5,
            run_speed: 0.5,
            velocity_damping: 0.5,
            turn_degrees: 6.0,
        }
    }
}

impl ArenaConfig {
    /// Goal region for `symbol` when it sits on lateral side `side` (+1 / -1)
    pub fn goal_rect(&self, side: f32) -> Rect {
        Rect::new(Vec2::new(side * self.goal_lateral_offset, self.goal_z), self.goal_half_extents)
    }

    /// Common scale used to normalise positions in observations
    pub fn observation_scale(&self) -> f32 {
        self.playable.half_extents.x.max(self.playable.half_extents.z)
    }
}

/// Full hallway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HallwayConfig {
    /// Step budget per episode; also scales the per-tick cost
    pub max_steps: usize,

    /// Seed for episode randomisation (`None` draws from entropy)
    pub seed: Option<u64>,

    /// Include `steps / max_steps` as the first observation
    pub observe_step_progress: bool,

    /// Ticks the ground flash stays active after an episode outcome
    pub flash_ticks: usize,

    /// Arena geometry
    pub arena: ArenaConfig,

    /// Reward constants
    pub rewards: RewardConfig,

    /// Communication settings
    pub comm: CommConfig,
}

impl Default for HallwayConfig {
    fn default() -> Self {
        Self {
            max_steps: 3000,
            seed: None,
            observe_step_progress: true,
            flash_ticks: 25,
            arena: ArenaConfig::default(),
            rewards: RewardConfig::default(),
            comm: CommConfig::default(),
        }
    }
}

impl HallwayConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid hallway config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Per-tick cost charged to the acting agent (zero when disabled)
    pub fn step_penalty(&self) -> f32 {
        if self.rewards.step_penalty {
            -1.0 / self.max_steps as f32
        } else {
            0.0
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(anyhow!("max_steps must be positive"));
        }
        if self.comm.message_vocab == 0 {
            return Err(anyhow!("message_vocab must be positive"));
        }

        let arena = &self.arena;
        let rect = |r: &Rect| [r.center.x, r.center.z, r.half_extents.x, r.half_extents.z];
        let finite = [
            ("playable", rect(&arena.playable)),
            ("seeker_spawn", rect(&arena.seeker_spawn)),
            ("spotter_pose", [arena.spotter_pose.position.x, arena.spotter_pose.position.z, arena.spotter_pose.heading_deg, 0.0]),
            ("symbol_slot", [arena.symbol_slot.x, arena.symbol_slot.z, 0.0, 0.0]),
            ("goal", [arena.goal_lateral_offset, arena.goal_z, arena.goal_half_extents.x, arena.goal_half_extents.z]),
            ("motion", [arena.agent_radius, arena.run_speed, arena.velocity_damping, arena.turn_degrees]),
            ("rewards", [self.rewards.success, self.rewards.failure, 0.0, 0.0]),
        ];
        for (name, values) in finite {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(anyhow!("{name} values must be finite"));
            }
        }

        for (name, rect) in [
            ("playable", &arena.playable),
            ("seeker_spawn", &arena.seeker_spawn),
        ] {
            if rect.half_extents.x < 0.0 || rect.half_extents.z < 0.0 {
                return Err(anyhow!("{name} half extents must be non-negative"));
            }
        }
        if arena.playable.half_extents.x == 0.0 || arena.playable.half_extents.z == 0.0 {
            return Err(anyhow!("playable region must have a positive area"));
        }
        if arena.goal_half_extents.x <= 0.0 || arena.goal_half_extents.z <= 0.0 {
            return Err(anyhow!("goal_half_extents must be positive"));
        }
        if !arena.playable.contains(arena.seeker_spawn.min())
            || !arena.playable.contains(arena.seeker_spawn.max())
        {
            return Err(anyhow!("seeker_spawn must lie inside the playable region"));
        }
        if !arena.playable.contains(arena.spotter_pose.position) {
            return Err(anyhow!("spotter_pose must lie inside the playable region"));
        }
        if !arena.playable.contains(arena.symbol_slot) {
            return Err(anyhow!("symbol_slot must lie inside the playable region"));
        }
        if arena.goal_lateral_offset <= arena.goal_half_extents.x {
            return Err(anyhow!("goal_lateral_offset must exceed the goal half width so goals do not overlap"));
        }
        for symbol in Symbol::ALL {
            let side = if symbol == Symbol::O { 1.0 } else { -1.0 };
            let goal = arena.goal_rect(side);
            if !arena.playable.contains(goal.center) {
                return Err(anyhow!("goal regions must lie inside the playable region"));
            }
            if rects_overlap(&goal, &arena.seeker_spawn, arena.agent_radius) {
                return Err(anyhow!("goal regions must not overlap the seeker spawn region"));
            }
        }
        if arena.agent_radius < 0.0 {
            return Err(anyhow!("agent_radius must be non-negative"));
        }
        if arena.run_speed <= 0.0 {
            return Err(anyhow!("run_speed must be positive"));
        }
        if !(0.0..1.0).contains(&arena.velocity_damping) {
            return Err(anyhow!("velocity_damping must be in [0, 1)"));
        }
        if arena.turn_degrees <= 0.0 {
            return Err(anyhow!("turn_degrees must be positive"));
        }
        Ok(())
    }

    /// Set step budget
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set RNG seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set Spotter message policy
    pub fn comm_policy(mut self, policy: CommPolicy) -> Self {
        self.comm.policy = policy;
        self
    }

    /// Set message vocabulary size
    pub fn message_vocab(mut self, vocab: usize) -> Self {
        self.comm.message_vocab = vocab;
        self
    }

    /// Toggle the step progress observation
    pub fn observe_step_progress(mut self, enabled: bool) -> Self {
        self.observe_step_progress = enabled;
        self
    }

    /// Toggle the per-tick cost
    pub fn step_penalty_enabled(mut self, enabled: bool) -> Self {
        self.rewards.step_penalty = enabled;
        self
    }
}

/// Overlap test between two rectangles, `a` inflated by `margin`
fn rects_overlap(a: &Rect, b: &Rect, margin: f32) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x - margin <= b_max.x
        && a_max.x + margin >= b_min.x
        && a_min.z - margin <= b_max.z
        && a_max.z + margin >= b_min.z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite_values() {
        let mut config = HallwayConfig::new();
        config.arena.goal_half_extents.x = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = HallwayConfig::new();
        config.arena.run_speed = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = HallwayConfig::new();
        config.arena.turn_degrees = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = HallwayConfig::new();
        config.arena.agent_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = HallwayConfig::new();
        config.rewards.success = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = HallwayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_steps, 3000);
        assert_eq!(config.comm.policy, CommPolicy::Learned);
    }

    #[test]
    fn test_step_penalty() {
        let config = HallwayConfig::new().max_steps(500);
        assert!((config.step_penalty() + 0.002).abs() < 1e-9);

        let config = config.step_penalty_enabled(false);
        assert_eq!(config.step_penalty(), 0.0);
    }

    #[test]
    fn test_rejects_zero_max_steps() {
        let config = HallwayConfig::new().max_steps(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_vocab() {
        let config = HallwayConfig::new().message_vocab(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_goal_over_spawn() {
        let mut config = HallwayConfig::new();
        config.arena.goal_z = -7.0;
        config.arena.goal_lateral_offset = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overlapping_goals() {
        let mut config = HallwayConfig::new();
        config.arena.goal_lateral_offset = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = HallwayConfig::from_json_str(
            r#"{ "max_steps": 200, "seed": 7, "comm": { "policy": "oracle" } }"#,
        )
        .unwrap();

        assert_eq!(config.max_steps, 200);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.comm.policy, CommPolicy::Oracle);
        assert_eq!(config.comm.message_vocab, 3);
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        assert!(HallwayConfig::from_json_str(r#"{ "max_steps": 0 }"#).is_err());
        assert!(HallwayConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let config = HallwayConfig::new().max_steps(123).seed(99);
        let path = std::env::temp_dir().join(format!("hallway_config_{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = HallwayConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
