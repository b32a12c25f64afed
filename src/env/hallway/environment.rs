//! Collaborative hallway environment
//!
//! Ties the pair, the channels, the coordinator and the arbiter together and
//! drives them one tick at a time. A tick is:
//!
//! 1. observation collection for each agent ([`HallwayCollabEnv::collect_observations`])
//! 2. action application for each agent ([`HallwayCollabEnv::on_action_received`])
//! 3. the tick boundary ([`HallwayCollabEnv::end_tick`]): message delivery,
//!    truncation, reward hand-off and episode-end reporting
//!
//! [`MultiAgentEnvironment::step_multi`] runs phases 2 and 3 for both agents
//! and returns the observations of the following tick.

use anyhow::{Result, anyhow, bail};
use serde::Serialize;

use super::agent::{AgentHandle, AgentPair, AgentState, EpisodePhase};
use super::arbiter::{Outcome, RewardArbiter};
use super::channel::{PairChannels, encode_one_hot};
use super::config::{CommPolicy, HallwayConfig};
use super::coordinator::{EpisodeCoordinator, EpisodeState};
use super::effects::{GroundFlash, GroundMaterial};
use super::types::{Contact, GoalLayout, Pose, Rect, Role, Symbol, Vec2};
use crate::env::{EndReason, SpaceInfo, StepInfo};
use crate::multi_agent::{EpisodeRecord, EpisodeStats, MultiAgentEnvironment, MultiAgentResult};

/// Number of values on the movement action branch
pub const MOVE_ACTIONS: usize = 5;

/// Seeker movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Stand still (velocity still decays)
    Idle,
    /// Velocity change along the facing direction
    Forward,
    /// Velocity change against the facing direction
    Backward,
    /// Turn clockwise seen from above
    RotateRight,
    /// Turn counter-clockwise seen from above
    RotateLeft,
}

impl Movement {
    /// Decode the movement branch; out-of-range values are rejected
    pub fn from_action(action: i64) -> Option<Self> {
        match action {
            0 => Some(Movement::Idle),
            1 => Some(Movement::Forward),
            2 => Some(Movement::Backward),
            3 => Some(Movement::RotateRight),
            4 => Some(Movement::RotateLeft),
            _ => None,
        }
    }

    /// Encode back to an action value
    pub fn to_action(self) -> i64 {
        match self {
            Movement::Idle => 0,
            Movement::Forward => 1,
            Movement::Backward => 2,
            Movement::RotateRight => 3,
            Movement::RotateLeft => 4,
        }
    }
}

/// Offsets of the observation vector
///
/// ```text
/// [progress?] [message one-hot (vocab)] [payload]
/// spotter payload: [symbol O, symbol X]
/// seeker payload:  [x, z, facing x, facing z, O-goal dx, dz, X-goal dx, dz]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLayout {
    /// Step progress is the first element
    pub has_progress: bool,
    /// Message one-hot width
    pub vocab: usize,
}

impl ObservationLayout {
    /// Payload width of the Spotter
    pub const SPOTTER_PAYLOAD: usize = 2;
    /// Payload width of the Seeker
    pub const SEEKER_PAYLOAD: usize = 8;

    /// Layout implied by a config
    pub fn from_config(config: &HallwayConfig) -> Self {
        Self { has_progress: config.observe_step_progress, vocab: config.comm.message_vocab }
    }

    /// Index range of the message one-hot
    pub fn message(&self) -> std::ops::Range<usize> {
        let start = usize::from(self.has_progress);
        start..start + self.vocab
    }

    /// First index of the role-specific payload
    pub fn payload_start(&self) -> usize {
        self.message().end
    }

    /// Total observation length for `role`
    pub fn len(&self, role: Role) -> usize {
        self.payload_start()
            + match role {
                Role::Spotter => Self::SPOTTER_PAYLOAD,
                Role::Seeker => Self::SEEKER_PAYLOAD,
            }
    }
}

/// Rewards and episode end produced by one tick boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Reward of each agent for the tick, Spotter first
    pub rewards: [f32; 2],
    /// Set on the tick the episode ended
    pub end_reason: Option<EndReason>,
    /// Ticks elapsed in the episode
    pub steps: usize,
}

/// Renderer-facing view of the arena
#[derive(Debug, Clone, Serialize)]
pub struct HallwaySnapshot {
    /// Episode counter
    pub episode: u64,
    /// Ticks elapsed
    pub steps: usize,
    /// Spotter pose
    pub spotter: Pose,
    /// Seeker pose
    pub seeker: Pose,
    /// Symbol in the visible slot and where it is
    pub visible_symbol: Option<(Symbol, Vec2)>,
    /// Goal regions with their tags
    pub goals: Vec<(Symbol, Rect)>,
    /// Last delivered message for each agent, Spotter first
    pub inbox: [i64; 2],
    /// Floor material
    pub ground: GroundMaterial,
}

/// Two-agent collaborative hallway
#[derive(Debug, Clone)]
pub struct HallwayCollabEnv {
    config: HallwayConfig,
    layout: ObservationLayout,
    pair: AgentPair,
    channels: PairChannels,
    coordinator: EpisodeCoordinator,
    arbiter: RewardArbiter,
    flash: GroundFlash,
    steps: usize,
    acted: [bool; 2],
    end_reported: bool,
    stats: EpisodeStats,
}

impl HallwayCollabEnv {
    /// Create an environment; invalid configurations are rejected here
    pub fn new(config: HallwayConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            layout: ObservationLayout::from_config(&config),
            pair: AgentPair::new(),
            channels: PairChannels::new(),
            coordinator: EpisodeCoordinator::new(config.arena.clone(), config.seed),
            arbiter: RewardArbiter::new(&config),
            flash: GroundFlash::default(),
            steps: 0,
            acted: [false; 2],
            end_reported: false,
            stats: EpisodeStats::zeros(),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &HallwayConfig {
        &self.config
    }

    /// Observation offsets
    pub fn layout(&self) -> ObservationLayout {
        self.layout
    }

    /// Handle for the agent playing `role`
    pub fn handle(&self, role: Role) -> AgentHandle {
        self.pair.handle(role)
    }

    /// State of the agent playing `role`
    pub fn agent(&self, role: Role) -> &AgentState {
        self.pair.get(role)
    }

    /// State of the running episode
    pub fn episode_state(&self) -> Option<&EpisodeState> {
        self.coordinator.state()
    }

    /// Ticks elapsed in the current episode
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Statistics over all finished episodes
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Last delivered message in the inbox of `role`
    pub fn inbox(&self, role: Role) -> i64 {
        self.channels.inbox(role).receive()
    }

    /// Floor material for renderers
    pub fn ground_material(&self) -> GroundMaterial {
        self.flash.material()
    }

    /// Whether the current episode has ended and been reported
    pub fn needs_reset(&self) -> bool {
        self.end_reported
    }

    /// Begin a new randomised episode for both agents
    pub fn begin_episode(&mut self) -> &EpisodeState {
        self.reset_tick_state();
        self.coordinator.begin_episode(&mut self.pair, &mut self.channels)
    }

    /// Begin a new episode with fixed selection and goal layout
    pub fn begin_episode_with(&mut self, selection: Symbol, goal_layout: GoalLayout) -> &EpisodeState {
        self.reset_tick_state();
        self.coordinator
            .begin_episode_with(&mut self.pair, &mut self.channels, selection, goal_layout)
    }

    fn reset_tick_state(&mut self) {
        self.steps = 0;
        self.acted = [false; 2];
        self.end_reported = false;
    }

    fn require_episode(&self) -> Result<&EpisodeState> {
        self.coordinator
            .state()
            .ok_or_else(|| anyhow!("no episode has begun; call reset first"))
    }

    /// Observation of the agent behind `handle` for the current tick
    pub fn collect_observations(&self, handle: AgentHandle) -> Result<Vec<f32>> {
        let role = self.pair.resolve(handle)?;
        self.observe(role)
    }

    fn observe(&self, role: Role) -> Result<Vec<f32>> {
        let state = self.require_episode()?;
        let mut obs = Vec::with_capacity(self.layout.len(role));

        if self.layout.has_progress {
            obs.push(self.steps as f32 / self.config.max_steps as f32);
        }
        obs.extend(encode_one_hot(self.channels.inbox(role).receive(), self.layout.vocab));

        match role {
            Role::Spotter => {
                let visible = state.visible_symbol();
                obs.extend(Symbol::ALL.map(|s| if visible == Some(s) { 1.0_f32 } else { 0.0 }));
            }
            Role::Seeker => {
                let scale = self.config.arena.observation_scale();
                let pose = self.pair.get(Role::Seeker).pose;
                let facing = pose.forward();
                obs.extend([pose.position.x / scale, pose.position.z / scale, facing.x, facing.z]);
                for goal in state.goals() {
                    let offset = goal.region.center - pose.position;
                    obs.extend([offset.x / scale, offset.z / scale]);
                }
            }
        }
        Ok(obs)
    }

    /// Apply one discrete action vector `[movement, message]` for an agent
    ///
    /// The message branch is forwarded to the teammate and becomes visible at
    /// the next tick. Actions for an agent whose episode already ended this
    /// tick are ignored.
    pub fn on_action_received(&mut self, handle: AgentHandle, actions: &[i64]) -> Result<()> {
        let role = self.pair.resolve(handle)?;
        let movement = self.decode_action(role, actions)?;
        self.apply_action(role, movement, actions[1])
    }

    /// Check an action vector for `role` without touching any state
    fn decode_action(&self, role: Role, actions: &[i64]) -> Result<Movement> {
        self.require_episode()?;
        if self.end_reported {
            bail!("episode has ended; begin a new episode before acting");
        }
        if actions.len() < 2 {
            bail!("expected at least 2 action branches (movement, message), got {}", actions.len());
        }
        let movement = Movement::from_action(actions[0])
            .ok_or_else(|| anyhow!("movement action {} out of range 0..{}", actions[0], MOVE_ACTIONS))?;
        if self.acted[role.index()] {
            bail!("{role:?} already acted this tick");
        }
        Ok(movement)
    }

    fn apply_action(&mut self, role: Role, movement: Movement, message: i64) -> Result<()> {
        if !self.pair.get(role).is_active() {
            tracing::debug!(?role, "ignoring action after episode end");
            return Ok(());
        }
        self.acted[role.index()] = true;
        self.arbiter.charge_step(self.pair.get_mut(role));

        let message = match (role, self.config.comm.policy) {
            (Role::Spotter, CommPolicy::Oracle) => self.require_episode()?.selection().index() as i64,
            _ => message,
        };
        if usize::try_from(message).map_or(true, |m| m >= self.layout.vocab) {
            tracing::warn!(?role, message, vocab = self.layout.vocab, "message outside vocabulary");
        }
        self.channels.outbox_mut(role).send(message);

        if role == Role::Seeker {
            if let Some(contact) = self.move_seeker(movement) {
                self.report_contact(Role::Seeker, contact);
            }
        }
        Ok(())
    }

    /// Deliver a contact event for `role` (only Seeker goal contacts matter)
    pub fn on_contact(&mut self, handle: AgentHandle, contact: Contact) -> Result<Option<Outcome>> {
        let role = self.pair.resolve(handle)?;
        self.require_episode()?;
        Ok(self.report_contact(role, contact))
    }

    fn report_contact(&mut self, role: Role, contact: Contact) -> Option<Outcome> {
        let state = self.coordinator.state()?;
        let outcome = self.arbiter.on_contact(&mut self.pair, state, role, contact)?;
        self.flash.schedule(outcome, self.config.flash_ticks);
        Some(outcome)
    }

    fn move_seeker(&mut self, movement: Movement) -> Option<Contact> {
        let arena = &self.config.arena;
        let seeker = self.pair.get_mut(Role::Seeker);

        match movement {
            Movement::RotateRight => seeker.pose.rotate(arena.turn_degrees),
            Movement::RotateLeft => seeker.pose.rotate(-arena.turn_degrees),
            _ => {}
        }

        let mut velocity = seeker.velocity.scale(arena.velocity_damping);
        match movement {
            Movement::Forward => velocity = velocity + seeker.pose.forward().scale(arena.run_speed),
            Movement::Backward => velocity = velocity - seeker.pose.forward().scale(arena.run_speed),
            _ => {}
        }

        let start = seeker.pose.position;
        let target = start + velocity;
        let clamped = arena.playable.clamp(target, arena.agent_radius);
        let hit_wall = clamped != target;

        seeker.pose.position = clamped;
        seeker.velocity = if hit_wall { clamped - start } else { velocity };

        let goal = self
            .coordinator
            .state()
            .and_then(|state| state.goal_at(clamped, arena.agent_radius));

        match goal {
            Some(symbol) => Some(Contact::Goal(symbol)),
            None if hit_wall => Some(Contact::Wall),
            None => None,
        }
    }

    /// Close the current tick
    ///
    /// Publishes staged messages, applies step-budget truncation, hands out
    /// the tick's rewards and reports the episode end exactly once.
    pub fn end_tick(&mut self) -> Result<TickReport> {
        self.require_episode()?;
        if self.end_reported {
            bail!("episode has ended; begin a new episode before stepping");
        }

        self.steps += 1;
        self.acted = [false; 2];
        self.channels.deliver();
        self.flash.tick();

        if !self.pair.all_ended() && self.steps >= self.config.max_steps {
            if let Some(state) = self.coordinator.state() {
                self.arbiter.on_truncation(&mut self.pair, state);
            }
        }

        let rewards = Role::ALL.map(|role| self.pair.get_mut(role).take_step_reward());

        let end_reason = if self.pair.all_ended() {
            self.end_reported = true;
            let reason = self.pair.end_reason();
            if let Some(reason) = reason {
                self.stats.record(&EpisodeRecord {
                    end_reason: reason,
                    length: self.steps,
                    returns: Role::ALL.map(|role| self.pair.get(role).cumulative_reward),
                });
            }
            reason
        } else {
            None
        };

        Ok(TickReport { rewards, end_reason, steps: self.steps })
    }

    /// Renderer-facing snapshot of the arena
    pub fn snapshot(&self) -> Result<HallwaySnapshot> {
        let state = self.require_episode()?;
        let visible_symbol = state
            .markers()
            .iter()
            .find_map(|m| m.placement.map(|p| (m.symbol, p)));

        Ok(HallwaySnapshot {
            episode: state.episode(),
            steps: self.steps,
            spotter: self.pair.get(Role::Spotter).pose,
            seeker: self.pair.get(Role::Seeker).pose,
            visible_symbol,
            goals: state.goals().iter().map(|g| (g.symbol, g.region)).collect(),
            inbox: Role::ALL.map(|role| self.channels.inbox(role).receive()),
            ground: self.flash.material(),
        })
    }

    fn role_for(&self, agent_id: usize) -> Result<Role> {
        Role::from_index(agent_id).ok_or_else(|| anyhow!("agent id {agent_id} out of range 0..2"))
    }
}

impl MultiAgentEnvironment for HallwayCollabEnv {
    type Observation = Vec<f32>;
    type Action = Vec<i64>;

    fn num_agents(&self) -> usize {
        2
    }

    fn reset(&mut self) -> Result<Vec<Self::Observation>> {
        self.begin_episode();
        Role::ALL.iter().map(|&role| self.observe(role)).collect()
    }

    fn get_observation(&self, agent_id: usize) -> Result<Self::Observation> {
        self.observe(self.role_for(agent_id)?)
    }

    fn step_multi(&mut self, actions: &[Self::Action]) -> Result<MultiAgentResult<Self::Observation>> {
        if actions.len() != 2 {
            bail!("expected one action vector per agent (2), got {}", actions.len());
        }
        if self.pair.is_uninitialized() {
            bail!("no episode has begun; call reset first");
        }

        // Both action vectors are checked before either is applied
        let movements = [
            self.decode_action(Role::Spotter, &actions[0])?,
            self.decode_action(Role::Seeker, &actions[1])?,
        ];
        for role in Role::ALL {
            self.apply_action(role, movements[role.index()], actions[role.index()][1])?;
        }
        let report = self.end_tick()?;

        let observations = Role::ALL
            .iter()
            .map(|&role| self.observe(role))
            .collect::<Result<Vec<_>>>()?;
        let terminated = vec![report.end_reason.is_some_and(EndReason::is_terminal); 2];
        let truncated = vec![report.end_reason == Some(EndReason::Truncated); 2];
        let info = StepInfo {
            episode: self.coordinator.episodes(),
            steps: report.steps,
            end_reason: report.end_reason,
        };

        Ok(MultiAgentResult::new(observations, report.rewards.to_vec(), terminated, truncated).with_info(info))
    }

    /// Agent 0 is the Spotter; every other id is treated as the Seeker, the
    /// only agent id besides 0 that [`Self::num_agents`] allows
    fn observation_space(&self, agent_id: usize) -> SpaceInfo {
        let role = Role::from_index(agent_id).unwrap_or(Role::Seeker);
        SpaceInfo::continuous(self.layout.len(role))
    }

    fn action_space(&self, _agent_id: usize) -> SpaceInfo {
        SpaceInfo::multi_discrete(vec![MOVE_ACTIONS, self.config.comm.message_vocab])
    }

    fn active_agents(&self) -> Vec<bool> {
        self.pair.iter().map(|a| a.phase == EpisodePhase::Active).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> HallwayCollabEnv {
        HallwayCollabEnv::new(HallwayConfig::new().seed(11).max_steps(100)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(HallwayCollabEnv::new(HallwayConfig::new().max_steps(0)).is_err());
    }

    #[test]
    fn test_step_before_reset_fails() {
        let mut env = env();
        assert!(env.step_multi(&[vec![0, 0], vec![0, 0]]).is_err());
        assert!(env.get_observation(0).is_err());
        assert!(env.end_tick().is_err());
    }

    #[test]
    fn test_observation_lengths() {
        let mut env = env();
        let obs = env.reset().unwrap();
        let layout = env.layout();

        assert_eq!(obs[0].len(), layout.len(Role::Spotter));
        assert_eq!(obs[1].len(), layout.len(Role::Seeker));
        assert_eq!(env.observation_space(0).flat_len(), obs[0].len());
        assert_eq!(env.observation_space(1).flat_len(), obs[1].len());
        assert_eq!(obs[0][0], 0.0, "progress starts at zero");
    }

    #[test]
    fn test_spotter_sees_visible_symbol_only() {
        let mut env = env();
        env.begin_episode_with(Symbol::X, GoalLayout::ORight);
        let layout = env.layout();

        let spotter = env.get_observation(0).unwrap();
        let start = layout.payload_start();
        assert_eq!(&spotter[start..start + 2], &[0.0, 1.0]);
    }

    #[test]
    fn test_seeker_observation_does_not_depend_on_selection() {
        let mut a = env();
        let mut b = env();
        a.begin_episode_with(Symbol::O, GoalLayout::OLeft);
        b.begin_episode_with(Symbol::X, GoalLayout::OLeft);

        assert_eq!(a.get_observation(1).unwrap(), b.get_observation(1).unwrap());
    }

    #[test]
    fn test_rejects_malformed_actions() {
        let mut env = env();
        env.reset().unwrap();
        let seeker = env.handle(Role::Seeker);

        assert!(env.on_action_received(seeker, &[1]).is_err());
        assert!(env.on_action_received(seeker, &[7, 0]).is_err());
        assert!(env.on_action_received(seeker, &[-1, 0]).is_err());
        assert!(env.step_multi(&[vec![0, 0]]).is_err());
    }

    #[test]
    fn test_rejected_step_applies_nothing() {
        let mut env = env();
        env.begin_episode_with(Symbol::O, GoalLayout::OLeft);
        let seeker_start = env.agent(Role::Seeker).pose;

        assert!(env.step_multi(&[vec![0, 1], vec![9, 0]]).is_err());
        assert_eq!(env.agent(Role::Spotter).step_reward, 0.0);
        assert_eq!(env.agent(Role::Spotter).cumulative_reward, 0.0);
        assert_eq!(env.steps(), 0);

        let result = env.step_multi(&[vec![0, 0], vec![0, 0]]).unwrap();
        let cost = -1.0 / env.config().max_steps as f32;
        assert!((result.rewards[0] - cost).abs() < 1e-6);
        assert_eq!(env.inbox(Role::Seeker), 0, "message of the rejected step was never staged");
        assert_eq!(env.agent(Role::Seeker).pose, seeker_start);
    }

    #[test]
    fn test_clone_rejects_handles_of_original() {
        let mut a = env();
        a.reset().unwrap();
        let mut b = a.clone();

        assert!(a.on_action_received(b.handle(Role::Seeker), &[1, 2]).is_err());
        assert!(b.on_action_received(a.handle(Role::Spotter), &[0, 1]).is_err());
        b.on_action_received(b.handle(Role::Spotter), &[0, 1]).unwrap();
    }

    #[test]
    fn test_double_action_in_one_tick_fails() {
        let mut env = env();
        env.reset().unwrap();
        let spotter = env.handle(Role::Spotter);

        env.on_action_received(spotter, &[0, 1]).unwrap();
        assert!(env.on_action_received(spotter, &[0, 2]).is_err());
        env.end_tick().unwrap();
        env.on_action_received(spotter, &[0, 2]).unwrap();
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut a = env();
        let b = env();
        a.reset().unwrap();
        assert!(a.collect_observations(b.handle(Role::Seeker)).is_err());
        assert!(a.on_action_received(b.handle(Role::Seeker), &[0, 0]).is_err());
    }

    #[test]
    fn test_forward_moves_seeker() {
        let mut env = env();
        env.reset().unwrap();
        let start = env.agent(Role::Seeker).pose;

        env.step_multi(&[vec![0, 0], vec![Movement::Forward.to_action(), 0]]).unwrap();
        let after = env.agent(Role::Seeker).pose;

        let moved = after.position - start.position;
        let expected = start.forward().scale(env.config().arena.run_speed);
        assert!((moved.x - expected.x).abs() < 1e-5);
        assert!((moved.z - expected.z).abs() < 1e-5);
        assert_eq!(after.heading_deg, start.heading_deg);
    }

    #[test]
    fn test_rotation_changes_heading_only() {
        let mut env = env();
        env.reset().unwrap();
        let start = env.agent(Role::Seeker).pose;

        env.step_multi(&[vec![0, 0], vec![Movement::RotateRight.to_action(), 0]]).unwrap();
        let after = env.agent(Role::Seeker).pose;

        assert_eq!(after.position, start.position);
        let turned = (after.heading_deg - start.heading_deg).rem_euclid(360.0);
        assert!((turned - env.config().arena.turn_degrees).abs() < 1e-3);
    }

    #[test]
    fn test_spotter_never_moves() {
        let mut env = env();
        env.reset().unwrap();
        let start = env.agent(Role::Spotter).pose;

        for _ in 0..10 {
            env.step_multi(&[vec![Movement::Forward.to_action(), 0], vec![0, 0]]).unwrap();
        }
        assert_eq!(env.agent(Role::Spotter).pose, start);
    }

    #[test]
    fn test_seeker_stays_in_arena() {
        let mut env = env();
        env.reset().unwrap();

        for _ in 0..80 {
            let result = env.step_multi(&[vec![0, 0], vec![Movement::Backward.to_action(), 0]]).unwrap();
            if result.all_done() {
                break;
            }
        }
        assert!(env.config().arena.playable.contains(env.agent(Role::Seeker).pose.position));
    }

    #[test]
    fn test_oracle_policy_sends_selection() {
        let config = HallwayConfig::new().seed(3).comm_policy(CommPolicy::Oracle);
        let mut env = HallwayCollabEnv::new(config).unwrap();
        env.begin_episode_with(Symbol::X, GoalLayout::OLeft);

        env.step_multi(&[vec![0, 0], vec![0, 2]]).unwrap();
        assert_eq!(env.inbox(Role::Seeker), Symbol::X.index() as i64);
        assert_eq!(env.inbox(Role::Spotter), 2, "seeker still forwards its own action");
    }

    #[test]
    fn test_learned_policy_forwards_verbatim() {
        let mut env = env();
        env.begin_episode_with(Symbol::X, GoalLayout::OLeft);

        env.step_multi(&[vec![0, 7], vec![0, 0]]).unwrap();
        assert_eq!(env.inbox(Role::Seeker), 7);
    }

    #[test]
    fn test_snapshot_reflects_episode() {
        let mut env = env();
        env.begin_episode_with(Symbol::O, GoalLayout::OLeft);
        let snapshot = env.snapshot().unwrap();

        assert_eq!(snapshot.visible_symbol.map(|(s, _)| s), Some(Symbol::O));
        assert_eq!(snapshot.goals.len(), 2);
        assert_eq!(snapshot.inbox, [-1, -1]);
        assert_eq!(snapshot.ground, GroundMaterial::Default);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["steps"], 0);
    }

    #[test]
    fn test_active_agents_track_lifecycle() {
        let mut env = env();
        assert_eq!(env.active_agents(), vec![false, false]);
        env.reset().unwrap();
        assert_eq!(env.active_agents(), vec![true, true]);
    }
}
