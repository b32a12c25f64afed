//! Episode setup for a Spotter/Seeker pair
//!
//! The [`EpisodeCoordinator`] owns the randomness and the per-episode
//! [`EpisodeState`]: which symbol is shown (the ground truth), where the two
//! tagged goals sit, and where both agents start. A new state value is built
//! on every episode begin; nothing from the previous episode survives.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::AgentPair;
use super::channel::PairChannels;
use super::config::ArenaConfig;
use super::types::{GoalLayout, Pose, Rect, Role, Symbol, Vec2};

/// Placement of one symbol marker; `None` means absent this episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolMarker {
    /// Symbol drawn on the marker
    pub symbol: Symbol,
    /// Position in the visible slot, if shown
    pub placement: Option<Vec2>,
}

impl SymbolMarker {
    /// Whether the marker is physically present
    pub fn is_visible(&self) -> bool {
        self.placement.is_some()
    }
}

/// Goal region tagged with a symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRegion {
    /// Symbol the goal stands for
    pub symbol: Symbol,
    /// Trigger area on the ground plane
    pub region: Rect,
}

/// Shared configuration of the running episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    episode: u64,
    selection: Symbol,
    goal_layout: GoalLayout,
    markers: [SymbolMarker; 2],
    goals: [GoalRegion; 2],
}

impl EpisodeState {
    fn build(episode: u64, selection: Symbol, goal_layout: GoalLayout, arena: &ArenaConfig) -> Self {
        let markers = Symbol::ALL.map(|symbol| SymbolMarker {
            symbol,
            placement: (symbol == selection).then_some(arena.symbol_slot),
        });
        let goals = Symbol::ALL.map(|symbol| GoalRegion {
            symbol,
            region: arena.goal_rect(goal_layout.side(symbol)),
        });

        Self { episode, selection, goal_layout, markers, goals }
    }

    /// Episode counter (1 for the first episode)
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Ground truth: the symbol shown to the Spotter
    pub fn selection(&self) -> Symbol {
        self.selection
    }

    /// Side assignment of the two goals
    pub fn goal_layout(&self) -> GoalLayout {
        self.goal_layout
    }

    /// Both symbol markers, O first
    pub fn markers(&self) -> &[SymbolMarker; 2] {
        &self.markers
    }

    /// Both goal regions, O first
    pub fn goals(&self) -> &[GoalRegion; 2] {
        &self.goals
    }

    /// Goal tagged with `symbol`
    pub fn goal(&self, symbol: Symbol) -> &GoalRegion {
        &self.goals[symbol.index()]
    }

    /// Symbol of the marker currently in the visible slot
    pub fn visible_symbol(&self) -> Option<Symbol> {
        self.markers.iter().find(|m| m.is_visible()).map(|m| m.symbol)
    }

    /// Number of markers present in the arena
    pub fn visible_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_visible()).count()
    }

    /// Goal touched by a disc at `position`, if any
    pub fn goal_at(&self, position: Vec2, radius: f32) -> Option<Symbol> {
        self.goals
            .iter()
            .find(|g| g.region.overlaps_disc(position, radius))
            .map(|g| g.symbol)
    }
}

/// Draws and installs a fresh episode for a pair
#[derive(Debug, Clone)]
pub struct EpisodeCoordinator {
    arena: ArenaConfig,
    rng: StdRng,
    state: Option<EpisodeState>,
    episodes: u64,
}

impl EpisodeCoordinator {
    /// Create a coordinator; `seed` of `None` draws from entropy
    pub fn new(arena: ArenaConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { arena, rng, state: None, episodes: 0 }
    }

    /// State of the running episode (`None` before the first begin)
    pub fn state(&self) -> Option<&EpisodeState> {
        self.state.as_ref()
    }

    /// Number of episodes begun so far
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Begin a new episode with independently drawn selection and goal layout
    pub fn begin_episode(&mut self, pair: &mut AgentPair, channels: &mut PairChannels) -> &EpisodeState {
        let selection = if self.rng.gen_bool(0.5) { Symbol::X } else { Symbol::O };
        let goal_layout = if self.rng.gen_bool(0.5) { GoalLayout::OLeft } else { GoalLayout::ORight };
        self.begin_episode_with(pair, channels, selection, goal_layout)
    }

    /// Begin a new episode with a fixed selection and goal layout
    ///
    /// Agent placement is still randomised.
    pub fn begin_episode_with(
        &mut self,
        pair: &mut AgentPair,
        channels: &mut PairChannels,
        selection: Symbol,
        goal_layout: GoalLayout,
    ) -> &EpisodeState {
        self.episodes += 1;

        let seeker_pose = self.draw_seeker_pose();
        pair.get_mut(Role::Seeker).begin_episode(seeker_pose);
        pair.get_mut(Role::Spotter).begin_episode(self.arena.spotter_pose);
        channels.reset();

        tracing::debug!(
            episode = self.episodes,
            ?selection,
            ?goal_layout,
            x = seeker_pose.position.x,
            z = seeker_pose.position.z,
            heading = seeker_pose.heading_deg,
            "episode begin"
        );

        self.state.insert(EpisodeState::build(self.episodes, selection, goal_layout, &self.arena))
    }

    fn draw_seeker_pose(&mut self) -> Pose {
        let (min, max) = (self.arena.seeker_spawn.min(), self.arena.seeker_spawn.max());
        let position = Vec2::new(self.rng.gen_range(min.x..=max.x), self.rng.gen_range(min.z..=max.z));
        let heading = self.rng.gen_range(0.0..360.0);
        Pose::new(position, heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::hallway::agent::EpisodePhase;

    fn setup(seed: u64) -> (EpisodeCoordinator, AgentPair, PairChannels) {
        (EpisodeCoordinator::new(ArenaConfig::default(), Some(seed)), AgentPair::new(), PairChannels::new())
    }

    #[test]
    fn test_exactly_one_marker_visible() {
        let (mut coordinator, mut pair, mut channels) = setup(1);

        for _ in 0..200 {
            let state = coordinator.begin_episode(&mut pair, &mut channels);
            assert_eq!(state.visible_marker_count(), 1);
            assert_eq!(state.visible_symbol(), Some(state.selection()));

            let hidden = &state.markers()[state.selection().other().index()];
            assert!(hidden.placement.is_none());
        }
    }

    #[test]
    fn test_goals_follow_layout() {
        let (mut coordinator, mut pair, mut channels) = setup(2);
        let arena = ArenaConfig::default();

        let state = coordinator.begin_episode_with(&mut pair, &mut channels, Symbol::O, GoalLayout::OLeft);
        assert_eq!(state.goal(Symbol::O).region.center.x, -arena.goal_lateral_offset);
        assert_eq!(state.goal(Symbol::X).region.center.x, arena.goal_lateral_offset);

        let state = coordinator.begin_episode_with(&mut pair, &mut channels, Symbol::O, GoalLayout::ORight);
        assert_eq!(state.goal(Symbol::O).region.center.x, arena.goal_lateral_offset);
        assert_eq!(state.goal(Symbol::X).region.center.x, -arena.goal_lateral_offset);
    }

    #[test]
    fn test_seeker_spawns_in_region_and_spotter_is_fixed() {
        let (mut coordinator, mut pair, mut channels) = setup(3);
        let arena = ArenaConfig::default();

        for _ in 0..200 {
            coordinator.begin_episode(&mut pair, &mut channels);
            let seeker = pair.get(Role::Seeker);
            assert!(arena.seeker_spawn.contains(seeker.pose.position));
            assert!((0.0..360.0).contains(&seeker.pose.heading_deg));
            assert_eq!(pair.get(Role::Spotter).pose, arena.spotter_pose);
        }
    }

    #[test]
    fn test_begin_resets_channels_and_velocity() {
        let (mut coordinator, mut pair, mut channels) = setup(4);
        coordinator.begin_episode(&mut pair, &mut channels);

        channels.outbox_mut(Role::Spotter).send(1);
        channels.deliver();
        channels.outbox_mut(Role::Seeker).send(2);
        pair.get_mut(Role::Seeker).velocity = Vec2::new(1.0, 1.0);

        for _ in 0..3 {
            coordinator.begin_episode(&mut pair, &mut channels);
            assert_eq!(channels.inbox(Role::Seeker).receive(), -1);
            assert_eq!(channels.inbox(Role::Spotter).receive(), -1);
            assert!(!channels.inbox(Role::Spotter).has_pending());
            assert_eq!(pair.get(Role::Seeker).velocity, Vec2::ZERO);
            assert_eq!(pair.get(Role::Seeker).phase, EpisodePhase::Active);
        }
        assert_eq!(coordinator.episodes(), 4);
    }

    #[test]
    fn test_same_seed_same_episodes() {
        let (mut a, mut pair_a, mut channels_a) = setup(42);
        let (mut b, mut pair_b, mut channels_b) = setup(42);

        for _ in 0..20 {
            let sa = a.begin_episode(&mut pair_a, &mut channels_a).clone();
            let sb = b.begin_episode(&mut pair_b, &mut channels_b).clone();
            assert_eq!(sa, sb);
            assert_eq!(pair_a.get(Role::Seeker).pose, pair_b.get(Role::Seeker).pose);
        }
    }

    #[test]
    fn test_goal_at() {
        let (mut coordinator, mut pair, mut channels) = setup(5);
        let state = coordinator.begin_episode_with(&mut pair, &mut channels, Symbol::X, GoalLayout::ORight);

        let x_center = state.goal(Symbol::X).region.center;
        assert_eq!(state.goal_at(x_center, 0.5), Some(Symbol::X));
        assert_eq!(state.goal_at(Vec2::ZERO, 0.5), None);
    }
}
