//! Basic types for the hallway environment
//!
//! Roles, symbols, ground-plane geometry and contact events.

use serde::{Deserialize, Serialize};

/// Role an agent plays in the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Stationary agent that sees the symbol
    Spotter,
    /// Mobile agent that must reach the matching goal
    Seeker,
}

impl Role {
    /// Both roles in stepping order
    pub const ALL: [Role; 2] = [Role::Spotter, Role::Seeker];

    /// Index used for per-agent vectors
    pub fn index(self) -> usize {
        match self {
            Role::Spotter => 0,
            Role::Seeker => 1,
        }
    }

    /// Role from a per-agent vector index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Role::Spotter),
            1 => Some(Role::Seeker),
            _ => None,
        }
    }

    /// The other member of the pair
    pub fn teammate(self) -> Self {
        match self {
            Role::Spotter => Role::Seeker,
            Role::Seeker => Role::Spotter,
        }
    }
}

/// One of the two symbols shown to the Spotter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Ring symbol
    O,
    /// Cross symbol
    X,
}

impl Symbol {
    /// Both symbols in index order
    pub const ALL: [Symbol; 2] = [Symbol::O, Symbol::X];

    /// Index of the symbol (O = 0, X = 1)
    pub fn index(self) -> usize {
        match self {
            Symbol::O => 0,
            Symbol::X => 1,
        }
    }

    /// Symbol from its index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Symbol::O),
            1 => Some(Symbol::X),
            _ => None,
        }
    }

    /// The other symbol
    pub fn other(self) -> Self {
        match self {
            Symbol::O => Symbol::X,
            Symbol::X => Symbol::O,
        }
    }
}

/// Which lateral side each goal sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalLayout {
    /// O-goal on the right (+x), X-goal on the left
    ORight,
    /// O-goal on the left (-x), X-goal on the right
    OLeft,
}

impl GoalLayout {
    /// Layout from the drawn index (0 = `ORight`, 1 = `OLeft`)
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GoalLayout::ORight),
            1 => Some(GoalLayout::OLeft),
            _ => None,
        }
    }

    /// Index of the layout
    pub fn index(self) -> usize {
        match self {
            GoalLayout::ORight => 0,
            GoalLayout::OLeft => 1,
        }
    }

    /// Sign of the lateral offset for the goal tagged `symbol`
    pub fn side(self, symbol: Symbol) -> f32 {
        match (self, symbol) {
            (GoalLayout::ORight, Symbol::O) | (GoalLayout::OLeft, Symbol::X) => 1.0,
            (GoalLayout::ORight, Symbol::X) | (GoalLayout::OLeft, Symbol::O) => -1.0,
        }
    }
}

/// Point on the ground plane (x lateral, z along the hallway)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Lateral coordinate
    pub x: f32,
    /// Coordinate along the hallway
    pub z: f32,
}

impl Vec2 {
    /// Origin
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    /// Create new point
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Unit vector facing `heading_deg` (0 faces +z, positive turns right)
    pub fn from_heading(heading_deg: f32) -> Self {
        let rad = heading_deg.to_radians();
        Self::new(rad.sin(), rad.cos())
    }

    /// Euclidean length
    pub fn length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Scale both components
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.z * factor)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

/// Axis-aligned rectangle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center point
    pub center: Vec2,
    /// Half width (x) and half length (z)
    pub half_extents: Vec2,
}

impl Rect {
    /// Create rectangle from center and half extents
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Lower corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Upper corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Check if a point lies inside (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.z >= min.z && p.z <= max.z
    }

    /// Check if a disc of `radius` around `p` overlaps the rectangle
    pub fn overlaps_disc(&self, p: Vec2, radius: f32) -> bool {
        let (min, max) = (self.min(), self.max());
        let nearest = Vec2::new(p.x.clamp(min.x, max.x), p.z.clamp(min.z, max.z));
        (p - nearest).length() <= radius
    }

    /// Closest point inside the rectangle, shrunk by `margin` on every side
    pub fn clamp(&self, p: Vec2, margin: f32) -> Vec2 {
        let (min, max) = (self.min(), self.max());
        let lo = Vec2::new((min.x + margin).min(self.center.x), (min.z + margin).min(self.center.z));
        let hi = Vec2::new((max.x - margin).max(self.center.x), (max.z - margin).max(self.center.z));
        Vec2::new(p.x.clamp(lo.x, hi.x), p.z.clamp(lo.z, hi.z))
    }
}

/// Position and facing of a body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Ground-plane position
    pub position: Vec2,
    /// Degrees in [0, 360)
    pub heading_deg: f32,
}

impl Pose {
    /// Create pose, normalising the heading
    pub fn new(position: Vec2, heading_deg: f32) -> Self {
        Self { position, heading_deg: heading_deg.rem_euclid(360.0) }
    }

    /// Unit vector the body faces
    pub fn forward(&self) -> Vec2 {
        Vec2::from_heading(self.heading_deg)
    }

    /// Rotate by `delta_deg`, keeping the heading in [0, 360)
    pub fn rotate(&mut self, delta_deg: f32) {
        self.heading_deg = (self.heading_deg + delta_deg).rem_euclid(360.0);
    }
}

/// Something the Seeker touched during its action phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Goal region tagged with a symbol
    Goal(Symbol),
    /// Arena boundary
    Wall,
}
