//! Environment building blocks
//!
//! This module defines the space descriptors and per-step information shared
//! by every environment in the crate, the parallel environment pool, and the
//! built-in collaborative hallway game.

use serde::{Deserialize, Serialize};

/// Space information for observations and actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceInfo {
    /// Shape of the space
    pub shape: Vec<usize>,

    /// Data type
    pub dtype: SpaceType,
}

impl SpaceInfo {
    /// Flat continuous vector of `len` floats
    pub fn continuous(len: usize) -> Self {
        Self { shape: vec![len], dtype: SpaceType::Continuous }
    }

    /// Discrete action vector with one branch per entry of `branches`
    pub fn multi_discrete(branches: Vec<usize>) -> Self {
        Self { shape: vec![branches.len()], dtype: SpaceType::MultiDiscrete(branches) }
    }

    /// Total number of scalar elements described by the shape
    pub fn flat_len(&self) -> usize {
        self.shape.iter().product()
    }
}

/// Space data types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceType {
    /// Continuous space (Box)
    Continuous,

    /// Multi-discrete space, one option count per branch
    MultiDiscrete(Vec<usize>),
}

/// Why an episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// Task solved
    Success,

    /// Task attempted and failed
    Failure,

    /// Step budget exhausted
    Truncated,
}

impl EndReason {
    /// True for outcomes produced by the task itself rather than the step budget
    pub fn is_terminal(self) -> bool {
        !matches!(self, EndReason::Truncated)
    }
}

/// Additional step information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Episode counter at the time of the step
    pub episode: u64,

    /// Ticks elapsed in the episode after the step
    pub steps: usize,

    /// Set on the tick the episode ended
    pub end_reason: Option<EndReason>,
}

pub mod hallway;
pub mod pool;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_discrete_space() {
        let space = SpaceInfo::multi_discrete(vec![5, 3]);
        assert_eq!(space.shape, vec![2]);
        assert_eq!(space.flat_len(), 2);
        assert!(matches!(space.dtype, SpaceType::MultiDiscrete(ref b) if b == &vec![5, 3]));
    }

    #[test]
    fn test_end_reason_terminal() {
        assert!(EndReason::Success.is_terminal());
        assert!(EndReason::Failure.is_terminal());
        assert!(!EndReason::Truncated.is_terminal());
    }
}
