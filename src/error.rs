//! Error taxonomy shared by all evaluators.

use std::fmt;

use crate::types::{ComponentId, NodeId, NodePair, SetKind};

pub type Result<T, E = RbdError> = std::result::Result<T, E>;

/// Errors raised while building inputs or evaluating availability.
#[derive(Debug, thiserror::Error)]
pub enum RbdError {
    /// A probability outside `[0, 1]` (or NaN) was supplied for a component.
    #[error("probability {probability} of component {component} is outside [0, 1]")]
    InvalidProbability { component: ComponentId, probability: f64 },

    /// A path or cut references a component missing from the probability map.
    #[error("unknown component {0}")]
    UnknownComponent(ComponentId),

    /// No path or cut was given for a node pair.
    #[error("no {kind} given for pair ({src}, {dst})")]
    EmptyInput { src: NodeId, dst: NodeId, kind: SetKind },

    /// The node pair list and the set list of a batch differ in length.
    #[error("batch has {pairs} node pairs but {sets} set families")]
    LengthMismatch { pairs: usize, sets: usize },

    /// One or more pairs of a batch failed. Failures are sorted by index.
    #[error("{} of {total} node pairs failed, first: {}", .failures.len(), FirstFailure(.failures))]
    BatchPartialFailure { total: usize, failures: Vec<PairFailure> },

    /// The dedicated worker pool could not be built.
    #[error("could not build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl RbdError {
    /// Indices of the failing pairs, if this is a batch failure.
    pub fn failed_indices(&self) -> Vec<usize> {
        match self {
            RbdError::BatchPartialFailure { failures, .. } => failures.iter().map(|f| f.index).collect(),
            _ => Vec::new(),
        }
    }
}

/// A single failed pair inside a batch.
#[derive(Debug)]
pub struct PairFailure {
    /// Position of the pair in the input list.
    pub index: usize,
    pub pair: NodePair,
    pub error: RbdError,
}

impl fmt::Display for PairFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}, {}): {}", self.index, self.pair.0, self.pair.1, self.error)
    }
}

struct FirstFailure<'a>(&'a [PairFailure]);

impl fmt::Display for FirstFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(failure) => write!(f, "{}", failure),
            None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_probability() {
        let e = RbdError::InvalidProbability {
            component: 4,
            probability: 1.5,
        };
        assert_eq!(e.to_string(), "probability 1.5 of component 4 is outside [0, 1]");
    }

    #[test]
    fn test_display_empty_input() {
        let e = RbdError::EmptyInput {
            src: 1,
            dst: 2,
            kind: SetKind::MinCutSets,
        };
        assert_eq!(e.to_string(), "no minimal cut sets given for pair (1, 2)");
    }

    #[test]
    fn test_batch_failure_indices() {
        let e = RbdError::BatchPartialFailure {
            total: 5,
            failures: vec![
                PairFailure {
                    index: 1,
                    pair: (0, 1),
                    error: RbdError::UnknownComponent(9),
                },
                PairFailure {
                    index: 3,
                    pair: (2, 3),
                    error: RbdError::UnknownComponent(8),
                },
            ],
        };
        assert_eq!(e.failed_indices(), vec![1, 3]);
        assert_eq!(e.to_string(), "2 of 5 node pairs failed, first: #1 (0, 1): unknown component 9");
        assert!(RbdError::UnknownComponent(1).failed_indices().is_empty());
    }
}
