//! Read-only table of component success probabilities.
//!
//! A [`ProbabilityMap`] is built once, validated on construction and then
//! only read. It holds plain data, so it is `Sync` and a single instance is
//! shared by reference across every worker of a parallel batch.
//!
//! # Example
//!
//! ```
//! use rbd_rs::probability::ProbabilityMap;
//!
//! let probs = ProbabilityMap::new([(1, 0.9), (2, 0.8)]).unwrap();
//! assert_eq!(probs.get(1).unwrap(), 0.9);
//! assert!(probs.get(3).is_err());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{RbdError, Result};
use crate::types::ComponentId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityMap {
    probs: BTreeMap<ComponentId, f64>,
}

impl ProbabilityMap {
    /// Builds a map, rejecting any probability outside `[0, 1]` or NaN.
    ///
    /// A component listed twice keeps its last probability.
    pub fn new(entries: impl IntoIterator<Item = (ComponentId, f64)>) -> Result<Self> {
        let mut probs = BTreeMap::new();
        for (component, probability) in entries {
            if !(0.0..=1.0).contains(&probability) {
                return Err(RbdError::InvalidProbability { component, probability });
            }
            probs.insert(component, probability);
        }
        Ok(ProbabilityMap { probs })
    }

    /// Success probability of `component`.
    pub fn get(&self, component: ComponentId) -> Result<f64> {
        self.probs
            .get(&component)
            .copied()
            .ok_or(RbdError::UnknownComponent(component))
    }

    pub fn contains(&self, component: ComponentId) -> bool {
        self.probs.contains_key(&component)
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterates over `(component, probability)` in ascending component order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, f64)> + '_ {
        self.probs.iter().map(|(&c, &p)| (c, p))
    }

    /// Checks that every component of every set is known.
    ///
    /// Returns the first unknown component in input order.
    pub fn check_all<S: AsRef<[ComponentId]>>(&self, sets: &[S]) -> Result<()> {
        for set in sets {
            for &component in set.as_ref() {
                if !self.contains(component) {
                    return Err(RbdError::UnknownComponent(component));
                }
            }
        }
        Ok(())
    }

    /// Writes the mapping to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for ProbabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (c, p)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", c, p)?;
        }
        write!(f, "}}")
    }
}

impl TryFrom<HashMap<ComponentId, f64>> for ProbabilityMap {
    type Error = RbdError;

    fn try_from(map: HashMap<ComponentId, f64>) -> Result<Self> {
        ProbabilityMap::new(map)
    }
}

impl TryFrom<BTreeMap<ComponentId, f64>> for ProbabilityMap {
    type Error = RbdError;

    fn try_from(map: BTreeMap<ComponentId, f64>) -> Result<Self> {
        ProbabilityMap::new(map)
    }
}
