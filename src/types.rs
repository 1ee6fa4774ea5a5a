//! Identifiers, structural inputs and literals.
//!
//! Components (nodes or links of a network) are named by plain integers, as
//! handed over by whatever tool enumerated the path sets or cut sets. A
//! [`Lit`] pins one component to a state: `up` (working) or `down` (failed).
use std::fmt;
use std::ops::Neg;

/// Identifier of a component whose state is probabilistic.
pub type ComponentId = i32;

/// Identifier of a network node. Only used as a label attached to results.
pub type NodeId = i32;

/// A `(src, dst)` pair of nodes.
pub type NodePair = (NodeId, NodeId);

/// Components that must all be up for a path to connect `src` and `dst`.
pub type Path = Vec<ComponentId>;

/// Components whose simultaneous failure disconnects `src` from `dst`.
pub type Cut = Vec<ComponentId>;

/// Ordered path family for one node pair.
pub type PathSets = Vec<Path>;

/// Ordered minimal cut family for one node pair.
pub type MinCutSets = Vec<Cut>;

/// A literal: a component fixed either up or down.
///
/// Literals order by component first and state second, so a sorted literal
/// list keeps both states of one component adjacent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit {
    component: ComponentId,
    up: bool,
}

impl Lit {
    /// Literal requiring `component` to be up.
    pub const fn up(component: ComponentId) -> Self {
        Lit { component, up: true }
    }

    /// Literal requiring `component` to be down.
    pub const fn down(component: ComponentId) -> Self {
        Lit { component, up: false }
    }

    /// Literal with the given state.
    pub const fn new(component: ComponentId, up: bool) -> Self {
        Lit { component, up }
    }

    pub const fn component(self) -> ComponentId {
        self.component
    }

    pub const fn is_up(self) -> bool {
        self.up
    }

    pub const fn is_down(self) -> bool {
        !self.up
    }

    /// Probability of this literal holding, given `p = P(component up)`.
    pub fn weight(self, p: f64) -> f64 {
        if self.up {
            p
        } else {
            1.0 - p
        }
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit {
            component: self.component,
            up: !self.up,
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.up {
            write!(f, "x{}", self.component)
        } else {
            write!(f, "¬x{}", self.component)
        }
    }
}

/// Which kind of structural family an input list holds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SetKind {
    PathSets,
    MinCutSets,
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetKind::PathSets => write!(f, "path sets"),
            SetKind::MinCutSets => write!(f, "minimal cut sets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_creation() {
        let a = Lit::up(3);
        let b = Lit::down(3);
        assert_eq!(a.component(), 3);
        assert!(a.is_up());
        assert!(b.is_down());
        assert_eq!(-a, b);
        assert_eq!(-b, a);
        assert_eq!(Lit::new(3, true), a);
    }

    #[test]
    fn test_lit_zero_and_negative_ids() {
        let z = Lit::up(0);
        let n = Lit::down(-7);
        assert_eq!(z.component(), 0);
        assert_eq!(n.component(), -7);
        assert_eq!(z.to_string(), "x0");
        assert_eq!(n.to_string(), "¬x-7");
    }

    #[test]
    fn test_lit_order() {
        // Same component: down < up. Components dominate.
        assert!(Lit::down(1) < Lit::up(1));
        assert!(Lit::up(1) < Lit::down(2));
    }

    #[test]
    fn test_lit_weight() {
        assert_eq!(Lit::up(1).weight(0.9), 0.9);
        assert!((Lit::down(1).weight(0.9) - 0.1).abs() < 1e-12);
    }
}
