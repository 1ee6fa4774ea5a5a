//! Conjunctive terms over component states.
//!
//! A [`Term`] is a conjunction of [`Lit`]s kept sorted and deduplicated, so
//! two terms describing the same event compare equal. A term never holds both
//! states of one component: operations that would produce such a
//! contradiction return `None` (or drop the alternative) instead.
//!
//! Under independent component states, the probability of a term is the
//! product of its literal weights (`p` for up, `1 - p` for down).
//!
//! # Example
//!
//! ```
//! use rbd_rs::term::Term;
//! use rbd_rs::types::Lit;
//!
//! let path = Term::all_up([1, 2]);
//! let t = Term::from_lits([Lit::up(3)]);
//!
//! // x3 AND NOT(x1 x2) == x3 ¬x1  +  x3 x1 ¬x2
//! let alts = t.and_complement(&path);
//! assert_eq!(alts.len(), 2);
//! assert!(alts[0].is_disjoint_with(&alts[1]));
//! ```

use std::fmt;

use crate::error::Result;
use crate::probability::ProbabilityMap;
use crate::types::{ComponentId, Lit};

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Term {
    lits: Vec<Lit>,
}

impl Term {
    /// The empty conjunction, which is always true.
    pub fn one() -> Self {
        Term { lits: Vec::new() }
    }

    /// Conjunction requiring every component up. Duplicates collapse.
    pub fn all_up(components: impl IntoIterator<Item = ComponentId>) -> Self {
        Self::from_sorted(components.into_iter().map(Lit::up).collect())
    }

    /// Conjunction requiring every component down. Duplicates collapse.
    pub fn all_down(components: impl IntoIterator<Item = ComponentId>) -> Self {
        Self::from_sorted(components.into_iter().map(Lit::down).collect())
    }

    /// Builds a term from arbitrary literals.
    ///
    /// # Panics
    ///
    /// Panics if the literals fix one component both up and down.
    pub fn from_lits(lits: impl IntoIterator<Item = Lit>) -> Self {
        let term = Self::from_sorted(lits.into_iter().collect());
        assert!(
            !term.has_conflict(),
            "Term must not fix a component both up and down"
        );
        term
    }

    fn from_sorted(mut lits: Vec<Lit>) -> Self {
        lits.sort_unstable();
        lits.dedup();
        Term { lits }
    }

    fn has_conflict(&self) -> bool {
        self.lits.windows(2).any(|w| w[0].component() == w[1].component())
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Returns true for the empty (always true) conjunction.
    pub fn is_one(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.lits.iter().map(|lit| lit.component())
    }

    /// State fixed for `component`: `Some(true)` up, `Some(false)` down.
    pub fn state_of(&self, component: ComponentId) -> Option<bool> {
        self.lits
            .binary_search_by_key(&component, |lit| lit.component())
            .ok()
            .map(|i| self.lits[i].is_up())
    }

    /// Conjunction with a single literal, or `None` if it contradicts.
    pub fn and_lit(&self, lit: Lit) -> Option<Term> {
        match self.state_of(lit.component()) {
            Some(up) if up == lit.is_up() => Some(self.clone()),
            Some(_) => None,
            None => {
                let mut lits = self.lits.clone();
                let pos = lits.partition_point(|l| *l < lit);
                lits.insert(pos, lit);
                Some(Term { lits })
            }
        }
    }

    /// Conjunction with another term, or `None` if they contradict.
    pub fn and(&self, other: &Term) -> Option<Term> {
        let mut lits = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.lits.len() && j < other.lits.len() {
            let (a, b) = (self.lits[i], other.lits[j]);
            if a.component() == b.component() {
                if a != b {
                    return None;
                }
                lits.push(a);
                i += 1;
                j += 1;
            } else if a < b {
                lits.push(a);
                i += 1;
            } else {
                lits.push(b);
                j += 1;
            }
        }
        lits.extend_from_slice(&self.lits[i..]);
        lits.extend_from_slice(&other.lits[j..]);
        Some(Term { lits })
    }

    /// Returns true if the two terms can never hold together, i.e. some
    /// component is up in one and down in the other.
    pub fn is_disjoint_with(&self, other: &Term) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.lits.len() && j < other.lits.len() {
            let (a, b) = (self.lits[i], other.lits[j]);
            if a.component() == b.component() {
                if a != b {
                    return true;
                }
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    /// Complement of this conjunction as mutually exclusive alternatives.
    ///
    /// `¬(l1 l2 … lk) = ¬l1 + l1 ¬l2 + … + l1 … l(k-1) ¬lk`. The complement
    /// of the empty term is false, so it yields no alternatives.
    pub fn negate_disjoint(&self) -> Vec<Term> {
        Term::one().and_complement(self)
    }

    /// `self ∧ ¬cube` as mutually exclusive alternatives.
    ///
    /// Literals of `cube` already fixed in `self` are not re-expanded:
    /// - if `self` contradicts any literal of `cube`, it already implies
    ///   `¬cube` and is returned unchanged;
    /// - literals of `cube` that `self` already satisfies are skipped, and the
    ///   remaining free ones are complemented with the first-literal rule;
    /// - if no free literal remains, `self` implies `cube` and the result is
    ///   empty.
    pub fn and_complement(&self, cube: &Term) -> Vec<Term> {
        let mut free = Vec::with_capacity(cube.len());
        for &lit in &cube.lits {
            match self.state_of(lit.component()) {
                Some(up) if up != lit.is_up() => return vec![self.clone()],
                Some(_) => {}
                None => free.push(lit),
            }
        }

        let mut alternatives = Vec::with_capacity(free.len());
        for k in 0..free.len() {
            let mut lits = Vec::with_capacity(self.len() + k + 1);
            lits.extend_from_slice(&self.lits);
            lits.extend_from_slice(&free[..k]);
            lits.push(-free[k]);
            lits.sort_unstable();
            alternatives.push(Term { lits });
        }
        alternatives
    }

    /// Probability of the term under independent component states.
    pub fn probability(&self, probs: &ProbabilityMap) -> Result<f64> {
        let mut acc = 1.0;
        for lit in &self.lits {
            acc *= lit.weight(probs.get(lit.component())?);
        }
        Ok(acc)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lits.is_empty() {
            return write!(f, "1");
        }
        for (i, lit) in self.lits.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// Renders a sum of terms as `t1 + t2 + …`, or `0` when there are none.
pub(crate) fn fmt_sum(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    if terms.is_empty() {
        return write!(f, "0");
    }
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " + ")?;
        }
        write!(f, "{}", term)?;
    }
    Ok(())
}
