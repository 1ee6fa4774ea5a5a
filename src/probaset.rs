//! Structural form shared by the path and cut evaluators.

use std::fmt;

use crate::term::{fmt_sum, Term};
use crate::types::{ComponentId, NodeId};

/// One term per input set, tagged with the node pair it belongs to.
///
/// For path sets the terms are "all up" conjunctions whose disjunction is the
/// connectivity event; for cut sets they are "all down" conjunctions whose
/// disjunction is the disconnection event. Terms are not disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbaSet {
    pub src: NodeId,
    pub dst: NodeId,
    pub terms: Vec<Term>,
}

impl ProbaSet {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }
}

impl fmt::Display for ProbaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): ", self.src, self.dst)?;
        fmt_sum(f, &self.terms)
    }
}

/// Intermediate record of how one input set became a term.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionStep {
    /// Position of the set in the input family.
    pub index: usize,
    /// The set as given.
    pub raw: Vec<ComponentId>,
    /// Sorted, deduplicated components.
    pub components: Vec<ComponentId>,
    pub term: Term,
}

impl fmt::Display for ExpansionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?} -> {:?} -> {}", self.index, self.raw, self.components, self.term)
    }
}

pub(crate) fn expand<S, F>(src: NodeId, dst: NodeId, sets: &[S], mk_term: F) -> (ProbaSet, Vec<ExpansionStep>)
where
    S: AsRef<[ComponentId]>,
    F: Fn(Vec<ComponentId>) -> Term,
{
    let mut terms = Vec::with_capacity(sets.len());
    let mut steps = Vec::with_capacity(sets.len());
    for (index, set) in sets.iter().enumerate() {
        let raw = set.as_ref().to_vec();
        let components = crate::sets::normalize(&raw);
        let term = mk_term(components.clone());
        terms.push(term.clone());
        steps.push(ExpansionStep {
            index,
            raw,
            components,
            term,
        });
    }
    (ProbaSet { src, dst, terms }, steps)
}
