//! Minimal-cut-set evaluator.
//!
//! Dual of [`pathset`][crate::pathset]: the node pair is disconnected iff at
//! least one minimal cut has all its components down. The disconnection
//! probability is computed by inclusion-exclusion over the cuts and the
//! availability is its complement.
//!
//! Cuts are trusted to be minimal. A non-minimal family still evaluates
//! without error, but the result is only exact if the family describes the
//! disconnection event; use [`sets::absorb`][crate::sets::absorb] to minimise
//! a raw family first.

use log::debug;

use crate::error::{RbdError, Result};
use crate::inclusion::union_probability;
use crate::probability::ProbabilityMap;
use crate::probaset::{expand, ExpansionStep, ProbaSet};
use crate::term::Term;
use crate::topo;
use crate::types::{MinCutSets, NodeId, NodePair, SetKind};

/// Expands every cut into an "all down" term.
pub fn to_proba_set(src: NodeId, dst: NodeId, min_cut_sets: &MinCutSets) -> ProbaSet {
    to_proba_set_debug(src, dst, min_cut_sets).0
}

/// Same as [`to_proba_set`], also returning one expansion step per cut.
pub fn to_proba_set_debug(src: NodeId, dst: NodeId, min_cut_sets: &MinCutSets) -> (ProbaSet, Vec<ExpansionStep>) {
    expand(src, dst, min_cut_sets, |components| Term::all_down(components))
}

pub(crate) fn validate(src: NodeId, dst: NodeId, probs: &ProbabilityMap, min_cut_sets: &MinCutSets) -> Result<()> {
    if min_cut_sets.is_empty() {
        return Err(RbdError::EmptyInput {
            src,
            dst,
            kind: SetKind::MinCutSets,
        });
    }
    probs.check_all(min_cut_sets)
}

/// Exact probability that `src` and `dst` are connected, from the cuts.
///
/// A cut with no components is always down, so its presence makes the result
/// exactly `0`.
pub fn eval_avail(src: NodeId, dst: NodeId, probs: &ProbabilityMap, min_cut_sets: &MinCutSets) -> Result<f64> {
    validate(src, dst, probs, min_cut_sets)?;

    if min_cut_sets.iter().any(|c| c.is_empty()) {
        debug!("mcs::eval_avail({}, {}): empty cut, never connected", src, dst);
        return Ok(0.0);
    }

    let unavail = union_probability(min_cut_sets, |c| probs.get(c).map(|p| 1.0 - p))?;
    let avail = 1.0 - unavail;
    debug!("mcs::eval_avail({}, {}) = {} over {} cuts", src, dst, avail, min_cut_sets.len());
    Ok(avail)
}

pub fn eval_avail_topo(
    pairs: &[NodePair],
    probs: &ProbabilityMap,
    min_cut_sets_list: &[MinCutSets],
) -> Result<Vec<f64>> {
    topo::run(
        pairs,
        min_cut_sets_list,
        |src, dst, sets| validate(src, dst, probs, sets),
        |src, dst, sets| eval_avail(src, dst, probs, sets),
    )
}

pub fn eval_avail_topo_parallel(
    pairs: &[NodePair],
    probs: &ProbabilityMap,
    min_cut_sets_list: &[MinCutSets],
) -> Result<Vec<f64>> {
    topo::run_parallel(
        pairs,
        min_cut_sets_list,
        |src, dst, sets| validate(src, dst, probs, sets),
        |src, dst, sets| eval_avail(src, dst, probs, sets),
    )
}
