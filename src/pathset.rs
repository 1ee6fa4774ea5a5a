//! Path-set evaluator.
//!
//! The node pair is connected iff at least one path has all its components
//! up. This evaluator computes that probability exactly by inclusion-exclusion
//! over the paths, which costs `2^n - 1` products for `n` paths. It is the
//! reference the [`sdp`][crate::sdp] evaluator is checked against, and the
//! right choice only for small path families.
//!
//! # Example
//!
//! ```
//! use rbd_rs::pathset;
//! use rbd_rs::probability::ProbabilityMap;
//!
//! // Two redundant single-component paths.
//! let probs = ProbabilityMap::new([(1, 0.9), (2, 0.8)]).unwrap();
//! let a = pathset::eval_avail(1, 2, &probs, &vec![vec![1], vec![2]]).unwrap();
//! assert!((a - 0.98).abs() < 1e-12);
//! ```

use log::debug;

use crate::error::{RbdError, Result};
use crate::inclusion::union_probability;
use crate::probability::ProbabilityMap;
use crate::probaset::{expand, ExpansionStep, ProbaSet};
use crate::term::Term;
use crate::topo;
use crate::types::{NodeId, NodePair, PathSets, SetKind};

/// Expands every path into an "all up" term.
pub fn to_proba_set(src: NodeId, dst: NodeId, path_sets: &PathSets) -> ProbaSet {
    to_proba_set_debug(src, dst, path_sets).0
}

/// Same as [`to_proba_set`], also returning one expansion step per path.
pub fn to_proba_set_debug(src: NodeId, dst: NodeId, path_sets: &PathSets) -> (ProbaSet, Vec<ExpansionStep>) {
    expand(src, dst, path_sets, |components| Term::all_up(components))
}

/// Rejects empty families and unknown components.
pub(crate) fn validate(src: NodeId, dst: NodeId, probs: &ProbabilityMap, path_sets: &PathSets) -> Result<()> {
    if path_sets.is_empty() {
        return Err(RbdError::EmptyInput {
            src,
            dst,
            kind: SetKind::PathSets,
        });
    }
    probs.check_all(path_sets)
}

/// Exact probability that `src` and `dst` are connected.
///
/// A path with no components is always up, so its presence makes the result
/// exactly `1`.
pub fn eval_avail(src: NodeId, dst: NodeId, probs: &ProbabilityMap, path_sets: &PathSets) -> Result<f64> {
    validate(src, dst, probs, path_sets)?;

    if path_sets.iter().any(|p| p.is_empty()) {
        debug!("pathset::eval_avail({}, {}): empty path, always connected", src, dst);
        return Ok(1.0);
    }

    let avail = union_probability(path_sets, |c| probs.get(c))?;
    debug!("pathset::eval_avail({}, {}) = {} over {} paths", src, dst, avail, path_sets.len());
    Ok(avail)
}

/// [`eval_avail`] for every pair, on the caller's thread.
pub fn eval_avail_topo(pairs: &[NodePair], probs: &ProbabilityMap, path_sets_list: &[PathSets]) -> Result<Vec<f64>> {
    topo::run(
        pairs,
        path_sets_list,
        |src, dst, sets| validate(src, dst, probs, sets),
        |src, dst, sets| eval_avail(src, dst, probs, sets),
    )
}

/// [`eval_avail`] for every pair, one pair per worker task.
pub fn eval_avail_topo_parallel(
    pairs: &[NodePair],
    probs: &ProbabilityMap,
    path_sets_list: &[PathSets],
) -> Result<Vec<f64>> {
    topo::run_parallel(
        pairs,
        path_sets_list,
        |src, dst, sets| validate(src, dst, probs, sets),
        |src, dst, sets| eval_avail(src, dst, probs, sets),
    )
}
