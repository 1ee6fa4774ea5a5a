//! Sum of Disjoint Products.
//!
//! Given ordered paths `P1..Pn`, the SDP transform rewrites the connectivity
//! event `P1 ∪ … ∪ Pn` as a union of pairwise mutually exclusive terms, so the
//! availability is a plain sum of term probabilities:
//!
//! ```text
//! T1 = P1
//! Ti = Pi ∧ ¬P1 ∧ … ∧ ¬P(i-1)
//! ```
//!
//! Each `Ti` starts as the single "all up" cube of `Pi` and is then folded
//! over the earlier paths. Folding in `¬Pj` replaces every partial term `t`
//! with `t ∧ ¬Pj`, expanded with [`Term::and_complement`]: components of `Pj`
//! already fixed up by `t` are skipped, and the remaining ones are complemented
//! with the first-literal rule (`¬a + a¬b + ab¬c + …`). A partial term that
//! already fixes some component of `Pj` down is kept as is; one that implies
//! `Pj` is dropped.
//!
//! Terms of `Ti` are disjoint from each other by construction, and from every
//! term of `Tj` (`j < i`) because they require `Pj` to have failed.
//!
//! # Parallelism
//!
//! The fold over `j` is sequential, but the `n` folds only read the input
//! cubes, so [`to_sdp_set_parallel`] runs them as independent tasks. Inside a
//! fold, once the partial-term list reaches [`PAR_EXPAND_THRESHOLD`] terms,
//! the per-term expansion fans out as well. Both paths yield the same terms in
//! the same order as [`to_sdp_set`].
//!
//! # Example
//!
//! ```
//! use rbd_rs::probability::ProbabilityMap;
//! use rbd_rs::sdp;
//!
//! let paths = vec![vec![1], vec![2]];
//! let set = sdp::to_sdp_set(1, 2, &paths);
//! assert_eq!(set.to_string(), "(1, 2): x1 + ¬x1 x2");
//!
//! let probs = ProbabilityMap::new([(1, 0.9), (2, 0.8)]).unwrap();
//! let a = sdp::eval_avail(1, 2, &probs, &paths).unwrap();
//! assert!((a - 0.98).abs() < 1e-12);
//! ```

use std::fmt;

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{RbdError, Result};
use crate::probability::ProbabilityMap;
use crate::term::{fmt_sum, Term};
use crate::topo;
use crate::types::{NodeId, NodePair, PathSets, SetKind};

/// Partial-term count from which a complement step expands in parallel.
pub const PAR_EXPAND_THRESHOLD: usize = 64;

/// Pairwise mutually exclusive terms whose union is the connectivity event.
#[derive(Debug, Clone, PartialEq)]
pub struct SdpSet {
    pub src: NodeId,
    pub dst: NodeId,
    pub terms: Vec<Term>,
}

impl SdpSet {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    /// Sum of term probabilities, in term order.
    pub fn probability(&self, probs: &ProbabilityMap) -> Result<f64> {
        self.terms.iter().map(|t| t.probability(probs)).sum()
    }

    /// Checks that no two terms can hold at once.
    pub fn is_pairwise_disjoint(&self) -> bool {
        self.terms
            .iter()
            .enumerate()
            .all(|(i, a)| self.terms[i + 1..].iter().all(|b| a.is_disjoint_with(b)))
    }
}

impl fmt::Display for SdpSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}): ", self.src, self.dst)?;
        fmt_sum(f, &self.terms)
    }
}

fn path_cubes(path_sets: &PathSets) -> Vec<Term> {
    path_sets.iter().map(|p| Term::all_up(p.iter().copied())).collect()
}

/// One complement step: `partial ∧ ¬cube`, term by term, order preserved.
fn complement_step(partial: Vec<Term>, cube: &Term, parallel: bool) -> Vec<Term> {
    if parallel && partial.len() >= PAR_EXPAND_THRESHOLD {
        partial
            .par_iter()
            .flat_map_iter(|t| t.and_complement(cube))
            .collect()
    } else {
        partial.iter().flat_map(|t| t.and_complement(cube)).collect()
    }
}

/// Disjoint terms contributed by path `i`, folded over the earlier paths.
fn disjoint_terms(cubes: &[Term], i: usize, parallel: bool) -> Vec<Term> {
    let terms = cubes[..i].iter().fold(vec![cubes[i].clone()], |partial, cube| {
        if partial.is_empty() {
            partial
        } else {
            complement_step(partial, cube, parallel)
        }
    });
    trace!("sdp: path #{} -> {} terms", i, terms.len());
    terms
}

/// Builds the disjoint term set for one node pair, serially.
///
/// Path order is kept as given; it shapes the terms but not their total
/// probability.
pub fn to_sdp_set(src: NodeId, dst: NodeId, path_sets: &PathSets) -> SdpSet {
    let cubes = path_cubes(path_sets);
    let terms: Vec<Term> = (0..cubes.len())
        .flat_map(|i| disjoint_terms(&cubes, i, false))
        .collect();
    debug!(
        "sdp::to_sdp_set({}, {}): {} paths -> {} terms",
        src,
        dst,
        path_sets.len(),
        terms.len()
    );
    SdpSet { src, dst, terms }
}

/// Builds the same set as [`to_sdp_set`] on the current rayon pool.
pub fn to_sdp_set_parallel(src: NodeId, dst: NodeId, path_sets: &PathSets) -> SdpSet {
    let cubes = path_cubes(path_sets);
    let mut per_path = Vec::with_capacity(cubes.len());
    (0..cubes.len())
        .into_par_iter()
        .map(|i| disjoint_terms(&cubes, i, true))
        .collect_into_vec(&mut per_path);
    let terms: Vec<Term> = per_path.into_iter().flatten().collect();
    debug!(
        "sdp::to_sdp_set_parallel({}, {}): {} paths -> {} terms",
        src,
        dst,
        path_sets.len(),
        terms.len()
    );
    SdpSet { src, dst, terms }
}

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

/// Exact availability as the sum of the disjoint term probabilities.
pub fn eval_avail(src: NodeId, dst: NodeId, probs: &ProbabilityMap, path_sets: &PathSets) -> Result<f64> {
    validate(src, dst, probs, path_sets)?;
    if path_sets.iter().any(|p| p.is_empty()) {
        debug!("sdp::eval_avail({}, {}): empty path, always connected", src, dst);
        return Ok(1.0);
    }
    let avail = to_sdp_set(src, dst, path_sets).probability(probs)?;
    debug!("sdp::eval_avail({}, {}) = {}", src, dst, avail);
    Ok(avail)
}

/// [`eval_avail`] using [`to_sdp_set_parallel`].
///
/// Term probabilities are computed in parallel but summed in term order, so
/// the result is bit-identical to [`eval_avail`].
pub fn eval_avail_parallel(src: NodeId, dst: NodeId, probs: &ProbabilityMap, path_sets: &PathSets) -> Result<f64> {
    validate(src, dst, probs, path_sets)?;
    if path_sets.iter().any(|p| p.is_empty()) {
        debug!("sdp::eval_avail_parallel({}, {}): empty path, always connected", src, dst);
        return Ok(1.0);
    }
    let set = to_sdp_set_parallel(src, dst, path_sets);
    let mut weights = Vec::with_capacity(set.len());
    set.terms
        .par_iter()
        .map(|t| t.probability(probs))
        .collect_into_vec(&mut weights);
    let avail = weights.into_iter().sum::<Result<f64>>()?;
    debug!("sdp::eval_avail_parallel({}, {}) = {}", src, dst, avail);
    Ok(avail)
}

pub fn eval_avail_topo(pairs: &[NodePair], probs: &ProbabilityMap, path_sets_list: &[PathSets]) -> Result<Vec<f64>> {
    topo::run(
        pairs,
        path_sets_list,
        |src, dst, sets| validate(src, dst, probs, sets),
        |src, dst, sets| eval_avail(src, dst, probs, sets),
    )
}

/// Pair-level parallel batch. Each pair runs the serial transform inside its
/// own task, since pairs already saturate the pool.
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

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::types::Lit;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    /// Bridge network: paths over links a=1, b=2, c=3, d=4, e=5.
    fn bridge() -> PathSets {
        vec![vec![1, 4], vec![2, 5], vec![1, 3, 5], vec![2, 3, 4]]
    }

    #[test]
    fn test_two_parallel_paths() {
        let set = to_sdp_set(1, 2, &vec![vec![1], vec![2]]);
        assert_eq!(set.terms, vec![Term::all_up([1]), Term::from_lits([Lit::down(1), Lit::up(2)])]);
    }

    #[test]
    fn test_overlapping_paths() {
        // P1 = x1 x2, P2 = x2 x3: x2 is already up, only x1 is complemented.
        let set = to_sdp_set(0, 1, &vec![vec![1, 2], vec![2, 3]]);
        assert_eq!(set.to_string(), "(0, 1): x1 x2 + ¬x1 x2 x3");
    }

    #[test]
    fn test_first_literal_rule() {
        let set = to_sdp_set(0, 1, &vec![vec![1, 2, 3], vec![4]]);
        let rendered: Vec<_> = set.iter().map(|t| t.to_string()).collect();
        assert_eq!(rendered, vec!["x1 x2 x3", "¬x1 x4", "x1 ¬x2 x4", "x1 x2 ¬x3 x4"]);
    }

    #[test]
    fn test_superset_path_vanishes() {
        // P2 ⊇ P1, so P2 ∧ ¬P1 is impossible.
        let set = to_sdp_set(0, 1, &vec![vec![1], vec![1, 2]]);
        assert_eq!(set.terms, vec![Term::all_up([1])]);
    }

    #[test]
    fn test_bridge_is_disjoint_and_exact() {
        let probs = ProbabilityMap::new((1..=5).map(|c| (c, 0.9))).unwrap();
        let set = to_sdp_set(0, 1, &bridge());
        assert!(set.is_pairwise_disjoint());

        // 2p² + 2p³ - 5p⁴ + 2p⁵ at p = 0.9
        let p: f64 = 0.9;
        let expected = 2.0 * p.powi(2) + 2.0 * p.powi(3) - 5.0 * p.powi(4) + 2.0 * p.powi(5);
        assert_close(set.probability(&probs).unwrap(), expected);
        assert_close(eval_avail(0, 1, &probs, &bridge()).unwrap(), expected);
    }

    #[test]
    fn test_parallel_transform_matches_serial() {
        let paths = bridge();
        assert_eq!(to_sdp_set(3, 4, &paths), to_sdp_set_parallel(3, 4, &paths));
    }

    #[test]
    fn test_parallel_transform_large_fanout() {
        // Ten disjoint 3-component paths: the partial-term list of the last
        // path grows to 3^9 terms, well past the parallel threshold.
        let paths: PathSets = (0..10).map(|k| vec![3 * k, 3 * k + 1, 3 * k + 2]).collect();
        let serial = to_sdp_set(0, 1, &paths);
        let parallel = to_sdp_set_parallel(0, 1, &paths);
        assert_eq!(serial, parallel);

        let probs = ProbabilityMap::new((0..30).map(|c| (c, 0.5))).unwrap();
        let expected = 1.0 - (1.0 - 0.125f64).powi(10);
        assert_close(serial.probability(&probs).unwrap(), expected);
        assert_eq!(
            eval_avail(0, 1, &probs, &paths).unwrap(),
            eval_avail_parallel(0, 1, &probs, &paths).unwrap()
        );
    }

    #[test]
    fn test_empty_path() {
        let probs = ProbabilityMap::new([(1, 0.3)]).unwrap();
        let paths = vec![vec![], vec![1]];
        let set = to_sdp_set(0, 1, &paths);
        assert_eq!(set.terms, vec![Term::one()]);
        assert_eq!(eval_avail(0, 1, &probs, &paths).unwrap(), 1.0);
        assert_eq!(eval_avail_parallel(0, 1, &probs, &paths).unwrap(), 1.0);

        // An empty path later in the list still adds exactly the missing mass.
        let set = to_sdp_set(0, 1, &vec![vec![1], vec![]]);
        assert_close(set.probability(&probs).unwrap(), 1.0);
    }

    #[test]
    fn test_errors() {
        let probs = ProbabilityMap::new([(1, 0.3)]).unwrap();
        assert!(matches!(
            eval_avail(0, 1, &probs, &vec![]),
            Err(RbdError::EmptyInput { .. })
        ));
        assert!(matches!(
            eval_avail_parallel(0, 1, &probs, &vec![vec![1, 2]]),
            Err(RbdError::UnknownComponent(2))
        ));
    }

    #[test]
    fn test_topo() {
        let probs = ProbabilityMap::new([(1, 0.9), (2, 0.95), (3, 0.8)]).unwrap();
        let pairs = vec![(1, 2), (2, 3)];
        let lists = vec![vec![vec![1, 2]], vec![vec![1], vec![3]]];
        let res = eval_avail_topo(&pairs, &probs, &lists).unwrap();
        assert_close(res[0], 0.855);
        assert_close(res[1], 0.98);
        assert_eq!(res, eval_avail_topo_parallel(&pairs, &probs, &lists).unwrap());
    }
}
