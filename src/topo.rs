//! Batch evaluation over many node pairs.
//!
//! Every algorithm family exposes `eval_avail_topo` and
//! `eval_avail_topo_parallel`; both delegate here. Pairs are independent, so
//! the parallel driver simply fans them out over the current rayon pool (see
//! [`EvalConfig::install`][crate::config::EvalConfig::install] for a pool of
//! fixed size).
//!
//! # Failure policy
//!
//! A batch either succeeds for every pair or fails as a whole:
//!
//! 1. every pair is validated before any evaluation starts;
//! 2. if any pair is invalid, the call returns
//!    [`RbdError::BatchPartialFailure`] listing *every* invalid pair in
//!    ascending index order, and nothing is evaluated;
//! 3. otherwise all pairs are evaluated and results are returned index-aligned
//!    with the input pairs.
//!
//! Serial and parallel drivers share this policy, so they report the same
//! error for the same input.

use log::debug;
use rayon::prelude::*;

use crate::error::{PairFailure, RbdError, Result};
use crate::types::{NodeId, NodePair};

fn check_shape<S>(pairs: &[NodePair], sets_list: &[S]) -> Result<()> {
    if pairs.len() != sets_list.len() {
        return Err(RbdError::LengthMismatch {
            pairs: pairs.len(),
            sets: sets_list.len(),
        });
    }
    Ok(())
}

/// Turns per-pair results into the batch result.
fn gather<T>(pairs: &[NodePair], results: Vec<Result<T>>) -> Result<Vec<T>> {
    let total = results.len();
    let mut values = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for (index, res) in results.into_iter().enumerate() {
        match res {
            Ok(v) => values.push(v),
            Err(error) => failures.push(PairFailure {
                index,
                pair: pairs[index],
                error,
            }),
        }
    }
    if failures.is_empty() {
        Ok(values)
    } else {
        debug!("batch: {} of {} pairs failed", failures.len(), total);
        Err(RbdError::BatchPartialFailure { total, failures })
    }
}

/// Serial batch on the caller's thread.
pub(crate) fn run<S, V, E>(pairs: &[NodePair], sets_list: &[S], validate: V, evaluate: E) -> Result<Vec<f64>>
where
    V: Fn(NodeId, NodeId, &S) -> Result<()>,
    E: Fn(NodeId, NodeId, &S) -> Result<f64>,
{
    check_shape(pairs, sets_list)?;
    debug!("batch: {} pairs (serial)", pairs.len());

    let checked: Vec<Result<()>> = pairs
        .iter()
        .zip(sets_list)
        .map(|(&(src, dst), sets)| validate(src, dst, sets))
        .collect();
    gather(pairs, checked)?;

    let results: Vec<Result<f64>> = pairs
        .iter()
        .zip(sets_list)
        .map(|(&(src, dst), sets)| evaluate(src, dst, sets))
        .collect();
    gather(pairs, results)
}

/// Parallel batch: one unit of work per pair.
///
/// Results land in a pre-sized, index-addressed buffer, so the output order
/// never depends on completion order.
pub(crate) fn run_parallel<S, V, E>(pairs: &[NodePair], sets_list: &[S], validate: V, evaluate: E) -> Result<Vec<f64>>
where
    S: Sync,
    V: Fn(NodeId, NodeId, &S) -> Result<()> + Sync,
    E: Fn(NodeId, NodeId, &S) -> Result<f64> + Sync,
{
    check_shape(pairs, sets_list)?;
    debug!(
        "batch: {} pairs (parallel, {} threads)",
        pairs.len(),
        rayon::current_num_threads()
    );

    let mut checked = Vec::with_capacity(pairs.len());
    pairs
        .par_iter()
        .zip(sets_list)
        .map(|(&(src, dst), sets)| validate(src, dst, sets))
        .collect_into_vec(&mut checked);
    gather(pairs, checked)?;

    let mut results = Vec::with_capacity(pairs.len());
    pairs
        .par_iter()
        .zip(sets_list)
        .map(|(&(src, dst), sets)| evaluate(src, dst, sets))
        .collect_into_vec(&mut results);
    gather(pairs, results)
}
