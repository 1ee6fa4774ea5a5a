//! Inclusion-exclusion over families of component sets.
//!
//! Given sets `S1..Sn` and a per-component weight `w(c)` (`p` for paths,
//! `1 - p` for cuts), this computes the probability that at least one set has
//! every component in the weighted state:
//!
//! ```text
//! P(E1 ∪ … ∪ En) = Σ_{∅≠I⊆{1..n}} (-1)^(|I|+1) · Π_{c ∈ ∪_{i∈I} Si} w(c)
//! ```
//!
//! The sum has `2^n - 1` summands, so this is only meant for small families
//! and as a reference for the SDP evaluator.

use log::trace;

use crate::error::Result;
use crate::mask::{ComponentMask, SlotIndex};
use crate::types::ComponentId;

/// Probability that at least one of `sets` is fully in the weighted state.
///
/// Weights are resolved once per distinct component before the expansion
/// starts, so a failing lookup aborts early. An empty family yields `0`, and
/// a family containing an empty set yields `1`.
pub fn union_probability<S, W>(sets: &[S], weight: W) -> Result<f64>
where
    S: AsRef<[ComponentId]>,
    W: Fn(ComponentId) -> Result<f64>,
{
    if sets.iter().any(|s| s.as_ref().is_empty()) {
        return Ok(1.0);
    }

    let index = SlotIndex::build(sets);
    let weights = index
        .components()
        .iter()
        .map(|&c| weight(c))
        .collect::<Result<Vec<f64>>>()?;
    let masks: Vec<ComponentMask> = sets.iter().map(|s| index.mask(s.as_ref())).collect();

    let mut total = 0.0;
    let mut visited = 0usize;
    visit(&masks, &weights, 0, &ComponentMask::new(index.len()), 1, &mut total, &mut visited);
    trace!("union_probability: {} sets, {} subsets, result {}", sets.len(), visited, total);
    Ok(total)
}

/// Depth-first walk over subsets, extending the current union with each
/// later set in turn so every non-empty subset is visited exactly once.
fn visit(
    masks: &[ComponentMask],
    weights: &[f64],
    start: usize,
    union: &ComponentMask,
    depth: usize,
    total: &mut f64,
    visited: &mut usize,
) {
    for i in start..masks.len() {
        let next = union.union(&masks[i]);
        let product: f64 = next.iter().map(|slot| weights[slot]).product();
        if depth % 2 == 1 {
            *total += product;
        } else {
            *total -= product;
        }
        *visited += 1;
        visit(masks, weights, i + 1, &next, depth + 1, total, visited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::error::RbdError;

    fn w(c: ComponentId) -> Result<f64> {
        match c {
            1 => Ok(0.9),
            2 => Ok(0.8),
            3 => Ok(0.7),
            _ => Err(RbdError::UnknownComponent(c)),
        }
    }

    #[test]
    fn test_single_set() {
        let p = union_probability(&[vec![1, 2]], w).unwrap();
        assert!((p - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_two_disjoint_sets() {
        let p = union_probability(&[vec![1], vec![2]], w).unwrap();
        assert!((p - (0.9 + 0.8 - 0.72)).abs() < 1e-12);
    }

    #[test]
    fn test_overlapping_sets() {
        // P(12 ∪ 23) = p1p2 + p2p3 - p1p2p3
        let p = union_probability(&[vec![1, 2], vec![2, 3]], w).unwrap();
        let expected = 0.72 + 0.56 - 0.9 * 0.8 * 0.7;
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_sets() {
        let once = union_probability(&[vec![1, 2]], w).unwrap();
        let twice = union_probability(&[vec![1, 2], vec![2, 1]], w).unwrap();
        assert!((once - twice).abs() < 1e-12);
    }

    #[test]
    fn test_empty_family_and_empty_set() {
        let none: [Vec<ComponentId>; 0] = [];
        assert_eq!(union_probability(&none, w).unwrap(), 0.0);
        assert_eq!(union_probability(&[vec![1], vec![]], w).unwrap(), 1.0);
    }

    #[test]
    fn test_unknown_weight_fails() {
        assert!(matches!(
            union_probability(&[vec![1], vec![2, 9]], w),
            Err(RbdError::UnknownComponent(9))
        ));
    }
}
