//! Clean-up of raw path and cut families.
//!
//! Enumeration tools often hand over sets with repeated components or
//! families in which some sets are supersets of others. [`normalize`] fixes
//! the first; [`absorb`] the second. Evaluators never call [`absorb`] on the
//! caller's behalf, since it changes the family.

use log::debug;

use crate::mask::{ComponentMask, SlotIndex};
use crate::types::ComponentId;

/// Sorts a set and drops repeated components.
pub fn normalize(set: &[ComponentId]) -> Vec<ComponentId> {
    let mut res = set.to_vec();
    res.sort_unstable();
    res.dedup();
    res
}

/// Minimises a family so that no set contains another.
///
/// Keeps, in first-occurrence order, every set that has no proper subset in
/// the family and is the first of its equals. The result describes the same
/// monotone structure: a union of path events (or cut events) is unchanged by
/// dropping supersets, since a superset's event implies its subset's event.
/// Each returned set is normalised.
pub fn absorb<S: AsRef<[ComponentId]>>(sets: &[S]) -> Vec<Vec<ComponentId>> {
    let index = SlotIndex::build(sets);
    let masks: Vec<ComponentMask> = sets.iter().map(|s| index.mask(s.as_ref())).collect();

    let mut kept = Vec::new();
    for (i, mask) in masks.iter().enumerate() {
        let absorbed = masks.iter().enumerate().any(|(j, other)| {
            if i == j || !other.is_subset_of(mask) {
                return false;
            }
            // `other` is a proper subset, or an equal set seen earlier.
            !mask.is_subset_of(other) || j < i
        });
        if !absorbed {
            kept.push(normalize(sets[i].as_ref()));
        }
    }

    debug!("absorb: {} sets -> {} sets", sets.len(), kept.len());
    kept
}
