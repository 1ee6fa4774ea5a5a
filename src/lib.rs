//! # rbd-rs: Reliability Block Diagram availability in Rust
//!
//! **`rbd-rs`** computes the probability that two nodes of a network stay
//! connected when every component (node or link) independently works with a
//! known probability. The connectivity structure between a node pair is given
//! either as **path sets** (components that must all work) or as **minimal
//! cut sets** (components whose joint failure disconnects the pair).
//!
//! ## Algorithm families
//!
//! | Module | Input | Method | Cost |
//! |--------|-------|--------|------|
//! | [`pathset`] | path sets | inclusion-exclusion | `2^n` in the number of paths |
//! | [`mcs`] | minimal cut sets | inclusion-exclusion, complemented | `2^n` in the number of cuts |
//! | [`sdp`] | path sets | sum of disjoint products | number of disjoint terms |
//!
//! Each family offers a structural transform (`to_*`), a single-pair
//! evaluation (`eval_avail`), and a topology batch (`eval_avail_topo`,
//! `eval_avail_topo_parallel`) over many independent node pairs.
//!
//! ## Quick Start
//!
//! ```rust
//! use rbd_rs::probability::ProbabilityMap;
//! use rbd_rs::{mcs, pathset, sdp};
//!
//! // Two redundant components between nodes 1 and 2.
//! let probs = ProbabilityMap::new([(10, 0.9), (11, 0.8)]).unwrap();
//! let paths = vec![vec![10], vec![11]];
//! let cuts = vec![vec![10, 11]];
//!
//! let a = sdp::eval_avail(1, 2, &probs, &paths).unwrap();
//! let b = pathset::eval_avail(1, 2, &probs, &paths).unwrap();
//! let c = mcs::eval_avail(1, 2, &probs, &cuts).unwrap();
//! assert!((a - 0.98).abs() < 1e-12);
//! assert!((a - b).abs() < 1e-12);
//! assert!((a - c).abs() < 1e-12);
//! ```
//!
//! ## Errors and batches
//!
//! Inputs are validated before any expansion starts: an empty family, a
//! component missing from the [`ProbabilityMap`][crate::probability::ProbabilityMap]
//! or a probability outside `[0, 1]` is reported as an
//! [`RbdError`][crate::error::RbdError], never replaced by a default. A batch
//! fails as a whole and names every failing pair; see [`topo`] for the exact
//! policy.
//!
//! ## Threads
//!
//! Only `*_parallel` functions spawn work, on the current rayon pool. Use
//! [`EvalConfig::install`][crate::config::EvalConfig::install] to pin the
//! pool size.

pub mod config;
pub mod error;
pub mod inclusion;
pub mod mask;
pub mod mcs;
pub mod pathset;
pub mod probability;
pub mod probaset;
pub mod sdp;
pub mod sets;
pub mod term;
pub mod topo;
pub mod types;
