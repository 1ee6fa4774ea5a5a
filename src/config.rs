//! Worker pool configuration.
//!
//! Parallel entry points (`*_parallel`) run on whatever rayon pool is current.
//! By default that is rayon's global pool. [`EvalConfig::install`] builds a
//! dedicated pool of a fixed size and runs a closure inside it, so every
//! parallel call made from that closure uses exactly that many workers.
//!
//! # Example
//!
//! ```
//! use rbd_rs::config::EvalConfig;
//! use rbd_rs::probability::ProbabilityMap;
//! use rbd_rs::sdp;
//!
//! let probs = ProbabilityMap::new([(1, 0.9), (2, 0.8)]).unwrap();
//! let pairs = vec![(1, 2)];
//! let paths = vec![vec![vec![1], vec![2]]];
//!
//! let config = EvalConfig::default().with_num_threads(2);
//! let res = config
//!     .install(|| sdp::eval_avail_topo_parallel(&pairs, &probs, &paths))
//!     .unwrap()
//!     .unwrap();
//! assert!((res[0] - 0.98).abs() < 1e-12);
//! ```

use log::debug;

use crate::error::Result;

/// Sizing of the worker pool used by parallel evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Number of worker threads (default: number of logical CPUs).
    pub num_threads: usize,
    /// Prefix for worker thread names (default: "rbd-worker").
    pub thread_name: String,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            thread_name: "rbd-worker".to_string(),
        }
    }
}

impl EvalConfig {
    /// Sets the number of worker threads. Zero falls back to one.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Builds a dedicated pool with this configuration.
    pub fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let prefix = self.thread_name.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads.max(1))
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()?;
        debug!("built worker pool with {} threads", pool.current_num_threads());
        Ok(pool)
    }

    /// Runs `op` inside a dedicated pool with this configuration.
    pub fn install<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        let pool = self.build_pool()?;
        Ok(pool.install(op))
    }
}
