//! # timing-barrier
//!
//! Keep benchmarked work alive under an optimizing compiler.
//!
//! This crate provides the measurement-integrity core of a microbenchmark
//! harness:
//! - [`barrier`]: forces the compiler to treat a value as used, so the work
//!   that produced it can't be eliminated or hoisted out of a timed loop
//! - [`TIME_UNITS_PER_SECOND`] and [`DEFAULT_SAMPLE_COUNT`]: the defaults a
//!   scheduler uses for unit conversion and sample count
//!
//! ## ⚠️ Common Pitfall: Discarded Results
//!
//! A result that is never used can be proven dead, and the loop that computes
//! it then measures nothing.
//!
//! ```ignore
//! // ❌ WRONG - `hash` is unused, the whole call may be removed
//! for _ in 0..iters {
//!     let hash = compute(&input);
//! }
//!
//! // ✅ CORRECT - the barrier keeps `hash` (and `compute`) alive
//! for _ in 0..iters {
//!     let hash = compute(&input);
//!     timing_barrier::barrier(&hash);
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Instant;
//! use timing_barrier::{barrier, SamplingPolicy};
//!
//! let policy = SamplingPolicy::default().from_env();
//! let mut samples = Vec::with_capacity(policy.sample_count);
//! for _ in 0..policy.sample_count {
//!     let start = Instant::now();
//!     let sum: u64 = (0..10_000u64).sum();
//!     barrier(&sum);
//!     samples.push(start.elapsed().as_micros() as f64);
//! }
//! let mean_secs = policy.to_seconds(samples.iter().sum::<f64>() / samples.len() as f64);
//! assert!(mean_secs >= 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod constants;

pub mod barrier;

pub use barrier::{barrier, barrier_with, black_box, Guarded, Observer, RawBytes, StdoutSink};
pub use barrier::{current_process_is_sentinel, DEFAULT_OBSERVER, SENTINEL_PROCESS_ID};
pub use config::{PolicyError, SamplingPolicy, ENV_SAMPLES, ENV_TIME_UNITS_PER_SECOND};
pub use constants::{
    per_second, seconds_to_units, units_to_seconds, DEFAULT_SAMPLE_COUNT, TIME_UNITS_PER_SECOND,
};
