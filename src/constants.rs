//! Sampling policy constants shared with the measurement scheduler.
//!
//! Both values are `const` items, so they are available before any runtime
//! initialization and every reader observes the same value.

/// Elapsed-time base units (microseconds) in one second.
///
/// Stored as `f64` so it can be used directly as a divisor in rate
/// computations without an integer-to-float conversion at each call site.
pub const TIME_UNITS_PER_SECOND: f64 = 1_000_000.0;

/// Number of independent timing samples a benchmark run takes by default.
///
/// 30 is the usual minimum for treating the distribution of sample means as
/// approximately normal.
pub const DEFAULT_SAMPLE_COUNT: usize = 30;

/// Convert a duration in time units to seconds.
#[inline]
pub fn units_to_seconds(units: f64) -> f64 {
    units / TIME_UNITS_PER_SECOND
}

/// Convert a duration in seconds to time units.
#[inline]
pub fn seconds_to_units(seconds: f64) -> f64 {
    seconds * TIME_UNITS_PER_SECOND
}

/// Operations per second for `operations` completed in `elapsed_units`.
///
/// A zero elapsed time yields `f64::INFINITY` when work was done and `0.0`
/// when it wasn't.
pub fn per_second(operations: f64, elapsed_units: f64) -> f64 {
    if elapsed_units == 0.0 {
        return if operations == 0.0 { 0.0 } else { f64::INFINITY };
    }
    operations * TIME_UNITS_PER_SECOND / elapsed_units
}
