//! Optimization barrier for benchmark loops.
//!
//! A value passed to [`barrier`] is treated by the compiler as used, so the
//! computation that produced it can't be eliminated, hoisted out of the loop,
//! or constant-folded. Two mechanisms back this up:
//!
//! 1. **Escape**: the value's address is handed to an opaque asm block (or
//!    `std::hint::black_box` on other targets). The compiler must assume
//!    unseen code reads the memory.
//! 2. **Guarded side effect**: the value's raw bytes go to an [`Observer`].
//!    The default one writes a byte to stdout only when running as the
//!    init/system process, so in practice the cost is one compare and branch.
//!
//! # Example
//!
//! ```
//! use timing_barrier::{barrier, DEFAULT_SAMPLE_COUNT};
//!
//! for i in 0..DEFAULT_SAMPLE_COUNT as u64 {
//!     let sum: u64 = (0..1_000).map(|x| x * i).sum();
//!     barrier(&sum);
//! }
//! ```

mod escape;
mod observe;
mod platform;

pub use observe::{Guarded, Observer, RawBytes, StdoutSink, DEFAULT_OBSERVER};
pub use platform::{current_process_is_sentinel, SENTINEL_PROCESS_ID};

use std::hint::black_box as std_black_box;

/// Prevent the computation of `value` from being optimized away.
///
/// Works for any type, sized or not. Never allocates, never fails, and does
/// not modify `value`.
#[inline]
pub fn barrier<T: ?Sized>(value: &T) {
    barrier_with(value, &DEFAULT_OBSERVER)
}

/// Like [`barrier`], but routes the value's bytes to `observer`.
#[inline]
pub fn barrier_with<T, O>(value: &T, observer: &O)
where
    T: ?Sized,
    O: Observer + ?Sized,
{
    let bytes = RawBytes::of(value);
    escape::escape(bytes.as_ptr());
    observer.observe(bytes);
}

/// Identity function the optimizer can't see through.
///
/// Use this when the value is needed afterwards, e.g. to hide a constant
/// input from the measured code.
#[inline]
pub fn black_box<T>(value: T) -> T {
    std_black_box(value)
}
