//! Observers: where the barrier's byte-level probe can end up.
//!
//! The default chain is `Guarded::sentinel(StdoutSink)`: the probed byte is
//! written to stdout only when the process is the init/system process, which
//! never happens during a benchmark. The write is real as far as the compiler
//! knows, so the value feeding it can't be discarded.

use std::io::Write;
use std::marker::PhantomData;
use std::mem;

use super::escape::probe_byte;
use super::platform::current_process_is_sentinel;

/// Borrowed view of a value's raw in-memory representation.
///
/// Bytes are never interpreted. Padding may be uninitialized, so no slice is
/// handed out; [`first`](Self::first) reads one byte in a way that is sound
/// even for padding.
#[derive(Debug, Clone, Copy)]
pub struct RawBytes<'a> {
    ptr: *const u8,
    len: usize,
    _value: PhantomData<&'a [u8]>,
}

impl<'a> RawBytes<'a> {
    /// View the bytes of `value`.
    #[inline]
    pub fn of<T: ?Sized>(value: &'a T) -> Self {
        Self {
            ptr: value as *const T as *const u8,
            len: mem::size_of_val(value),
            _value: PhantomData,
        }
    }

    /// Size of the value in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for zero-sized values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address of the value.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Probe the first byte of the representation, or `None` for zero-sized values.
    ///
    /// On x86_64 and aarch64 this is the value's first byte in memory. Other
    /// targets have no load that is sound for padding bytes, so they return
    /// the low byte of the value's address instead.
    #[inline]
    pub fn first(&self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: ptr comes from a live reference covering `len >= 1` bytes.
        Some(unsafe { probe_byte(self.ptr) })
    }
}

/// Receives the raw bytes of every value passed through [`barrier_with`](super::barrier_with).
///
/// Implementations must not block or allocate on the common path; the
/// barrier runs inside timed loops.
pub trait Observer {
    /// Observe a value's representation.
    fn observe(&self, bytes: RawBytes<'_>);
}

impl<O: Observer + ?Sized> Observer for &O {
    #[inline]
    fn observe(&self, bytes: RawBytes<'_>) {
        (**self).observe(bytes)
    }
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    #[inline]
    fn observe(&self, bytes: RawBytes<'_>) {
        (**self).observe(bytes)
    }
}

/// Forwards to the inner observer only when the guard returns true.
#[derive(Debug, Clone, Copy)]
pub struct Guarded<O> {
    inner: O,
    guard: fn() -> bool,
}

impl<O> Guarded<O> {
    /// Guard `inner` with an arbitrary condition.
    pub const fn new(inner: O, guard: fn() -> bool) -> Self {
        Self { inner, guard }
    }

    /// Guard `inner` with [`current_process_is_sentinel`].
    pub const fn sentinel(inner: O) -> Self {
        Self::new(inner, current_process_is_sentinel)
    }

    /// The wrapped observer.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: Observer> Observer for Guarded<O> {
    #[inline]
    fn observe(&self, bytes: RawBytes<'_>) {
        if (self.guard)() {
            self.inner.observe(bytes);
        }
    }
}

/// Writes the first byte of each observed value to stdout.
///
/// Write errors are ignored: the barrier can't fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Observer for StdoutSink {
    #[cold]
    fn observe(&self, bytes: RawBytes<'_>) {
        emit(&mut std::io::stdout().lock(), bytes);
    }
}

fn emit<W: Write>(out: &mut W, bytes: RawBytes<'_>) {
    if let Some(byte) = bytes.first() {
        let _ = out.write_all(&[byte]);
    }
}

/// Observer used by [`barrier`](super::barrier).
pub const DEFAULT_OBSERVER: Guarded<StdoutSink> = Guarded::sentinel(StdoutSink);
