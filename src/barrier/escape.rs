//! Escape-analysis defeat and the single-byte probe.
//!
//! Both are implemented with inline assembly on x86_64 and aarch64:
//! - `escape`: an empty asm block that takes the address as input and may read
//!   memory, so the optimizer must keep whatever was stored there
//! - `probe_byte`: a one-byte load whose result the compiler cannot predict,
//!   which also freezes padding bytes into an ordinary `u8`
//!
//! Other platforms fall back to `std::hint::black_box`. There `probe_byte`
//! observes the address rather than the byte behind it.

/// Make `ptr` (and the memory behind it) visible to code the compiler can't see.
#[inline(always)]
pub(crate) fn escape(ptr: *const u8) {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    {
        // SAFETY: the template is empty; it only claims it may read memory.
        unsafe {
            std::arch::asm!(
                "/* {0} */",
                in(reg) ptr,
                options(nostack, readonly, preserves_flags),
            );
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        std::hint::black_box(ptr);
    }
}

/// Read the byte at `ptr`.
///
/// Without an opaque load (targets other than x86_64 and aarch64) this
/// returns the low byte of the address.
///
/// # Safety
///
/// `ptr` must be valid for a one-byte read. The byte may be uninitialized.
#[inline(always)]
pub(crate) unsafe fn probe_byte(ptr: *const u8) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        let byte: u8;
        std::arch::asm!(
            "mov {b}, byte ptr [{p}]",
            p = in(reg) ptr,
            b = out(reg_byte) byte,
            options(nostack, readonly, preserves_flags),
        );
        byte
    }

    #[cfg(target_arch = "aarch64")]
    {
        let word: u32;
        std::arch::asm!(
            "ldrb {w:w}, [{p}]",
            p = in(reg) ptr,
            w = out(reg) word,
            options(nostack, readonly, preserves_flags),
        );
        word as u8
    }

    // No opaque load available: observe the address instead of the contents.
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        std::hint::black_box(ptr as usize) as u8
    }
}
