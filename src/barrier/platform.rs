//! Platform-specific process identity check used to gate the observable path.
//!
//! The sentinel is the id the OS reserves for its init/system process:
//! - Unix: pid 1 (`init`/`systemd`)
//! - Windows: pid 4 (`System`)
//! - Other targets: no sentinel, the check is always false

/// Process id treated as the sentinel on this target, if any.
#[cfg(unix)]
pub const SENTINEL_PROCESS_ID: Option<u32> = Some(1);

/// Process id treated as the sentinel on this target, if any.
#[cfg(windows)]
pub const SENTINEL_PROCESS_ID: Option<u32> = Some(4);

/// Process id treated as the sentinel on this target, if any.
#[cfg(not(any(unix, windows)))]
pub const SENTINEL_PROCESS_ID: Option<u32> = None;

/// Returns true if the current process is the platform's init/system process.
///
/// No benchmark run should ever see `true` here. The compiler can't know
/// that, so anything guarded by this check counts as reachable.
///
/// The process id is queried once; later calls are a single atomic load.
#[inline]
pub fn current_process_is_sentinel() -> bool {
    #[cfg(any(unix, windows))]
    {
        use std::sync::OnceLock;
        static IS_SENTINEL: OnceLock<bool> = OnceLock::new();

        *IS_SENTINEL.get_or_init(|| SENTINEL_PROCESS_ID == Some(std::process::id()))
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_sentinel_in_test_process() {
        assert!(!current_process_is_sentinel());
    }

    #[test]
    fn test_repeated_checks_agree() {
        let first = current_process_is_sentinel();
        for _ in 0..1_000 {
            assert_eq!(current_process_is_sentinel(), first);
        }
    }

    #[test]
    fn test_sentinel_id_per_platform() {
        #[cfg(unix)]
        assert_eq!(SENTINEL_PROCESS_ID, Some(1));
        #[cfg(windows)]
        assert_eq!(SENTINEL_PROCESS_ID, Some(4));
        #[cfg(not(any(unix, windows)))]
        assert_eq!(SENTINEL_PROCESS_ID, None);
    }
}
