//! Test-and-set busy flag used to reject overlapping operations of the same kind.
//!
//! The flag is not a lock: a failed acquire returns immediately and the caller reports the
//! rejection instead of waiting.

use crate::atomic::{AtomicBool, Ordering};

/// Single-slot in-progress marker.
#[derive(Debug)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the flag. Returns `None` if it is already held.
    #[inline]
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        if self.busy.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(BusyGuard { flag: self })
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a [`BusyFlag`] until dropped.
#[must_use]
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for BusyGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}
