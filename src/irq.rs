//! Interrupt masking capability injected into a [`Fifo`](crate::Fifo).
//!
//! The fifo only masks interrupts around `flush`, which is the one operation touching both the
//! write and the read side. How interrupts are masked is up to the platform.

/// Runs a closure with interrupts masked.
pub trait IrqMask {
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Runs the closure without masking anything.
///
/// For hosted builds and for fifos only ever touched from a single context.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoMask;

impl IrqMask for NoMask {
    #[inline]
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// A platform's "disable all interrupts" / "enable all interrupts" pair.
///
/// `enable` is called unconditionally after the closure, so this does not nest: use it only
/// where interrupts are known to be enabled on entry.
#[derive(Copy, Clone, Debug)]
pub struct IrqFns {
    pub disable: fn(),
    pub enable: fn(),
}

impl IrqFns {
    pub const fn new(disable: fn(), enable: fn()) -> Self {
        Self { disable, enable }
    }
}

impl IrqMask for IrqFns {
    #[inline]
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        (self.disable)();
        let out = f();
        (self.enable)();
        out
    }
}

/// Masks through the `critical-section` crate, which restores the previous state on exit and
/// therefore nests.
#[cfg(feature = "critical-section")]
#[derive(Copy, Clone, Debug, Default)]
pub struct CriticalSectionMask;

#[cfg(feature = "critical-section")]
impl IrqMask for CriticalSectionMask {
    #[inline]
    fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}
