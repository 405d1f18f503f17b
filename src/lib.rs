//! Interrupt-safe byte FIFO for no-std embedded targets.
//!
//! # Highlights
//! - Single producer, single consumer byte ring over caller-supplied storage.
//! - No allocation, no dynamic dispatch, no blocking.
//! - Designed for an interrupt handler on one side and the main loop on the other.
//!
//! # Quick start
//! ```
//! use ph_fifo::{Fifo, NoMask};
//!
//! let mut storage = [0u8; 8];
//! let mut fifo = Fifo::new(NoMask);
//! assert!(fifo.register(&mut storage));
//!
//! assert_eq!(fifo.write(b"hello"), 5);
//!
//! let mut out = [0u8; 5];
//! assert_eq!(fifo.read(&mut out), 5);
//! assert_eq!(&out, b"hello");
//! ```
//!
//! # No-std
//! The crate is `#![no_std]` by default. Tests require `std`.
//!
//! # Safety and concurrency
//! At most one writer and one reader may use a fifo at a time. A second `write` (or `read`)
//! issued while one is already in progress is rejected and returns `0`; it is never queued.
//! `write` and `read` do not mask interrupts and may interleave with each other byte by byte.
//! Only `flush` runs inside a critical section, provided by the [`IrqMask`] the fifo was built
//! with.
//!
//! # Semantics
//! - `write`/`read` move as many bytes as fit and return the count; callers compare it against
//!   the requested length to detect truncation.
//! - `flush` discards buffered data and refuses to run while a transfer is in progress.
//! - The `try_*` variants report the reason for a rejection as a [`FifoError`].
//!
//! # Features
//! - `portable-atomic`: use `portable_atomic` for targets without native atomics.
//! - `critical-section`: enables [`CriticalSectionMask`].
#![no_std]

pub mod error;
pub mod fifo;
pub mod guard;
pub mod irq;

#[cfg(not(feature = "portable-atomic"))]
pub(crate) use core::sync::atomic;
#[cfg(feature = "portable-atomic")]
pub(crate) use portable_atomic as atomic;

pub use error::FifoError;
pub use fifo::Fifo;
pub use guard::{BusyFlag, BusyGuard};
#[cfg(feature = "critical-section")]
pub use irq::CriticalSectionMask;
pub use irq::{IrqFns, IrqMask, NoMask};

#[cfg(test)]
extern crate std;
