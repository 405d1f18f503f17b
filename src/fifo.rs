//! SPSC byte fifo over caller-supplied storage.
//!
//! # Overview
//! - One writer context and one reader context, typically an interrupt handler and the main loop.
//! - Neither side blocks; transfers are truncated to what fits (or what is buffered) and the
//!   moved byte count is returned.
//! - A second write (or read) started while one is in progress is rejected, not queued.
//! - `flush` is the only operation that touches both sides; it runs with interrupts masked and
//!   refuses to run while a transfer is in progress.
//!
//! # Accounting
//! The two cursors cannot tell an empty ring from a full one (both cases have them equal), so the
//! number of buffered bytes is kept in its own counter. The writer increments it once per byte it
//! stores and the reader decrements it once per byte it takes out, so each side only ever sees
//! slots the other side has finished with.
//!
//! # Notes
//! - The storage is borrowed for `'a` and never allocated or freed by the fifo.
//! - Writes and reads do not mask interrupts and may interleave with each other byte by byte.

use core::cell::Cell;

use log::{debug, trace};

use crate::atomic::{AtomicUsize, Ordering};
use crate::error::FifoError;
use crate::guard::BusyFlag;
use crate::irq::IrqMask;

/// Fixed-capacity byte ring shared by one writer and one reader.
///
/// Starts out unregistered; [`register`](Fifo::register) binds it to storage.
pub struct Fifo<'a, M: IrqMask> {
    region: Option<&'a [Cell<u8>]>,
    write_cursor: AtomicUsize,
    read_cursor: AtomicUsize,
    occupied: AtomicUsize,
    write_busy: BusyFlag,
    read_busy: BusyFlag,
    irq: M,
}

// SAFETY: `region` is only replaced through `&mut self`. While shared, the writer stores into
// slots the occupancy counter reports as free and publishes each one with a `Release` increment;
// the reader only loads slots it observed as occupied through an `Acquire` load and hands them
// back with a `Release` decrement. The busy flags keep a second writer or reader out, and `flush`
// holds both flags while it resets the cursors.
unsafe impl<M: IrqMask + Sync> Sync for Fifo<'_, M> {}
unsafe impl<M: IrqMask + Send> Send for Fifo<'_, M> {}

impl<'a, M: IrqMask> Fifo<'a, M> {
    /// Create an unregistered fifo. All sizes read `0` and every transfer moves nothing until
    /// [`register`](Fifo::register) succeeds.
    pub const fn new(irq: M) -> Self {
        Self {
            region: None,
            write_cursor: AtomicUsize::new(0),
            read_cursor: AtomicUsize::new(0),
            occupied: AtomicUsize::new(0),
            write_busy: BusyFlag::new(),
            read_busy: BusyFlag::new(),
            irq,
        }
    }

    /// Bind the fifo to `storage` and reset it to empty. Capacity is `storage.len()`.
    ///
    /// Returns `false` and leaves the fifo untouched if `storage` is empty.
    pub fn register(&mut self, storage: &'a mut [u8]) -> bool {
        self.try_register(storage).is_ok()
    }

    pub fn try_register(&mut self, storage: &'a mut [u8]) -> Result<(), FifoError> {
        if storage.is_empty() {
            debug!("fifo: register rejected, empty storage");
            return Err(FifoError::InvalidArgument);
        }

        let capacity = storage.len();
        self.region = Some(Cell::from_mut(storage).as_slice_of_cells());
        *self.write_cursor.get_mut() = 0;
        *self.read_cursor.get_mut() = 0;
        *self.occupied.get_mut() = 0;
        self.write_busy = BusyFlag::new();
        self.read_busy = BusyFlag::new();
        trace!("fifo: registered {} bytes", capacity);
        Ok(())
    }

    /// Kept for symmetry with [`register`](Fifo::register). Not implemented: it does nothing,
    /// the fifo stays registered and the storage stays borrowed until the fifo is dropped.
    #[inline]
    pub fn release(&self) {}

    /// Discard all buffered bytes. Returns `false` without touching anything if the fifo is
    /// unregistered or a write or read is in progress.
    pub fn flush(&self) -> bool {
        self.try_flush().is_ok()
    }

    pub fn try_flush(&self) -> Result<(), FifoError> {
        if self.region.is_none() {
            debug!("fifo: flush rejected, not registered");
            return Err(FifoError::InvalidArgument);
        }

        let res = self.irq.masked(|| {
            let Some(_write) = self.write_busy.try_acquire() else {
                return Err(FifoError::Busy);
            };
            let Some(_read) = self.read_busy.try_acquire() else {
                return Err(FifoError::Busy);
            };

            self.write_cursor.store(0, Ordering::Relaxed);
            self.read_cursor.store(0, Ordering::Relaxed);
            self.occupied.store(0, Ordering::Release);
            Ok(())
        });

        match res {
            Ok(()) => trace!("fifo: flushed"),
            Err(_) => debug!("fifo: flush rejected, transfer in progress"),
        }
        res
    }

    /// Copy as much of `src` as fits and return the number of bytes stored.
    ///
    /// Returns `0` if the fifo is unregistered or full, `src` is empty, or another write is in
    /// progress.
    pub fn write(&self, src: &[u8]) -> usize {
        self.try_write(src).unwrap_or(0)
    }

    /// Like [`write`](Fifo::write), reporting why nothing was stored.
    /// A truncated write is `Ok` with a count below `src.len()`.
    pub fn try_write(&self, src: &[u8]) -> Result<usize, FifoError> {
        let region = self.region.ok_or(FifoError::InvalidArgument)?;
        if src.is_empty() {
            return Err(FifoError::InvalidArgument);
        }

        let Some(_busy) = self.write_busy.try_acquire() else {
            debug!("fifo: write rejected, write already in progress");
            return Err(FifoError::Busy);
        };

        let free = self.free_size();
        if free == 0 {
            return Err(FifoError::Exhausted);
        }
        let len = src.len().min(free);

        let capacity = region.len();
        let mut cursor = self.write_cursor.load(Ordering::Relaxed);
        for &byte in &src[..len] {
            region[cursor].set(byte);
            cursor += 1;
            if cursor == capacity {
                cursor = 0;
            }
            self.write_cursor.store(cursor, Ordering::Relaxed);
            self.occupied.fetch_add(1, Ordering::Release);
        }

        if len < src.len() {
            debug!("fifo: write truncated to {} of {} bytes", len, src.len());
        }
        Ok(len)
    }

    /// Move up to `dst.len()` buffered bytes into `dst` and return how many were copied.
    ///
    /// Returns `0` if the fifo is unregistered or empty, `dst` is empty, or another read is in
    /// progress.
    pub fn read(&self, dst: &mut [u8]) -> usize {
        self.try_read(dst).unwrap_or(0)
    }

    /// Like [`read`](Fifo::read), reporting why nothing was copied.
    pub fn try_read(&self, dst: &mut [u8]) -> Result<usize, FifoError> {
        let region = self.region.ok_or(FifoError::InvalidArgument)?;
        if dst.is_empty() {
            return Err(FifoError::InvalidArgument);
        }

        let Some(_busy) = self.read_busy.try_acquire() else {
            debug!("fifo: read rejected, read already in progress");
            return Err(FifoError::Busy);
        };

        let occupied = self.occupied_size();
        if occupied == 0 {
            return Err(FifoError::Exhausted);
        }
        let len = dst.len().min(occupied);

        let capacity = region.len();
        let mut cursor = self.read_cursor.load(Ordering::Relaxed);
        for slot in &mut dst[..len] {
            *slot = region[cursor].get();
            cursor += 1;
            if cursor == capacity {
                cursor = 0;
            }
            self.read_cursor.store(cursor, Ordering::Relaxed);
            self.occupied.fetch_sub(1, Ordering::Release);
        }

        Ok(len)
    }

    /// Capacity in bytes, `0` while unregistered.
    #[inline]
    pub fn total_size(&self) -> usize {
        self.region.map_or(0, <[Cell<u8>]>::len)
    }

    /// Bytes that can be written right now. May be stale as soon as it returns.
    #[inline]
    pub fn free_size(&self) -> usize {
        self.total_size() - self.occupied_size()
    }

    /// Bytes waiting to be read. May be stale as soon as it returns.
    #[inline]
    pub fn occupied_size(&self) -> usize {
        self.occupied.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.region.is_some()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied_size() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.is_registered() && self.free_size() == 0
    }
}
