//! Rejection reasons for fifo operations.

use core::fmt;

/// Why a fifo operation moved no data or refused to run.
///
/// A partial transfer is not an error: `try_write`/`try_read` return `Ok(n)` with `n` smaller
/// than requested.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FifoError {
    /// The fifo is not registered, or the storage/buffer passed in is empty.
    InvalidArgument,
    /// Another operation of the same kind is in progress.
    Busy,
    /// No free space on write, or no data on read.
    Exhausted,
}

impl fmt::Display for FifoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FifoError::InvalidArgument => "invalid argument",
            FifoError::Busy => "operation already in progress",
            FifoError::Exhausted => "fifo exhausted",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for FifoError {}
