//! Bus transaction traits

use crate::frame::RawFrame;

/// Errors the bus layer can report during a transaction
///
/// There is no "bad frame" variant: any 32 bits that arrive decode normally
/// (invalid reads surface as fault flags, not decode failures). The only
/// failure surface is the connection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Connection lost, or a blocked transaction was cancelled.
    /// Recoverable at the session level.
    ConnectionLost,
    /// Attached hardware is not usable. Terminal for the session.
    Incompatible,
}

/// Trait for the 32-bit frame transaction primitive
///
/// Implementations own the opened bus handle (pins, clock rate, chip-select
/// framing) and perform one 4-byte MSB-first transaction per call. A call
/// blocks until the transaction completes or the connection is lost.
pub trait FrameBus {
    /// Perform one bus transaction and return the raw frame
    fn read_frame(&mut self) -> Result<RawFrame, BusError>;
}
