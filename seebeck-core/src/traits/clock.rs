//! Monotonic time source trait

/// Monotonic millisecond clock for platform abstraction
///
/// Only differences between values are meaningful; the epoch is arbitrary.
/// Takes `&mut self` so simulated clocks can advance on read.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary epoch
    fn now_ms(&mut self) -> u64;
}
