//! Hardware abstraction traits
//!
//! These traits define the interface between the driver logic and the
//! platform: the bus transaction primitive, the event consumer, and the
//! monotonic time source.

pub mod bus;
pub mod clock;
pub mod listener;

pub use bus::{BusError, FrameBus};
pub use clock::Clock;
pub use listener::Listener;
