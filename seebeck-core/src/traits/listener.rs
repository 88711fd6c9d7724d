//! Driver event consumer trait

use crate::debounce::FaultDisplay;

/// Consumer of driver events
///
/// The driver invokes the listener, never the reverse. Both `on_data` and
/// `on_fault` fire every successful poll cycle, in that order, before the
/// next transaction begins; `on_fault` fires even when the decision is
/// [`FaultDisplay::Clear`] so the consumer can erase previously rendered
/// fault text. Rendering and any thread hand-off are the consumer's
/// responsibility and must not re-enter the driver.
pub trait Listener {
    /// A reading was decoded
    fn on_data(&mut self, internal_c: f32, thermocouple_c: f32);

    /// The fault display decision for this cycle
    fn on_fault(&mut self, display: FaultDisplay);

    /// A session was established
    fn on_connected(&mut self) {}

    /// The session ended because the connection was lost
    fn on_disconnected(&mut self) {}

    /// The session ended because the hardware is not usable
    fn on_incompatible(&mut self) {}
}
