//! Poll loop
//!
//! Drives the bus at the configured cadence, decodes each frame, updates
//! the fault debouncer, and emits listener events. A single execution
//! context owns the loop; iterations are strictly sequential, and both
//! events of iteration N are delivered before iteration N+1 starts its
//! transaction.

use embedded_hal::delay::DelayNs;

use seebeck_core::config::DriverConfig;
use seebeck_core::debounce::FaultDebouncer;
use seebeck_core::frame::Reading;
use seebeck_core::session::{SessionEvent, SessionState};
use seebeck_core::traits::{BusError, Clock, FrameBus, Listener};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEnd {
    /// Connection lost; the external lifecycle may reconnect
    Disconnected,
    /// Hardware unusable; no reconnection will help
    Incompatible,
}

/// Poll loop over a frame bus and a listener
///
/// Owns the bus handle and all mutable driver state. The external
/// lifecycle calls [`connect`](PollLoop::connect) when the bus layer
/// reports a connection and [`run`](PollLoop::run) (or repeated
/// [`poll_once`](PollLoop::poll_once)) afterwards.
pub struct PollLoop<B, L> {
    bus: B,
    listener: L,
    config: DriverConfig,
    session: SessionState,
    debouncer: FaultDebouncer,
}

impl<B: FrameBus, L: Listener> PollLoop<B, L> {
    /// Create a poll loop in the Disconnected state
    pub fn new(bus: B, listener: L, config: DriverConfig) -> Self {
        Self {
            bus,
            listener,
            config,
            session: SessionState::Disconnected,
            debouncer: FaultDebouncer::new(config.fault_hold_ms),
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.session
    }

    /// Driver configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Borrow the listener
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Tear down, returning the bus and listener
    pub fn release(self) -> (B, L) {
        (self.bus, self.listener)
    }

    /// Signal that the bus layer established a connection
    ///
    /// Starts a fresh session: the fault debouncer forgets any fault held
    /// from a previous session. Ignored in the terminal Incompatible state.
    pub fn connect(&mut self) {
        let next = self.session.transition(SessionEvent::BusOpened);
        if self.session == SessionState::Disconnected && next == SessionState::Connected {
            self.debouncer.reset();
            #[cfg(feature = "defmt")]
            defmt::info!("session connected");
            self.listener.on_connected();
        }
        self.session = next;
    }

    /// Run one poll iteration
    ///
    /// On a successful transaction the decoded reading is delivered via
    /// `on_data`, then the fault decision via `on_fault`, and the reading
    /// is returned. A transaction failure ends the session (the listener is
    /// notified once) and leaves decoder and debouncer state untouched for
    /// a later session.
    pub fn poll_once(&mut self, now_ms: u64) -> Result<Reading, SessionEnd> {
        if !self.session.can_poll() {
            return Err(self.session_end());
        }

        match self.bus.read_frame() {
            Ok(raw) => {
                self.session = self.session.transition(SessionEvent::PollStarted);

                let reading = Reading::decode(raw);
                self.listener
                    .on_data(reading.internal_celsius(), reading.thermocouple_celsius());

                let display = self.debouncer.observe(now_ms, reading.faults);
                self.listener.on_fault(display);

                Ok(reading)
            }
            Err(BusError::ConnectionLost) => {
                self.session = self.session.transition(SessionEvent::ConnectionLost);
                #[cfg(feature = "defmt")]
                defmt::warn!("session disconnected");
                self.listener.on_disconnected();
                Err(SessionEnd::Disconnected)
            }
            Err(BusError::Incompatible) => {
                self.session = self.session.transition(SessionEvent::IncompatibleHardware);
                #[cfg(feature = "defmt")]
                defmt::error!("incompatible hardware");
                self.listener.on_incompatible();
                Err(SessionEnd::Incompatible)
            }
        }
    }

    /// Poll at the configured cadence until the session ends
    ///
    /// The only blocking points are the bus transaction and the
    /// inter-iteration delay. Cancellation arrives as a `ConnectionLost`
    /// from the blocked transaction; no reading is emitted after it.
    pub fn run<C: Clock, D: DelayNs>(&mut self, clock: &mut C, delay: &mut D) -> SessionEnd {
        loop {
            let now_ms = clock.now_ms();
            match self.poll_once(now_ms) {
                Ok(_) => delay.delay_ms(self.config.poll_interval_ms),
                Err(end) => return end,
            }
        }
    }

    fn session_end(&self) -> SessionEnd {
        match self.session {
            SessionState::Incompatible => SessionEnd::Incompatible,
            _ => SessionEnd::Disconnected,
        }
    }
}
