//! Session lifecycle state machine.
//!
//! The bus layer delivers connection signals asynchronously; all poll-loop
//! behavior is a function of the current session state and a signal. The
//! machine mirrors the host lifecycle: a session is opened, polled, and torn
//! down on disconnect, any number of times per process; incompatible
//! hardware ends the session for good.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No bus connection established
    #[default]
    Disconnected,
    /// Bus opened, no transaction issued yet
    Connected,
    /// Repeatedly polling the device
    Looping,
    /// Attached hardware is not usable; terminal for the session
    Incompatible,
}

/// Signals that drive session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// The bus layer established a connection
    BusOpened,
    /// The first poll transaction was issued
    PollStarted,
    /// The bus layer lost the connection (or a blocked read was cancelled)
    ConnectionLost,
    /// The bus layer reported unusable hardware
    IncompatibleHardware,
}

impl SessionState {
    /// True if bus transactions may be issued in this state
    pub fn can_poll(&self) -> bool {
        matches!(self, SessionState::Connected | SessionState::Looping)
    }

    /// True if no further session activity is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Incompatible)
    }

    /// Process a signal and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Disconnected, BusOpened) => Connected,

            (Connected, PollStarted) => Looping,
            (Connected, ConnectionLost) => Disconnected,
            (Connected, IncompatibleHardware) => Incompatible,

            (Looping, ConnectionLost) => Disconnected,
            (Looping, IncompatibleHardware) => Incompatible,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_poll_flow() {
        let state = SessionState::Disconnected;
        let state = state.transition(SessionEvent::BusOpened);
        assert_eq!(state, SessionState::Connected);

        let state = state.transition(SessionEvent::PollStarted);
        assert_eq!(state, SessionState::Looping);
    }

    #[test]
    fn test_connection_lost_returns_to_disconnected() {
        for state in [SessionState::Connected, SessionState::Looping] {
            let next = state.transition(SessionEvent::ConnectionLost);
            assert_eq!(next, SessionState::Disconnected);
        }
    }

    #[test]
    fn test_reconnect_after_loss() {
        let state = SessionState::Looping
            .transition(SessionEvent::ConnectionLost)
            .transition(SessionEvent::BusOpened);
        assert_eq!(state, SessionState::Connected);
    }

    #[test]
    fn test_incompatible_is_terminal() {
        for state in [SessionState::Connected, SessionState::Looping] {
            let next = state.transition(SessionEvent::IncompatibleHardware);
            assert_eq!(next, SessionState::Incompatible);
            assert!(next.is_terminal());
        }

        // No signal leaves Incompatible
        for event in [
            SessionEvent::BusOpened,
            SessionEvent::PollStarted,
            SessionEvent::ConnectionLost,
            SessionEvent::IncompatibleHardware,
        ] {
            assert_eq!(
                SessionState::Incompatible.transition(event),
                SessionState::Incompatible
            );
        }
    }

    #[test]
    fn test_can_poll() {
        assert!(SessionState::Connected.can_poll());
        assert!(SessionState::Looping.can_poll());
        assert!(!SessionState::Disconnected.can_poll());
        assert!(!SessionState::Incompatible.can_poll());
    }

    #[test]
    fn test_stray_events_ignored() {
        assert_eq!(
            SessionState::Disconnected.transition(SessionEvent::PollStarted),
            SessionState::Disconnected
        );
        assert_eq!(
            SessionState::Disconnected.transition(SessionEvent::ConnectionLost),
            SessionState::Disconnected
        );
    }
}
