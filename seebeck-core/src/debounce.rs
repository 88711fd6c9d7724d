//! Fault display debouncing.
//!
//! The chip's fault bits can flicker off for a cycle or two while the
//! underlying condition persists. To keep the reported status stable, a
//! fault stays visible for a configured hold window after the bits clear.
//! Only the display is held: a fault that is still present is always shown,
//! and detection state never self-clears.

use crate::frame::FaultFlags;

/// Default hold window in milliseconds
pub const DEFAULT_FAULT_HOLD_MS: u32 = 10_000;

/// What the consumer should display this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultDisplay {
    /// Show these fault conditions
    Show(FaultFlags),
    /// Clear any previously rendered fault text
    Clear,
}

/// Debouncer for the fault status display
///
/// Tracks the last non-empty fault set observed and when it was seen.
/// Single-owner mutable state; updated once per poll iteration.
#[derive(Debug, Clone)]
pub struct FaultDebouncer {
    /// Hold window in milliseconds
    hold_ms: u32,
    /// Timestamp and flags of the last non-empty observation.
    /// None means no fault has ever occurred this session.
    last_fault: Option<(u64, FaultFlags)>,
}

impl FaultDebouncer {
    /// Create a debouncer with the given hold window
    pub const fn new(hold_ms: u32) -> Self {
        Self {
            hold_ms,
            last_fault: None,
        }
    }

    /// Forget any held fault
    ///
    /// Called on each fresh session connect so a fault from a previous
    /// session cannot bleed into the next one.
    pub fn reset(&mut self) {
        self.last_fault = None;
    }

    /// Record one observation and decide what to display
    ///
    /// - Non-empty `flags` are displayed immediately and start a new hold
    ///   window, replacing any previously held fault.
    /// - Empty `flags` inside the hold window re-display the held fault.
    /// - Empty `flags` outside the window, or before any fault has ever
    ///   been observed, clear the display.
    pub fn observe(&mut self, now_ms: u64, flags: FaultFlags) -> FaultDisplay {
        if !flags.is_empty() {
            self.last_fault = Some((now_ms, flags));
            return FaultDisplay::Show(flags);
        }

        match self.last_fault {
            Some((at_ms, held)) if now_ms.saturating_sub(at_ms) <= self.hold_ms as u64 => {
                FaultDisplay::Show(held)
            }
            _ => FaultDisplay::Clear,
        }
    }
}

impl Default for FaultDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_FAULT_HOLD_MS)
    }
}
