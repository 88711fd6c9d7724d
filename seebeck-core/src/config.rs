//! Configuration type definitions
//!
//! Immutable for the lifetime of one driver instance, supplied at
//! construction. Defaults carry the reference wiring: DO on pin 7, CLK on
//! pin 6, CS on pin 8, 31.25 kHz bus clock, 10 s fault hold.

use crate::debounce::DEFAULT_FAULT_HOLD_MS;

/// Bus clock rate hint for the SPI master
///
/// The MAX31855 is read-only and tolerates anything up to 5 MHz; slow rates
/// survive long leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusRate {
    /// 31.25 kHz
    #[default]
    Rate31k,
    /// 125 kHz
    Rate125k,
    /// 250 kHz
    Rate250k,
    /// 500 kHz
    Rate500k,
    /// 1 MHz
    Rate1M,
}

impl BusRate {
    /// Clock rate in Hz
    pub const fn hertz(self) -> u32 {
        match self {
            BusRate::Rate31k => 31_250,
            BusRate::Rate125k => 125_000,
            BusRate::Rate250k => 250_000,
            BusRate::Rate500k => 500_000,
            BusRate::Rate1M => 1_000_000,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Sensor data-out pin (DO)
    pub data_pin: u8,
    /// Bus clock pin (CLK)
    pub clock_pin: u8,
    /// Chip select pin (CS)
    pub select_pin: u8,
    /// Bus clock rate hint
    pub bus_rate: BusRate,
    /// Delay between poll iterations in milliseconds
    pub poll_interval_ms: u32,
    /// Fault display hold window in milliseconds
    pub fault_hold_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            data_pin: 7,
            clock_pin: 6,
            select_pin: 8,
            bus_rate: BusRate::Rate31k,
            poll_interval_ms: 100,
            fault_hold_ms: DEFAULT_FAULT_HOLD_MS,
        }
    }
}
