//! Board-agnostic core logic for the Seebeck thermocouple driver
//!
//! This crate contains all driver logic that does not depend on a
//! specific bus implementation:
//!
//! - Frame decoding (32-bit MAX31855 frame to temperatures + fault flags)
//! - Fault display debouncing
//! - Session lifecycle state machine
//! - Configuration type definitions
//! - Hardware abstraction traits (bus, listener, clock)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod debounce;
pub mod frame;
pub mod session;
pub mod traits;
