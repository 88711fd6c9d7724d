//! Bus frontend and poll loop for the Seebeck thermocouple driver
//!
//! This crate provides the hardware-facing half of the driver on top of
//! the abstractions defined in seebeck-core:
//!
//! - MAX31855 bus frontend over `embedded_hal::spi::SpiDevice`
//! - Blocking poll loop that decodes, debounces, and emits listener events

#![no_std]
#![deny(unsafe_code)]

pub mod max31855;
pub mod poll;
