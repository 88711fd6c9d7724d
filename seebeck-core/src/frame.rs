//! MAX31855 frame decoding.
//!
//! One bus transaction yields a 32-bit frame, MSB first:
//!
//! - bits 31-18: thermocouple temperature, 14-bit two's complement, 0.25 °C/LSB
//! - bit 16: fault indicator (OR of the three fault bits, informational)
//! - bits 15-4: internal (cold junction) temperature, 12-bit two's complement,
//!   0.0625 °C/LSB
//! - bit 2: short to VCC
//! - bit 1: short to GND
//! - bit 0: open circuit
//! - remaining bits: reserved
//!
//! Decoding is total: every 32-bit value yields a [`Reading`]. An all-ones
//! frame (no device responding) is not special-cased; it decodes to an
//! extreme reading with all fault bits set, which is what the display layer
//! should be reporting anyway.

use heapless::Vec;

/// Bit position of the thermocouple temperature field
const THERMOCOUPLE_SHIFT: u32 = 18;

/// Width of the thermocouple temperature field in bits
const THERMOCOUPLE_WIDTH: u32 = 14;

/// Bit position of the internal temperature field
const INTERNAL_SHIFT: u32 = 4;

/// Width of the internal temperature field in bits
const INTERNAL_WIDTH: u32 = 12;

/// Mask of the three specific fault bits (bits 0-2)
const FAULT_MASK: u32 = 0b111;

/// Thermocouple resolution in degrees Celsius per LSB
pub const THERMOCOUPLE_C_PER_LSB: f32 = 0.25;

/// Internal (cold junction) resolution in degrees Celsius per LSB
pub const INTERNAL_C_PER_LSB: f32 = 0.0625;

/// One complete 32-bit value obtained from a single bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame(u32);

impl RawFrame {
    /// Wrap a raw bus value
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw 32-bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Fault indicator bit (bit 16)
    ///
    /// The chip sets this whenever any of the specific fault bits is set.
    /// It carries no information of its own and is ignored by fault-flag
    /// extraction.
    pub const fn fault_indicated(self) -> bool {
        self.0 & (1 << 16) != 0
    }

    /// Build a frame from field values, the inverse of [`Reading::decode`]
    ///
    /// Field values are masked to their widths; negative temperatures take
    /// their two's-complement form. Used by tests and bus simulators.
    pub fn compose(internal_q4: i16, thermocouple_q2: i16, faults: FaultFlags) -> Self {
        let thermo = (thermocouple_q2 as u32) & ((1 << THERMOCOUPLE_WIDTH) - 1);
        let internal = (internal_q4 as u32) & ((1 << INTERNAL_WIDTH) - 1);
        let fault_bits = faults.bits() as u32;

        let mut bits = (thermo << THERMOCOUPLE_SHIFT) | (internal << INTERNAL_SHIFT) | fault_bits;
        if fault_bits != 0 {
            bits |= 1 << 16;
        }
        Self(bits)
    }
}

/// A specific fault condition reported by the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Thermocouple disconnected
    OpenCircuit,
    /// Thermocouple shorted to ground
    ShortToGround,
    /// Thermocouple shorted to the supply rail
    ShortToSupply,
}

impl FaultKind {
    /// All fault kinds, in chip bit order (bit 0 first)
    pub const ALL: [FaultKind; 3] = [
        FaultKind::OpenCircuit,
        FaultKind::ShortToGround,
        FaultKind::ShortToSupply,
    ];

    /// The chip bit this fault is reported in
    pub const fn bit(self) -> u8 {
        match self {
            FaultKind::OpenCircuit => 1 << 0,
            FaultKind::ShortToGround => 1 << 1,
            FaultKind::ShortToSupply => 1 << 2,
        }
    }

    /// Display label for this fault
    pub const fn label(self) -> &'static str {
        match self {
            FaultKind::OpenCircuit => "Open Circuit",
            FaultKind::ShortToGround => "Short To GND",
            FaultKind::ShortToSupply => "Short To VCC",
        }
    }
}

/// Set of fault conditions, stored in the chip's own bit positions
///
/// Zero or more faults may be set simultaneously. Derived entirely from the
/// fault-region bits of a frame, never inferred from temperature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultFlags(u8);

impl FaultFlags {
    /// No faults
    pub const EMPTY: FaultFlags = FaultFlags(0);

    /// Extract the fault flags from a raw frame
    ///
    /// Reads bits 0-2 bit-for-bit; the indicator bit 16 is ignored.
    pub const fn from_raw(raw: RawFrame) -> Self {
        Self((raw.bits() & FAULT_MASK) as u8)
    }

    /// Build a set from a single fault kind
    pub const fn from_kind(kind: FaultKind) -> Self {
        Self(kind.bit())
    }

    /// The raw fault bits (bits 0-2)
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if no fault is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if the given fault is set
    pub const fn contains(self, kind: FaultKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Add a fault to the set
    pub fn insert(&mut self, kind: FaultKind) {
        self.0 |= kind.bit();
    }

    /// Iterate over the faults that are set, in chip bit order
    pub fn iter(self) -> impl Iterator<Item = FaultKind> {
        FaultKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }

    /// Display labels of the set faults, in chip bit order
    pub fn labels(self) -> Vec<&'static str, 3> {
        let mut labels = Vec::new();
        for kind in self.iter() {
            // Cannot overflow: at most three kinds exist
            let _ = labels.push(kind.label());
        }
        labels
    }
}

impl core::ops::BitOr for FaultFlags {
    type Output = FaultFlags;

    fn bitor(self, rhs: FaultFlags) -> FaultFlags {
        FaultFlags(self.0 | rhs.0)
    }
}

/// One decoded sensor observation
///
/// Both temperatures always derive from the same frame snapshot. Stored as
/// the chip's fixed-point counts so round trips through [`RawFrame::compose`]
/// are exact; use the `_celsius` accessors for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Internal (cold junction) temperature in 0.0625 °C units
    pub internal_q4: i16,
    /// Thermocouple temperature in 0.25 °C units
    pub thermocouple_q2: i16,
    /// Fault conditions reported in the same frame
    pub faults: FaultFlags,
}

impl Reading {
    /// Decode a raw frame
    ///
    /// Total: every 32-bit value decodes to some reading. Reserved bits are
    /// ignored.
    pub const fn decode(raw: RawFrame) -> Self {
        let bits = raw.bits();

        let thermo = (bits >> THERMOCOUPLE_SHIFT) & ((1 << THERMOCOUPLE_WIDTH) - 1);
        let internal = (bits >> INTERNAL_SHIFT) & ((1 << INTERNAL_WIDTH) - 1);

        Self {
            internal_q4: sign_extend(internal, INTERNAL_WIDTH),
            thermocouple_q2: sign_extend(thermo, THERMOCOUPLE_WIDTH),
            faults: FaultFlags::from_raw(raw),
        }
    }

    /// Internal temperature in degrees Celsius
    pub fn internal_celsius(&self) -> f32 {
        self.internal_q4 as f32 * INTERNAL_C_PER_LSB
    }

    /// Thermocouple temperature in degrees Celsius
    pub fn thermocouple_celsius(&self) -> f32 {
        self.thermocouple_q2 as f32 * THERMOCOUPLE_C_PER_LSB
    }
}

/// Two's-complement sign extension of a `width`-bit field
///
/// If the top bit is set, the field's unsigned value is reduced by 2^width.
const fn sign_extend(value: u32, width: u32) -> i16 {
    if value & (1 << (width - 1)) != 0 {
        (value as i32 - (1 << width)) as i16
    } else {
        value as i16
    }
}
