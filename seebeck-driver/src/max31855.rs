//! MAX31855 bus frontend
//!
//! The chip is read-only: each transaction clocks out one 32-bit frame,
//! MSB first, framed by chip select. Mode-0 SPI; chip-select handling and
//! the clock rate belong to the `SpiDevice` implementation.

use embedded_hal::spi::SpiDevice;

use seebeck_core::frame::RawFrame;
use seebeck_core::traits::{BusError, FrameBus};

/// MAX31855 cold-junction-compensated thermocouple converter
///
/// Wiring on the reference board: DO on pin 7, CLK on pin 6, CS on pin 8.
/// The SDI pin of the bus master is unused; the chip has no input.
pub struct Max31855<SPI> {
    spi: SPI,
}

impl<SPI> Max31855<SPI> {
    /// Take ownership of an opened SPI device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the underlying SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> FrameBus for Max31855<SPI> {
    /// Read one frame
    ///
    /// A failed transfer means the bus is gone (unplugged master, cancelled
    /// transaction); the chip itself cannot NAK, so there is no other
    /// error to distinguish here.
    fn read_frame(&mut self) -> Result<RawFrame, BusError> {
        let mut buf = [0u8; 4];
        self.spi
            .read(&mut buf)
            .map_err(|_| BusError::ConnectionLost)?;
        Ok(RawFrame::new(u32::from_be_bytes(buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{Error, ErrorKind, ErrorType, Operation};

    /// SPI double that answers every read with a fixed frame
    struct FixedSpi(u32);

    #[derive(Debug)]
    struct FixedSpiError;

    impl Error for FixedSpiError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FixedSpi {
        type Error = FixedSpiError;
    }

    impl SpiDevice for FixedSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter_mut() {
                if let Operation::Read(buf) = op {
                    buf.copy_from_slice(&self.0.to_be_bytes());
                }
            }
            Ok(())
        }
    }

    /// SPI double whose transactions always fail
    struct DeadSpi;

    impl ErrorType for DeadSpi {
        type Error = FixedSpiError;
    }

    impl SpiDevice for DeadSpi {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            Err(FixedSpiError)
        }
    }

    #[test]
    fn test_msb_first_assembly() {
        // 0x01900000 = thermocouple field 100 = 25.0 °C
        let mut bus = Max31855::new(FixedSpi(0x0190_0000));
        let raw = bus.read_frame().unwrap();
        assert_eq!(raw.bits(), 0x0190_0000);
    }

    #[test]
    fn test_transfer_failure_is_connection_lost() {
        let mut bus = Max31855::new(DeadSpi);
        assert_eq!(bus.read_frame(), Err(BusError::ConnectionLost));
    }
}
