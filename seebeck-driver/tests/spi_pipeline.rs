//! End-to-end pipeline test: scripted SPI device -> MAX31855 frontend ->
//! poll loop -> listener.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{Error, ErrorKind, ErrorType, Operation, SpiDevice};

use seebeck_core::config::DriverConfig;
use seebeck_core::debounce::FaultDisplay;
use seebeck_core::frame::{FaultFlags, FaultKind, RawFrame};
use seebeck_core::traits::{Clock, Listener};
use seebeck_driver::max31855::Max31855;
use seebeck_driver::poll::{PollLoop, SessionEnd};

/// SPI double that serves a script of frames, then fails every transaction
struct ScriptedSpi {
    frames: Vec<u32>,
    cursor: usize,
}

impl ScriptedSpi {
    fn new(frames: Vec<u32>) -> Self {
        Self { frames, cursor: 0 }
    }
}

#[derive(Debug)]
struct ScriptedSpiError;

impl Error for ScriptedSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for ScriptedSpi {
    type Error = ScriptedSpiError;
}

impl SpiDevice for ScriptedSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let frame = *self.frames.get(self.cursor).ok_or(ScriptedSpiError)?;
        self.cursor += 1;
        for op in operations.iter_mut() {
            if let Operation::Read(buf) = op {
                buf.copy_from_slice(&frame.to_be_bytes());
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct Recording {
    data: Vec<(f32, f32)>,
    faults: Vec<FaultDisplay>,
    connects: u32,
    disconnects: u32,
}

impl Listener for Recording {
    fn on_data(&mut self, internal_c: f32, thermocouple_c: f32) {
        self.data.push((internal_c, thermocouple_c));
    }

    fn on_fault(&mut self, display: FaultDisplay) {
        self.faults.push(display);
    }

    fn on_connected(&mut self) {
        self.connects += 1;
    }

    fn on_disconnected(&mut self) {
        self.disconnects += 1;
    }
}

struct SteppingClock(u64);

impl Clock for SteppingClock {
    fn now_ms(&mut self) -> u64 {
        let now = self.0;
        self.0 += 100;
        now
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn pipeline_decodes_and_debounces() {
    let open_circuit = FaultFlags::from_kind(FaultKind::OpenCircuit);
    let frames = vec![
        // 25.0 °C thermocouple, 24.0 °C cold junction, no fault
        RawFrame::compose(384, 100, FaultFlags::EMPTY).bits(),
        // open circuit fault
        RawFrame::compose(384, 0, open_circuit).bits(),
        // fault bits clear again; still inside the hold window
        RawFrame::compose(384, 100, FaultFlags::EMPTY).bits(),
    ];

    let bus = Max31855::new(ScriptedSpi::new(frames));
    let mut driver = PollLoop::new(bus, Recording::default(), DriverConfig::default());

    driver.connect();
    let end = driver.run(&mut SteppingClock(0), &mut NoDelay);

    // Script exhausted: the fourth transaction fails and ends the session
    assert_eq!(end, SessionEnd::Disconnected);

    let listener = driver.listener();
    assert_eq!(listener.connects, 1);
    assert_eq!(listener.disconnects, 1);

    assert_eq!(
        listener.data,
        vec![(24.0, 25.0), (24.0, 0.0), (24.0, 25.0)]
    );
    assert_eq!(
        listener.faults,
        vec![
            FaultDisplay::Clear,
            FaultDisplay::Show(open_circuit),
            // debounced: bits cleared but the hold window keeps it visible
            FaultDisplay::Show(open_circuit),
        ]
    );
}

#[test]
fn pipeline_survives_reconnect() {
    let frames = vec![RawFrame::compose(0, 0, FaultFlags::EMPTY).bits()];
    let bus = Max31855::new(ScriptedSpi::new(frames));
    let mut driver = PollLoop::new(bus, Recording::default(), DriverConfig::default());

    driver.connect();
    let end = driver.run(&mut SteppingClock(0), &mut NoDelay);
    assert_eq!(end, SessionEnd::Disconnected);

    // Script exhausted, so the next session dies on its first transaction,
    // but the lifecycle transitions stay well formed
    driver.connect();
    let end = driver.run(&mut SteppingClock(10_000), &mut NoDelay);
    assert_eq!(end, SessionEnd::Disconnected);

    let listener = driver.listener();
    assert_eq!(listener.connects, 2);
    assert_eq!(listener.disconnects, 2);
    assert_eq!(listener.data.len(), 1);
}
