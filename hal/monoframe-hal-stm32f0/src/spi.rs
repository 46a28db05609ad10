//! Blocking SPI for STM32F0
//!
//! Adapts any blocking `embedded-hal` SPI bus (such as
//! `embassy_stm32::spi::Spi` in blocking mode) to `monoframe_hal::SpiBus`.

use embassy_stm32::spi;
use embassy_stm32::time::Hertz;
use embedded_hal::spi::{Error as _, ErrorKind};
use monoframe_hal::spi::Mode;
use monoframe_hal::SpiConfig;

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Receive overrun
    Overrun,
    /// Mode fault (multi-master conflict on NSS)
    ModeFault,
    /// Frame format error
    Framing,
    /// Other error
    Other,
}

impl From<ErrorKind> for SpiBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Overrun => SpiBusError::Overrun,
            ErrorKind::ModeFault => SpiBusError::ModeFault,
            ErrorKind::FrameFormat => SpiBusError::Framing,
            _ => SpiBusError::Other,
        }
    }
}

/// Build the embassy SPI configuration for `config`
pub fn bus_config(config: &SpiConfig) -> spi::Config {
    let mut bus = spi::Config::default();
    bus.frequency = Hertz(config.frequency);
    bus.mode = match config.mode() {
        Mode::Mode0 => spi::MODE_0,
        Mode::Mode1 => spi::MODE_1,
        Mode::Mode2 => spi::MODE_2,
        Mode::Mode3 => spi::MODE_3,
    };
    bus
}

/// Transmit-only SPI bus
pub struct BlockingSpi<S> {
    bus: S,
}

impl<S> BlockingSpi<S>
where
    S: embedded_hal::spi::SpiBus<u8>,
{
    /// Wrap a configured bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Release the bus
    pub fn release(self) -> S {
        self.bus
    }
}

impl<S> monoframe_hal::SpiBus for BlockingSpi<S>
where
    S: embedded_hal::spi::SpiBus<u8>,
{
    type Error = SpiBusError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data).map_err(|e| SpiBusError::from(e.kind()))?;
        // CS must not be released while the last byte is still shifting out
        self.bus.flush().map_err(|e| SpiBusError::from(e.kind()))
    }
}
