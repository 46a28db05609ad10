//! Display bus interfaces
//!
//! The SSD1306 accepts two byte streams: commands and display RAM data.
//! On I2C the stream is chosen by a control byte sent after the address; on
//! SPI by the level of the data/command pin.

use monoframe_core::transfer::{self, Outcome, TransferError};
use monoframe_hal::time::delay_ms;
use monoframe_hal::{I2cRegisters, Millis, OutputPin, SpiBus};

use crate::cmd;

/// Display interface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The display did not acknowledge a byte
    Nack,
    /// The bus was still held by another transaction
    BusBusy,
    /// Configured address is not a 7-bit address
    InvalidAddress(u8),
    /// Command list too long for one transfer
    CommandTooLong,
    /// Page or column range outside the display
    InvalidCoordinates,
    /// Bus-level error reported by the SPI peripheral
    Communication,
}

impl From<TransferError> for DisplayError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::BusBusy => DisplayError::BusBusy,
            TransferError::InvalidAddress(address) => DisplayError::InvalidAddress(address),
            // Only the one-byte control header goes in the header segment
            TransferError::HeaderTooLong(_) => DisplayError::CommandTooLong,
        }
    }
}

/// Byte-stream access to an SSD1306
pub trait DisplayInterface {
    /// Send command and parameter bytes
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError>;

    /// Send display RAM bytes
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError>;

    /// Block until the bus can take the next write
    ///
    /// Writes themselves never wait; a write issued while the previous one
    /// is still draining fails with [`DisplayError::BusBusy`].
    fn wait_ready(&mut self) {}
}

impl<T: DisplayInterface + ?Sized> DisplayInterface for &mut T {
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        (**self).send_commands(commands)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        (**self).send_data(data)
    }

    fn wait_ready(&mut self) {
        (**self).wait_ready()
    }
}

/// I2C interface over a reload-capable controller
///
/// Each call is one bus transaction: the control byte goes out as the
/// header segment and the bytes follow in as many reload segments as they
/// need.
pub struct I2cInterface<R> {
    regs: R,
    address: u8,
}

impl<R: I2cRegisters> I2cInterface<R> {
    /// Create an interface to the display at the 7-bit `address`
    pub fn new(regs: R, address: u8) -> Self {
        Self { regs, address }
    }

    /// Target address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Borrow the controller registers
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Release the controller registers
    pub fn release(self) -> R {
        self.regs
    }

    fn write(&mut self, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        match transfer::write_with_header(&mut self.regs, self.address, &[control], bytes)? {
            Outcome::Completed => Ok(()),
            Outcome::Rejected => Err(DisplayError::Nack),
        }
    }
}

impl<R: I2cRegisters> DisplayInterface for I2cInterface<R> {
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.write(cmd::CONTROL_COMMAND, commands)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.write(cmd::CONTROL_DATA, data)
    }

    fn wait_ready(&mut self) {
        // Auto-stop of the previous transaction must finish before a new
        // one starts with reload set
        while self.regs.is_busy() {}
    }
}

/// 4-wire SPI interface
///
/// DC selects the stream (low = command, high = data), CS is active low and
/// asserted only for the duration of each write, RST is active low.
pub struct SpiInterface<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SPI, DC, CS, RST> SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus and control pins
    ///
    /// Leaves the display deselected, in command mode, and held in reset
    /// until [`SpiInterface::reset`] is called.
    pub fn new(spi: SPI, mut dc: DC, mut cs: CS, mut rst: RST) -> Self {
        cs.set_high();
        rst.set_low();
        dc.set_low();
        Self { spi, dc, cs, rst }
    }

    /// Pulse reset and leave the controller running
    pub fn reset<M: Millis + ?Sized>(&mut self, clock: &M) {
        self.rst.set_low();
        delay_ms(clock, 1);
        self.rst.set_high();
        delay_ms(clock, 1);
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }

    fn write(&mut self, data_mode: bool, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_state(data_mode);
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result.map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, DC, CS, RST> DisplayInterface for SpiInterface<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.write(false, commands)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.write(true, data)
    }
}
