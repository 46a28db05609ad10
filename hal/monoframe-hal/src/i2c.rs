//! I2C controller register abstractions
//!
//! Provides a register-level view of an I2C master that supports
//! reload-style segmented transfers (NBYTES/RELOAD/AUTOEND, as found on the
//! STM32 "v2" I2C peripheral). Each method maps to a single register access.
//! Implementations must not loop, wait or make decisions; the transfer
//! engine in `monoframe-core` owns all sequencing.

/// Transfer direction programmed before START
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master transmits to the target
    Write,
    /// Master receives from the target
    Read,
}

/// I2C controller control/status registers
///
/// Setters must be visible to the very next poll. The NACK flag, once
/// cleared, must stay clear until the target rejects another byte.
/// `is_tx_ready` and `is_reload_pending` are independent flags and may
/// never be inferred from one another.
pub trait I2cRegisters {
    /// Program the 7-bit target address
    fn set_address(&mut self, address: u8);

    /// Program the transfer direction
    fn set_direction(&mut self, direction: Direction);

    /// Program the number of bytes in the current segment (NBYTES)
    fn set_segment_len(&mut self, len: u8);

    /// Enable or disable automatic STOP once the final segment completes
    fn set_autoend(&mut self, enabled: bool);

    /// Set or clear reload mode
    ///
    /// While set, an exhausted segment raises the reload-pending flag
    /// instead of ending the transaction.
    fn set_reload(&mut self, enabled: bool);

    /// Generate a START condition followed by the address byte
    fn start(&mut self);

    /// Transmit data register is empty and more bytes are expected (TXIS)
    fn is_tx_ready(&self) -> bool;

    /// Segment finished while reload mode was set (TCR)
    fn is_reload_pending(&self) -> bool;

    /// Target did not acknowledge the last byte (NACKF)
    fn is_nack(&self) -> bool;

    /// Clear the NACK flag
    fn clear_nack(&mut self);

    /// A transaction is in progress on the bus (BUSY)
    fn is_busy(&self) -> bool;

    /// Write one byte to the transmit data register
    fn write_byte(&mut self, byte: u8);
}

impl<T: I2cRegisters + ?Sized> I2cRegisters for &mut T {
    fn set_address(&mut self, address: u8) {
        (**self).set_address(address)
    }

    fn set_direction(&mut self, direction: Direction) {
        (**self).set_direction(direction)
    }

    fn set_segment_len(&mut self, len: u8) {
        (**self).set_segment_len(len)
    }

    fn set_autoend(&mut self, enabled: bool) {
        (**self).set_autoend(enabled)
    }

    fn set_reload(&mut self, enabled: bool) {
        (**self).set_reload(enabled)
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn is_tx_ready(&self) -> bool {
        (**self).is_tx_ready()
    }

    fn is_reload_pending(&self) -> bool {
        (**self).is_reload_pending()
    }

    fn is_nack(&self) -> bool {
        (**self).is_nack()
    }

    fn clear_nack(&mut self) {
        (**self).clear_nack()
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
