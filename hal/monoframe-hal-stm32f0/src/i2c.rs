//! Register-level I2C1 for STM32F0
//!
//! embassy-stm32 brings the peripheral up (clock, pins, timing) and is then
//! kept only as the owner of I2C1. Transfers go straight to CR2, ISR, ICR
//! and TXDR so the chunked writer can drive reload mode segment by segment,
//! which embassy's own transfer API does not expose.

use embassy_stm32::i2c::{Config, I2c, Master, SclPin, SdaPin};
use embassy_stm32::mode::Blocking;
use embassy_stm32::pac;
use embassy_stm32::pac::i2c::vals;
use embassy_stm32::peripherals::I2C1;
use embassy_stm32::time::Hertz;
use embassy_stm32::Peri;
use monoframe_hal::{Direction, I2cConfig, I2cRegisters};

/// I2C1 control and status registers
pub struct RegisterI2c<'d> {
    /// Keeps the peripheral (and its pins) claimed
    _owner: I2c<'d, Blocking, Master>,
    regs: pac::i2c::I2c,
}

impl<'d> RegisterI2c<'d> {
    /// Enable I2C1 in 7-bit controller mode at `config.frequency`
    ///
    /// SCL/SDA are typically PA9/PA10 or PB6/PB7 (AF4/AF1 on F042).
    pub fn new(
        peri: Peri<'d, I2C1>,
        scl: Peri<'d, impl SclPin<I2C1>>,
        sda: Peri<'d, impl SdaPin<I2C1>>,
        config: I2cConfig,
    ) -> Self {
        let mut bus_config = Config::default();
        bus_config.frequency = Hertz(config.frequency);

        let owner = I2c::new_blocking(peri, scl, sda, bus_config);
        let regs = pac::I2C1;
        // Start out of reload mode so the first STOP is not suppressed
        regs.cr2().modify(|w| w.set_reload(vals::Reload::COMPLETED));

        Self {
            _owner: owner,
            regs,
        }
    }
}

impl I2cRegisters for RegisterI2c<'_> {
    fn set_address(&mut self, address: u8) {
        // 7-bit address occupies SADD[7:1]
        self.regs
            .cr2()
            .modify(|w| w.set_sadd(u16::from(address) << 1));
    }

    fn set_direction(&mut self, direction: Direction) {
        let dir = match direction {
            Direction::Write => vals::Dir::WRITE,
            Direction::Read => vals::Dir::READ,
        };
        self.regs.cr2().modify(|w| w.set_dir(dir));
    }

    fn set_segment_len(&mut self, len: u8) {
        self.regs.cr2().modify(|w| w.set_nbytes(len));
    }

    fn set_autoend(&mut self, enabled: bool) {
        let autoend = if enabled {
            vals::Autoend::AUTOMATIC
        } else {
            vals::Autoend::SOFTWARE
        };
        self.regs.cr2().modify(|w| w.set_autoend(autoend));
    }

    fn set_reload(&mut self, enabled: bool) {
        let reload = if enabled {
            vals::Reload::NOT_COMPLETED
        } else {
            vals::Reload::COMPLETED
        };
        self.regs.cr2().modify(|w| w.set_reload(reload));
    }

    fn start(&mut self) {
        self.regs.cr2().modify(|w| w.set_start(true));
    }

    fn is_tx_ready(&self) -> bool {
        self.regs.isr().read().txis()
    }

    fn is_reload_pending(&self) -> bool {
        self.regs.isr().read().tcr()
    }

    fn is_nack(&self) -> bool {
        self.regs.isr().read().nackf()
    }

    fn clear_nack(&mut self) {
        self.regs.icr().write(|w| w.set_nackcf(true));
    }

    fn is_busy(&self) -> bool {
        self.regs.isr().read().busy()
    }

    fn write_byte(&mut self, byte: u8) {
        self.regs.txdr().write(|w| w.set_txdata(byte));
    }
}
