//! Panel configuration
//!
//! Everything the init sequence needs to know about how the panel is wired.
//! The defaults match a common 128x64 I2C module with the charge pump on
//! and no mirroring.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cmd;

/// Default 7-bit I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit I2C address (SA0 high)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Length of the sequence [`DisplayConfig::init_commands`] produces
pub const INIT_LEN: usize = 23;

/// SSD1306 panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address (ignored on SPI)
    pub address: u8,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Generate the panel voltage from the internal charge pump
    pub charge_pump: bool,
    /// Map column 127 to SEG0 (mirror horizontally)
    pub segment_remap: bool,
    /// Scan COM lines from COM[N-1] to COM0 (mirror vertically)
    pub com_scan_remapped: bool,
    /// COM pins hardware configuration byte
    pub com_pins: u8,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_div: u8,
    /// Multiplex ratio (rows - 1)
    pub mux_ratio: u8,
    /// Vertical display offset in rows
    pub display_offset: u8,
    /// Pre-charge period byte
    pub precharge: u8,
    /// VCOMH deselect level byte
    pub vcomh: u8,
    /// Start with inverted polarity
    pub inverted: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl DisplayConfig {
    /// Default configuration at the given I2C address
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            contrast: 0xCF,
            charge_pump: true,
            segment_remap: false,
            com_scan_remapped: false,
            com_pins: 0x12,
            clock_div: 0x80,
            mux_ratio: 0x3F,
            display_offset: 0x00,
            precharge: 0xF1,
            vcomh: 0x40,
            inverted: false,
        }
    }

    /// Panel mounted upside down (both axes mirrored)
    pub const fn rotated(mut self) -> Self {
        self.segment_remap = true;
        self.com_scan_remapped = true;
        self
    }

    /// Command list that brings the panel from reset to displaying RAM
    pub fn init_commands(&self) -> [u8; INIT_LEN] {
        let charge_pump = if self.charge_pump {
            cmd::CHARGE_PUMP_ON
        } else {
            cmd::CHARGE_PUMP_OFF
        };
        let com_scan = if self.com_scan_remapped {
            cmd::SET_COM_SCAN_REMAPPED
        } else {
            cmd::SET_COM_SCAN_NORMAL
        };
        let polarity = if self.inverted {
            cmd::DISPLAY_INVERTED
        } else {
            cmd::DISPLAY_NOT_INVERTED
        };

        [
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            self.clock_div,
            cmd::SET_MUX_RATIO,
            self.mux_ratio,
            cmd::SET_DISPLAY_OFFSET,
            self.display_offset,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            charge_pump,
            cmd::SET_SEG_REMAP | u8::from(self.segment_remap),
            com_scan,
            cmd::SET_COM_PINS,
            self.com_pins,
            cmd::SET_CONTRAST,
            self.contrast,
            cmd::SET_PRECHARGE,
            self.precharge,
            cmd::SET_VCOMH_DESELECT,
            self.vcomh,
            cmd::DISPLAY_FOLLOW_RAM,
            polarity,
            cmd::DISPLAY_ON,
        ]
    }
}
