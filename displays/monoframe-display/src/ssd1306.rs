//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays over I2C or SPI. Drawing
//! happens in a local frame buffer; [`Ssd1306::update_display`] uploads it
//! in one data write.

use monoframe_hal::I2cRegisters;

use crate::cmd;
use crate::config::DisplayConfig;
use crate::framebuffer::{Framebuffer, PAGES, WIDTH};
use crate::interface::{DisplayError, DisplayInterface, I2cInterface};

/// Horizontal addressing over the whole panel, so a full buffer write
/// fills RAM from (0, page 0) to (127, page 7)
const FULL_WINDOW: [u8; 8] = [
    cmd::SET_MEM_ADDR_MODE,
    cmd::MEM_ADDR_MODE_HORIZONTAL,
    cmd::SET_COL_ADDR,
    0,
    (WIDTH - 1) as u8,
    cmd::SET_PAGE_ADDR,
    0,
    (PAGES - 1) as u8,
];

/// Horizontal scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Right,
    Left,
}

/// Frames between scroll steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollInterval {
    Frames2,
    Frames3,
    Frames4,
    Frames5,
    Frames25,
    Frames64,
    Frames128,
    Frames256,
}

impl ScrollInterval {
    /// Encoding used by the scroll setup commands
    pub const fn bits(self) -> u8 {
        match self {
            ScrollInterval::Frames5 => 0b000,
            ScrollInterval::Frames64 => 0b001,
            ScrollInterval::Frames128 => 0b010,
            ScrollInterval::Frames256 => 0b011,
            ScrollInterval::Frames3 => 0b100,
            ScrollInterval::Frames4 => 0b101,
            ScrollInterval::Frames25 => 0b110,
            ScrollInterval::Frames2 => 0b111,
        }
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<DI> {
    interface: DI,
    config: DisplayConfig,
    framebuffer: Framebuffer,
}

impl<R: I2cRegisters> Ssd1306<I2cInterface<R>> {
    /// Create an I2C driver at the address in `config`
    pub fn new_i2c(regs: R, config: DisplayConfig) -> Self {
        Self::new(I2cInterface::new(regs, config.address), config)
    }
}

impl<DI: DisplayInterface> Ssd1306<DI> {
    /// Create a new SSD1306 driver with a blank frame buffer
    ///
    /// Nothing is sent until [`Ssd1306::init`].
    pub fn new(interface: DI, config: DisplayConfig) -> Self {
        Self {
            interface,
            config,
            framebuffer: Framebuffer::new(),
        }
    }

    /// Panel configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Initialize the display and turn it on
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let commands = self.config.init_commands();

        #[cfg(feature = "defmt")]
        defmt::debug!("SSD1306 init: {} command bytes", commands.len());

        let result = self.interface.send_commands(&commands);

        #[cfg(feature = "defmt")]
        if let Err(e) = result {
            defmt::warn!("SSD1306 init failed: {}", e);
        }

        result
    }

    /// Send a single command byte
    pub fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.interface.send_commands(&[command])
    }

    /// Send a list of command and parameter bytes in one write
    pub fn write_command_list(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.interface.send_commands(commands)
    }

    /// Upload the whole frame buffer
    ///
    /// Sets the addressing window, then sends all 1024 bytes as one data
    /// write. Waits for the bus before each of the two writes.
    pub fn update_display(&mut self) -> Result<(), DisplayError> {
        self.interface.wait_ready();
        self.interface.send_commands(&FULL_WINDOW)?;
        self.interface.wait_ready();
        let result = self.interface.send_data(self.framebuffer.as_bytes());

        #[cfg(feature = "defmt")]
        if let Err(e) = result {
            defmt::warn!("SSD1306 frame upload failed: {}", e);
        }

        result
    }

    /// Upload the frame buffer one byte per write
    ///
    /// Far slower than [`Ssd1306::update_display`]; useful for bringing up
    /// a bus where long writes misbehave.
    pub fn update_display_slow(&mut self) -> Result<(), DisplayError> {
        self.interface.wait_ready();
        self.interface.send_commands(&FULL_WINDOW)?;
        for &byte in self.framebuffer.as_bytes().iter() {
            self.interface.wait_ready();
            self.interface.send_data(&[byte])?;
        }
        Ok(())
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.interface
            .send_commands(&[cmd::SET_CONTRAST, contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Turn display on/off (off is the controller's sleep mode)
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        if on {
            self.write_command(cmd::DISPLAY_ON)
        } else {
            self.write_command(cmd::DISPLAY_OFF)
        }
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let command = if inverted {
            cmd::DISPLAY_INVERTED
        } else {
            cmd::DISPLAY_NOT_INVERTED
        };
        self.write_command(command)?;
        self.config.inverted = inverted;
        Ok(())
    }

    /// Light every pixel regardless of RAM contents (or return to RAM)
    pub fn set_all_on(&mut self, all_on: bool) -> Result<(), DisplayError> {
        if all_on {
            self.write_command(cmd::DISPLAY_IGNORE_RAM)
        } else {
            self.write_command(cmd::DISPLAY_FOLLOW_RAM)
        }
    }

    /// Continuously scroll pages `start_page..=end_page` horizontally
    ///
    /// Any running scroll is stopped first. RAM written while scrolling may
    /// be corrupted; call [`Ssd1306::scroll_stop`] before the next update.
    pub fn scroll_horizontal(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
    ) -> Result<(), DisplayError> {
        if start_page > end_page || end_page as usize >= PAGES {
            return Err(DisplayError::InvalidCoordinates);
        }

        let setup = match direction {
            ScrollDirection::Right => cmd::SCROLL_RIGHT,
            ScrollDirection::Left => cmd::SCROLL_LEFT,
        };
        self.interface.send_commands(&[
            cmd::SCROLL_DEACTIVATE,
            setup,
            0x00,
            start_page,
            interval.bits(),
            end_page,
            0x00,
            0xFF,
            cmd::SCROLL_ACTIVATE,
        ])
    }

    /// Stop scrolling
    pub fn scroll_stop(&mut self) -> Result<(), DisplayError> {
        self.write_command(cmd::SCROLL_DEACTIVATE)
    }

    /// Frame buffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable frame buffer for drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Borrow the interface
    pub fn interface(&self) -> &DI {
        &self.interface
    }

    /// Release the interface
    pub fn release(self) -> DI {
        self.interface
    }
}
