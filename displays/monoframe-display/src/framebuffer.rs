//! 1-bit frame buffer in SSD1306 RAM layout
//!
//! The controller's display RAM is organised as 8 pages of 128 columns; each
//! byte is a vertical strip of 8 pixels with the least significant bit on
//! top. Keeping the buffer in that layout lets it be uploaded unchanged.
//!
//! ```text
//!            x=0      x=1           x=127
//! page 0   [byte 0] [byte 1] ... [byte 127]    rows 0-7
//! page 1   [  128 ] [  129 ] ... [  255   ]    rows 8-15
//!   ...
//! page 7   [  896 ] [  897 ] ... [  1023  ]    rows 56-63
//! ```

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;

/// Display width in pixels
pub const WIDTH: usize = 128;
/// Display height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;
/// Frame buffer size in bytes
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Pixel operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pixel {
    /// Clear (black)
    Off,
    /// Set (lit)
    On,
    /// Invert the current value
    Toggle,
}

impl Pixel {
    /// Apply to the bits selected by `mask`
    fn apply(self, byte: &mut u8, mask: u8) {
        match self {
            Pixel::Off => *byte &= !mask,
            Pixel::On => *byte |= mask,
            Pixel::Toggle => *byte ^= mask,
        }
    }
}

impl From<bool> for Pixel {
    fn from(on: bool) -> Self {
        if on {
            Pixel::On
        } else {
            Pixel::Off
        }
    }
}

impl From<BinaryColor> for Pixel {
    fn from(color: BinaryColor) -> Self {
        Pixel::from(color.is_on())
    }
}

/// Frame buffer for a 128x64 panel
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("lit", &self.lit_count())
            .finish()
    }
}

impl Framebuffer {
    /// Blank frame buffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Byte index and bit mask for a pixel, if on screen
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }

    /// Set, clear or toggle one pixel; off-screen coordinates are ignored
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        if let Some((index, mask)) = Self::locate(x, y) {
            color.apply(&mut self.buffer[index], mask);
        }
    }

    /// Set, clear or toggle the 8-pixel column strip at `x` in `page`
    pub fn draw_page(&mut self, x: i32, page: i32, color: Pixel) {
        if x < 0 || page < 0 || x >= WIDTH as i32 || page >= PAGES as i32 {
            return;
        }
        let index = page as usize * WIDTH + x as usize;
        color.apply(&mut self.buffer[index], 0xFF);
    }

    /// Whether a pixel is lit (`None` off screen)
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<bool> {
        Self::locate(x, y).map(|(index, mask)| self.buffer[index] & mask != 0)
    }

    /// Apply `color` to every pixel
    pub fn fill(&mut self, color: Pixel) {
        for byte in self.buffer.iter_mut() {
            color.apply(byte, 0xFF);
        }
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.fill(Pixel::Off);
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }

    /// Raw bytes in display RAM order
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Framebuffer[{}x{}, {} lit]", WIDTH, HEIGHT, self.lit_count());
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            self.draw_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}
