//! Drawing primitives on the frame buffer
//!
//! All coordinates are in pixels with the origin at the top-left corner.
//! Anything that falls off screen is clipped pixel by pixel. Text uses the
//! `embedded-graphics` mono fonts; the `fg` [`Pixel`] operation is applied to
//! every lit glyph pixel, so text can be drawn lit, cleared, or inverted
//! over a background.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;

use crate::framebuffer::{Framebuffer, Pixel, HEIGHT, PAGES, WIDTH};

/// Font used by [`draw_character`] and [`draw_textbox`]
pub const TEXT_FONT: &MonoFont<'static> = &FONT_6X10;

/// Blank rows between text lines in a textbox
pub const LINE_SPACING: i32 = 2;
/// Horizontal padding inside a textbox
pub const XPAD: i32 = 2;
/// Vertical padding inside a textbox
pub const YPAD: i32 = 2;

/// Side of one checkerboard square
const CHECKER_SIZE: i32 = 8;

/// Apply `color` to the whole display
pub fn fill_display(fb: &mut Framebuffer, color: Pixel) {
    for page in 0..PAGES as i32 {
        for x in 0..WIDTH as i32 {
            fb.draw_page(x, page, color);
        }
    }
}

/// Draw an 8x8 checkerboard with a lit top-left square
pub fn draw_checkerboard(fb: &mut Framebuffer) {
    for y in 0..HEIGHT as i32 {
        for x in 0..WIDTH as i32 {
            let lit = (x / CHECKER_SIZE) % 2 == (y / CHECKER_SIZE) % 2;
            fb.draw_pixel(x, y, lit.into());
        }
    }
}

/// Fill the rectangle with corners (x0, y0) and (x1, y1), both inclusive
///
/// Nothing is drawn if `x0 > x1` or `y0 > y1`.
pub fn draw_rectangle(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Pixel) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            fb.draw_pixel(x, y, color);
        }
    }
}

/// Draw a line from (x0, y0) to (x1, y1), both endpoints included
///
/// Bresenham's algorithm. Lines are always walked along the major axis in
/// increasing order, so swapping the endpoints draws the same pixels and
/// every pixel is visited exactly once (safe with [`Pixel::Toggle`]).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Pixel) {
    if (y1 - y0).abs() > (x1 - x0).abs() {
        if y1 > y0 {
            line_steep(fb, x0, y0, x1, y1, color);
        } else {
            line_steep(fb, x1, y1, x0, y0, color);
        }
    } else if x1 > x0 {
        line_shallow(fb, x0, y0, x1, y1, color);
    } else {
        line_shallow(fb, x1, y1, x0, y0, color);
    }
}

/// |slope| <= 1, x0 <= x1
fn line_shallow(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Pixel) {
    let dx = x1 - x0;
    let (dy, step) = if y1 >= y0 { (y1 - y0, 1) } else { (y0 - y1, -1) };
    let mut error = 2 * dy - dx;
    let mut y = y0;

    for x in x0..=x1 {
        fb.draw_pixel(x, y, color);
        if error > 0 {
            y += step;
            error -= 2 * dx;
        }
        error += 2 * dy;
    }
}

/// |slope| > 1, y0 < y1
fn line_steep(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Pixel) {
    let dy = y1 - y0;
    let (dx, step) = if x1 >= x0 { (x1 - x0, 1) } else { (x0 - x1, -1) };
    let mut error = 2 * dx - dy;
    let mut x = x0;

    for y in y0..=y1 {
        fb.draw_pixel(x, y, color);
        if error > 0 {
            x += step;
            error -= 2 * dy;
        }
        error += 2 * dx;
    }
}

/// Draw target that applies one [`Pixel`] operation to every lit pixel
struct Ink<'a> {
    fb: &'a mut Framebuffer,
    color: Pixel,
}

impl OriginDimensions for Ink<'_> {
    fn size(&self) -> Size {
        self.fb.size()
    }
}

impl DrawTarget for Ink<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, lit) in pixels {
            if lit.is_on() {
                self.fb.draw_pixel(point.x, point.y, self.color);
            }
        }
        Ok(())
    }
}

/// Draw one character with its top-left corner at (x, y)
///
/// Characters outside printable ASCII render as the font's replacement
/// glyph.
pub fn draw_character(fb: &mut Framebuffer, c: char, x: i32, y: i32, color: Pixel) {
    let mut utf8 = [0u8; 4];
    let text = c.encode_utf8(&mut utf8);
    let style = MonoTextStyle::new(TEXT_FONT, BinaryColor::On);
    let mut ink = Ink { fb, color };
    // Infallible
    let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut ink);
}

/// Fill a box with `bg` and write `text` inside it in `fg`
///
/// Text starts [`XPAD`]/[`YPAD`] pixels in from the top-left corner and wraps
/// when the next character would cross the right padding. `'\n'` starts a
/// new line. Drawing stops at the first line that would cross the bottom
/// padding. Returns the number of characters drawn (newlines excluded).
///
/// To fit `cols` characters on `lines` lines:
/// `x1 = x0 + 2 * XPAD + cols * char_width` and
/// `y1 = y0 + 2 * YPAD + lines * char_height + (lines - 1) * LINE_SPACING`.
#[allow(clippy::too_many_arguments)]
pub fn draw_textbox(
    fb: &mut Framebuffer,
    text: &str,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    bg: Pixel,
    fg: Pixel,
) -> usize {
    draw_rectangle(fb, x0, y0, x1, y1, bg);

    let char_width = TEXT_FONT.character_size.width as i32;
    let char_height = TEXT_FONT.character_size.height as i32;

    let mut x = x0 + XPAD;
    let mut y = y0 + YPAD;
    let mut drawn = 0;

    for c in text.chars() {
        if c == '\n' || x + char_width + XPAD > x1 {
            x = x0 + XPAD;
            y += char_height + LINE_SPACING;
            if c == '\n' {
                continue;
            }
        }
        if y + char_height + YPAD > y1 {
            break;
        }

        draw_character(fb, c, x, y, fg);
        x += char_width;
        drawn += 1;
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CW: i32 = 6;
    const CH: i32 = 10;

    /// Bottom-right corner of a textbox sized for `cols` x `lines` characters
    fn fitted(cols: i32, lines: i32) -> (i32, i32) {
        (
            2 * XPAD + cols * CW,
            2 * YPAD + lines * CH + (lines - 1) * LINE_SPACING,
        )
    }

    fn lit_in(fb: &Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32) -> u32 {
        let mut count = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if fb.get_pixel(x, y) == Some(true) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_font_metrics() {
        assert_eq!(TEXT_FONT.character_size, Size::new(CW as u32, CH as u32));
    }

    #[test]
    fn test_fill_display() {
        let mut fb = Framebuffer::new();
        fill_display(&mut fb, Pixel::On);
        assert_eq!(fb.lit_count(), 128 * 64);
        fill_display(&mut fb, Pixel::Toggle);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_checkerboard() {
        let mut fb = Framebuffer::new();
        draw_checkerboard(&mut fb);

        assert_eq!(fb.get_pixel(0, 0), Some(true));
        assert_eq!(fb.get_pixel(7, 7), Some(true));
        assert_eq!(fb.get_pixel(8, 0), Some(false));
        assert_eq!(fb.get_pixel(0, 8), Some(false));
        assert_eq!(fb.get_pixel(8, 8), Some(true));
        assert_eq!(fb.lit_count(), 128 * 64 / 2);
        // Whole pages alternate between 0xFF and 0x00
        assert_eq!(fb.as_bytes()[0], 0xFF);
        assert_eq!(fb.as_bytes()[8], 0x00);
    }

    #[test]
    fn test_rectangle_inclusive() {
        let mut fb = Framebuffer::new();
        draw_rectangle(&mut fb, 10, 10, 19, 14, Pixel::On);
        assert_eq!(fb.lit_count(), 10 * 5);
        assert_eq!(fb.get_pixel(19, 14), Some(true));
        assert_eq!(fb.get_pixel(20, 14), Some(false));
    }

    #[test]
    fn test_rectangle_inverted_corners_draw_nothing() {
        let mut fb = Framebuffer::new();
        draw_rectangle(&mut fb, 20, 0, 10, 5, Pixel::On);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_rectangle_clipped() {
        let mut fb = Framebuffer::new();
        draw_rectangle(&mut fb, 120, 60, 140, 80, Pixel::On);
        assert_eq!(fb.lit_count(), 8 * 4);
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let mut fb = Framebuffer::new();
        draw_line(&mut fb, 0, 5, 127, 5, Pixel::On);
        assert_eq!(fb.lit_count(), 128);

        fb.clear();
        draw_line(&mut fb, 3, 63, 3, 0, Pixel::On);
        assert_eq!(fb.lit_count(), 64);
        assert_eq!(lit_in(&fb, 3, 0, 3, 63), 64);
    }

    #[test]
    fn test_diagonal_line() {
        let mut fb = Framebuffer::new();
        draw_line(&mut fb, 0, 0, 63, 63, Pixel::On);
        assert_eq!(fb.lit_count(), 64);
        assert!((0..64).all(|i| fb.get_pixel(i, i) == Some(true)));
    }

    #[test]
    fn test_line_endpoints_included() {
        for &(x0, y0, x1, y1) in &[
            (0, 0, 127, 63),
            (127, 0, 0, 63),
            (10, 60, 20, 2),
            (64, 32, 64, 32),
            (5, 40, 100, 38),
        ] {
            let mut fb = Framebuffer::new();
            draw_line(&mut fb, x0, y0, x1, y1, Pixel::On);
            assert_eq!(fb.get_pixel(x0, y0), Some(true));
            assert_eq!(fb.get_pixel(x1, y1), Some(true));
            // One pixel per step along the major axis
            let major = (x1 - x0).abs().max((y1 - y0).abs()) + 1;
            assert_eq!(fb.lit_count(), major as u32);
        }
    }

    #[test]
    fn test_line_direction_independent() {
        let mut forward = Framebuffer::new();
        let mut backward = Framebuffer::new();
        draw_line(&mut forward, 3, 7, 90, 50, Pixel::On);
        draw_line(&mut backward, 90, 50, 3, 7, Pixel::On);
        assert_eq!(forward, backward);

        let mut forward = Framebuffer::new();
        let mut backward = Framebuffer::new();
        draw_line(&mut forward, 10, 0, 30, 63, Pixel::On);
        draw_line(&mut backward, 30, 63, 10, 0, Pixel::On);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_toggle_line_twice_restores() {
        let mut fb = Framebuffer::new();
        draw_checkerboard(&mut fb);
        let before = fb.clone();
        draw_line(&mut fb, 0, 63, 127, 0, Pixel::Toggle);
        assert_ne!(fb, before);
        draw_line(&mut fb, 0, 63, 127, 0, Pixel::Toggle);
        assert_eq!(fb, before);
    }

    #[test]
    fn test_character_stays_in_cell() {
        let mut fb = Framebuffer::new();
        draw_character(&mut fb, 'A', 20, 30, Pixel::On);
        let total = fb.lit_count();
        assert!(total > 0);
        assert_eq!(lit_in(&fb, 20, 30, 20 + CW - 1, 30 + CH - 1), total);
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut fb = Framebuffer::new();
        draw_character(&mut fb, ' ', 0, 0, Pixel::On);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_character_off_on_lit_background() {
        let mut fb = Framebuffer::new();
        fill_display(&mut fb, Pixel::On);
        draw_character(&mut fb, 'M', 0, 0, Pixel::Off);
        let cleared = (128 * 64) - fb.lit_count();
        assert!(cleared > 0);
        // Only the glyph is cleared, not the whole cell
        assert!(cleared < (CW * CH) as u32);
    }

    #[test]
    fn test_textbox_fits_exactly() {
        let (x1, y1) = fitted(4, 2);
        let mut fb = Framebuffer::new();
        let drawn = draw_textbox(&mut fb, "ABCD\nEFGH", 0, 0, x1, y1, Pixel::Off, Pixel::On);
        assert_eq!(drawn, 8);
    }

    #[test]
    fn test_textbox_wraps() {
        let (x1, y1) = fitted(3, 2);
        let mut fb = Framebuffer::new();
        let drawn = draw_textbox(&mut fb, "ABCDEF", 0, 0, x1, y1, Pixel::Off, Pixel::On);
        assert_eq!(drawn, 6);
        // Second line starts back at the left padding
        let second_line = YPAD + CH + LINE_SPACING;
        assert!(lit_in(&fb, XPAD, second_line, XPAD + CW - 1, second_line + CH - 1) > 0);
    }

    #[test]
    fn test_textbox_clips_at_bottom() {
        let (x1, y1) = fitted(3, 1);
        let mut fb = Framebuffer::new();
        let drawn = draw_textbox(&mut fb, "ABCDEF", 0, 0, x1, y1, Pixel::Off, Pixel::On);
        assert_eq!(drawn, 3);
        assert_eq!(lit_in(&fb, 0, y1 + 1, 127, 63), 0);
    }

    #[test]
    fn test_textbox_background() {
        let (x1, y1) = fitted(5, 1);
        let mut fb = Framebuffer::new();
        draw_textbox(&mut fb, "hi", 10, 10, 10 + x1, 10 + y1, Pixel::On, Pixel::Off);

        let area = ((x1 + 1) * (y1 + 1)) as u32;
        let lit = fb.lit_count();
        assert!(lit < area);
        assert_eq!(fb.get_pixel(10, 10), Some(true));
        assert_eq!(fb.get_pixel(10 + x1, 10 + y1), Some(true));
        assert_eq!(fb.get_pixel(9, 10), Some(false));
    }

    #[test]
    fn test_textbox_too_small_draws_background_only() {
        let mut fb = Framebuffer::new();
        let drawn = draw_textbox(&mut fb, "A", 0, 0, 5, 5, Pixel::On, Pixel::Off);
        assert_eq!(drawn, 0);
        assert_eq!(fb.lit_count(), 36);
    }

    proptest! {
        #[test]
        fn prop_line_is_one_pixel_per_major_step(
            x0 in 0i32..128, y0 in 0i32..64, x1 in 0i32..128, y1 in 0i32..64,
        ) {
            let mut forward = Framebuffer::new();
            draw_line(&mut forward, x0, y0, x1, y1, Pixel::On);

            let major = (x1 - x0).abs().max((y1 - y0).abs()) + 1;
            prop_assert_eq!(forward.lit_count(), major as u32);
            prop_assert_eq!(forward.get_pixel(x0, y0), Some(true));
            prop_assert_eq!(forward.get_pixel(x1, y1), Some(true));

            let mut backward = Framebuffer::new();
            draw_line(&mut backward, x1, y1, x0, y0, Pixel::On);
            prop_assert_eq!(forward, backward);
        }
    }
}
