//! Monoframe Demo Firmware
//!
//! Exercises the SSD1306 driver on an STM32F042K6: solid fills, a
//! checkerboard, pixel and rectangle toggles, a fan of lines in every
//! octant, and two text boxes. Every frame is a full 1024-byte upload.
//!
//! Wiring:
//! - I2C (default): SCL=PA9, SDA=PA10, 100 kHz
//! - SPI (`--no-default-features --features defmt,spi`): SCK=PB3,
//!   MOSI=PB5, CS=PA4, DC=PA1, RST=PA2

#![no_std]
#![no_main]

#[cfg(all(feature = "i2c", feature = "spi"))]
compile_error!("features `i2c` and `spi` are mutually exclusive");

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use monoframe_display::graphics::{
    draw_checkerboard, draw_line, draw_rectangle, draw_textbox, fill_display,
};
use monoframe_display::{DisplayConfig, DisplayInterface, Pixel, Ssd1306};
use {defmt_rtt as _, panic_probe as _};

/// Pause between demo frames
const FRAME_DELAY_MS: u64 = 200;

/// Repetitions of the fill/pattern sequence
const ROUNDS: usize = 5;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Monoframe demo starting...");

    let p = embassy_stm32::init(Default::default());
    let config = DisplayConfig::default();

    #[cfg(feature = "i2c")]
    let mut display = {
        use monoframe_hal_stm32f0::{I2cConfig, RegisterI2c};

        let regs = RegisterI2c::new(p.I2C1, p.PA9, p.PA10, I2cConfig::STANDARD);
        Ssd1306::new_i2c(regs, config)
    };

    #[cfg(feature = "spi")]
    let mut display = {
        use embassy_stm32::spi::Spi;
        use monoframe_display::SpiInterface;
        use monoframe_hal_stm32f0::spi::bus_config;
        use monoframe_hal_stm32f0::{BlockingSpi, EmbassyMillis, PushPullPin, SpiConfig};

        let bus = Spi::new_blocking_txonly(p.SPI1, p.PB3, p.PB5, bus_config(&SpiConfig::default()));
        let mut interface = SpiInterface::new(
            BlockingSpi::new(bus),
            PushPullPin::new(p.PA1, false),
            PushPullPin::new(p.PA4, true),
            PushPullPin::new(p.PA2, false),
        );
        interface.reset(&EmbassyMillis);
        Ssd1306::new(interface, config)
    };

    if let Err(e) = display.init() {
        error!("Failed to initialize display: {:?}", e);
        return;
    }
    info!("OLED initialized");
    show(&mut display, "blank").await;

    for round in 0..ROUNDS {
        debug!("Pattern round {}", round);
        patterns(&mut display).await;
    }

    fill_display(display.framebuffer_mut(), Pixel::Off);
    show(&mut display, "clear").await;

    lines(display.framebuffer_mut());
    show(&mut display, "lines").await;

    textboxes(display.framebuffer_mut());
    show(&mut display, "text").await;

    info!("Demo finished");
}

/// Upload the frame buffer and hold it on screen
async fn show<DI: DisplayInterface>(display: &mut Ssd1306<DI>, frame: &str) {
    match display.update_display() {
        Ok(()) => trace!("Frame '{}' shown", frame),
        Err(e) => warn!("Frame '{}' not shown: {:?}", frame, e),
    }
    Timer::after_millis(FRAME_DELAY_MS).await;
}

/// Fills, checkerboard, inversion, then pixel and rectangle toggles
async fn patterns<DI: DisplayInterface>(display: &mut Ssd1306<DI>) {
    fill_display(display.framebuffer_mut(), Pixel::On);
    show(display, "on").await;

    draw_checkerboard(display.framebuffer_mut());
    show(display, "checkerboard").await;

    fill_display(display.framebuffer_mut(), Pixel::Off);
    show(display, "off").await;

    draw_checkerboard(display.framebuffer_mut());
    fill_display(display.framebuffer_mut(), Pixel::Toggle);
    show(display, "inverted checkerboard").await;

    let fb = display.framebuffer_mut();
    // Corners: top left, bottom left, bottom right
    fb.draw_pixel(0, 0, Pixel::On);
    fb.draw_pixel(4, 1, Pixel::On);
    fb.draw_pixel(0, 63, Pixel::On);
    fb.draw_pixel(127, 63, Pixel::Toggle);
    draw_rectangle(fb, 2, 1, 31, 9, Pixel::Toggle);
    draw_rectangle(fb, 2, 35, 127, 37, Pixel::Toggle);
    fb.draw_pixel(4, 1, Pixel::Toggle);
    show(display, "pixels").await;
}

/// One line per slope class, in both directions
fn lines(fb: &mut monoframe_display::Framebuffer) {
    // Axis aligned
    draw_line(fb, 0, 32, 127, 32, Pixel::On);
    draw_line(fb, 63, 0, 63, 63, Pixel::On);

    // Positive slopes: small, 1, large, then backwards
    draw_line(fb, 0, 0, 127, 63, Pixel::On);
    draw_line(fb, 64, 0, 127, 63, Pixel::On);
    draw_line(fb, 96, 0, 127, 63, Pixel::On);
    draw_line(fb, 127, 63, 0, 32, Pixel::On);
    draw_line(fb, 127, 63, 112, 0, Pixel::On);

    // Negative slopes: small, -1, large, then backwards
    draw_line(fb, 0, 63, 127, 0, Pixel::On);
    draw_line(fb, 0, 63, 63, 0, Pixel::On);
    draw_line(fb, 0, 63, 32, 0, Pixel::On);
    draw_line(fb, 16, 0, 0, 63, Pixel::On);
    draw_line(fb, 127, 32, 0, 63, Pixel::On);
}

/// Dark box with lit text next to a lit box with dark text
fn textboxes(fb: &mut monoframe_display::Framebuffer) {
    let shown = draw_textbox(fb, "two \nlines", 2, 2, 36, 28, Pixel::Off, Pixel::On);
    let shown = shown + draw_textbox(fb, "three\nlines\nnow!", 60, 2, 94, 40, Pixel::On, Pixel::Off);
    debug!("{} characters drawn", shown);
}
