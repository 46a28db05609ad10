//! GPIO outputs for STM32F0

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peri;
use monoframe_hal::OutputPin;

/// Push-pull output pin
pub struct PushPullPin<'d> {
    pin: Output<'d>,
}

impl<'d> PushPullPin<'d> {
    /// Configure `pin` as a low-speed push-pull output at the given level
    pub fn new(pin: Peri<'d, impl Pin>, high: bool) -> Self {
        let level = if high { Level::High } else { Level::Low };
        Self {
            pin: Output::new(pin, level, Speed::Low),
        }
    }
}

impl<'d> From<Output<'d>> for PushPullPin<'d> {
    fn from(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPullPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
