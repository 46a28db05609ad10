//! Millisecond clock from the embassy time driver

use embassy_time::Instant;
use monoframe_hal::Millis;

/// [`Millis`] backed by `embassy_time::Instant`
///
/// Needs an embassy time driver (`time-driver-any` on embassy-stm32).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMillis;

impl Millis for EmbassyMillis {
    fn millis(&self) -> u32 {
        // Truncation gives the wrapping counter the trait expects
        Instant::now().as_millis() as u32
    }
}
