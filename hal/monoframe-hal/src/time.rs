//! Millisecond time base
//!
//! A free-running millisecond counter, typically advanced by a 1 kHz
//! SysTick interrupt. Nothing in the transfer engine depends on it; it is
//! used for display reset pulses and demo pacing.

/// Free-running millisecond counter
pub trait Millis {
    /// Milliseconds since the time base was started (wraps at `u32::MAX`)
    fn millis(&self) -> u32;
}

/// Busy-wait for `ms` milliseconds
///
/// Compares elapsed time rather than absolute deadlines so the wait is
/// correct across counter wrap-around.
pub fn delay_ms<M: Millis + ?Sized>(clock: &M, ms: u32) {
    let start = clock.millis();
    while clock.millis().wrapping_sub(start) < ms {}
}
