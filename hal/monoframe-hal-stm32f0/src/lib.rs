//! STM32F0-specific HAL for Monoframe
//!
//! This crate provides STM32F0 implementations of the `monoframe-hal`
//! traits. It supports various STM32F0 chips including:
//!
//! - STM32F042F6 / STM32F042K6
//!
//! # Features
//!
//! - `stm32f042f6` - Enable support for STM32F042F6P6
//! - `stm32f042k6` - Enable support for STM32F042K6T6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripherals are brought up with embassy-stm32 (clocks, pin muxing, bus
//! timing) and then handed to the adapters here:
//!
//! - [`i2c::RegisterI2c`] drives I2C1's control and status registers
//!   directly, which the chunked transfer engine needs for reload mode
//! - [`spi::BlockingSpi`] wraps any blocking `embedded-hal` SPI bus
//! - [`gpio::PushPullPin`] wraps an embassy output
//! - [`time::EmbassyMillis`] reads the embassy time driver

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod spi;
pub mod time;

pub use gpio::PushPullPin;
pub use i2c::RegisterI2c;
pub use spi::{BlockingSpi, SpiBusError};
pub use time::EmbassyMillis;

// Re-export shared types from monoframe-hal
pub use monoframe_hal::{I2cConfig, SpiConfig};
