//! Monoframe Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs (STM32F0, host simulation, etc.). The transfer
//! engine and the display driver are written against these traits only.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monoframe-display (SSD1306 driver)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monoframe-core (chunked I2C transfer)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monoframe-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ monoframe-hal-│       │ SimRegisters  │
//! │    stm32f0    │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`i2c::I2cRegisters`] - I2C controller control/status registers
//! - [`spi::SpiBus`] - SPI bus write operations
//! - [`time::Millis`] - Millisecond tick counter

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod spi;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::{Direction, I2cConfig, I2cRegisters};
pub use spi::{SpiBus, SpiConfig};
pub use time::Millis;
