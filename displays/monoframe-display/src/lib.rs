//! SSD1306 OLED driver for Monoframe
//!
//! This crate provides:
//! - `DisplayInterface` trait with I2C and SPI implementations
//! - `Ssd1306` driver: init sequence, frame upload, contrast, scrolling
//! - `Framebuffer` with the controller's page-major pixel layout
//! - Drawing primitives (lines, rectangles, text boxes) on the frame buffer
//!
//! # Architecture
//!
//! Drawing only touches the in-RAM frame buffer. Nothing reaches the panel
//! until [`Ssd1306::update_display`] uploads the whole buffer.
//!
//! ```text
//! graphics ──► Framebuffer ──► Ssd1306 ──► DisplayInterface
//!                                               │
//!                                 ┌─────────────┴─────────────┐
//!                                 ▼                           ▼
//!                           I2cInterface                SpiInterface
//!                      (monoframe-core write)     (SpiBus + DC/CS/RST pins)
//! ```
//!
//! ## Bus variants
//!
//! - **I2C**: every command list and the full frame go out as a single
//!   transaction. The 1024-byte frame is larger than the controller's
//!   255-byte counter, so the chunked writer in `monoframe-core` splits it
//!   into reload segments behind one START/STOP.
//!
//! - **SPI**: the data/command line selects the byte stream and chip-select
//!   brackets each write.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod cmd;
pub mod config;
pub mod framebuffer;
pub mod graphics;
pub mod interface;
pub mod ssd1306;

// Re-export key types
pub use config::DisplayConfig;
pub use framebuffer::{Framebuffer, Pixel, BUFFER_SIZE, HEIGHT, PAGES, WIDTH};
pub use interface::{DisplayError, DisplayInterface, I2cInterface, SpiInterface};
pub use ssd1306::{ScrollDirection, ScrollInterval, Ssd1306};
