//! Board-agnostic transfer logic for the Monoframe display stack
//!
//! This crate contains the part of the driver that does not depend on a
//! specific chip:
//!
//! - Chunked header+payload I2C write engine ([`transfer`])
//! - Segment schedule computation ([`transfer::segment_plan`])
//! - Software model of a reload-capable I2C controller ([`sim`], test/`sim` feature)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod transfer;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use transfer::{write, write_with_header, Outcome, Transfer, TransferError, TransferState};
