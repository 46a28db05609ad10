//! Chunked I2C write engine
//!
//! Writes a short header followed by an arbitrarily long payload as a single
//! bus transaction on controllers whose byte counter (NBYTES) is only eight
//! bits wide. The header is sent as the first segment with reload mode set;
//! the payload follows in segments of at most [`MAX_SEGMENT_LEN`] bytes, each
//! one programmed after the controller reports that the previous segment is
//! exhausted. Reload mode is cleared just before the final segment so the
//! armed auto-stop closes the transaction.
//!
//! ```text
//! START | addr | header (≤255) | payload[0..255] | ... | payload[n*255..] | STOP
//!              ^ segment 0     ^ reload          ^ reload                ^ reload cleared
//! ```
//!
//! The engine never retries and never times out. A NACK at any byte ends
//! the call with [`Outcome::Rejected`]; what to do next is up to the caller.

pub mod engine;
pub mod plan;
pub mod state;

pub use engine::{write, write_with_header, Transfer};
pub use plan::{segment_plan, Segment, SegmentKind, SegmentPlan};
pub use state::TransferState;

/// Largest value the segment length register can hold
pub const MAX_SEGMENT_LEN: usize = 255;

/// Longest header that fits the first segment without chunking
pub const MAX_HEADER_LEN: usize = MAX_SEGMENT_LEN;

/// Highest valid 7-bit target address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Result of a transfer that was admitted onto the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Every byte was sent and the transaction was closed by auto-stop
    Completed,
    /// The target NACKed a byte; the logical write is in an undefined state
    Rejected,
}

/// Transfer refused before touching the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// Header does not fit in a single segment (length given)
    HeaderTooLong(usize),
    /// Address is wider than 7 bits
    InvalidAddress(u8),
    /// A previous transaction still owns the bus
    BusBusy,
}
