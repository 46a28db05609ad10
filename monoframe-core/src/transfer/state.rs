//! Transfer state machine states

use super::Outcome;

/// Phase of a chunked write
///
/// ```text
/// Idle -> HeaderStream -> ReloadPending -> PayloadStream -> Completed
///              |               |    ^            |
///              |               |    +------------+ (more payload)
///              v               v                 v
///           Rejected        Rejected          Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferState {
    /// Admitted, nothing programmed yet
    Idle,
    /// START issued, header bytes being pushed
    HeaderStream,
    /// Previous segment pushed; waiting for the controller to request a reload
    ReloadPending,
    /// Payload segment programmed, bytes being pushed
    PayloadStream,
    /// All bytes sent, auto-stop armed (terminal)
    Completed,
    /// Target NACKed a byte (terminal)
    Rejected,
}

impl TransferState {
    /// Check if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Completed | TransferState::Rejected)
    }

    /// Outcome for a terminal state
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TransferState::Completed => Some(Outcome::Completed),
            TransferState::Rejected => Some(Outcome::Rejected),
            _ => None,
        }
    }
}
