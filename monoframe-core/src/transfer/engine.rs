//! Header+payload write state machine
//!
//! Every wait in here is an unbounded poll of a controller flag. There are
//! no timeouts: a controller that never raises the awaited flag hangs the
//! caller. After a NACK the engine assumes the controller releases the bus
//! on its own; it does not issue STOP or reset the peripheral.

use monoframe_hal::{Direction, I2cRegisters};

use super::{
    Outcome, TransferError, TransferState, MAX_ADDRESS, MAX_HEADER_LEN, MAX_SEGMENT_LEN,
};

/// Target NACKed; the flag has already been cleared
struct Nack;

/// One admitted header+payload write
///
/// Created with [`Transfer::new`], which checks every precondition before
/// the controller is touched. [`Transfer::step`] advances one state;
/// [`Transfer::run`] drives it to a terminal state.
pub struct Transfer<'a, R: I2cRegisters> {
    regs: &'a mut R,
    address: u8,
    header: &'a [u8],
    payload: &'a [u8],
    /// Payload bytes already pushed
    offset: usize,
    /// End of the payload segment currently programmed
    segment_end: usize,
    state: TransferState,
}

impl<'a, R: I2cRegisters> Transfer<'a, R> {
    /// Admit a write onto the bus
    ///
    /// Fails without any register write if the header is longer than one
    /// segment, the address is not 7-bit, or the bus is still busy with a
    /// previous transaction.
    pub fn new(
        regs: &'a mut R,
        address: u8,
        header: &'a [u8],
        payload: &'a [u8],
    ) -> Result<Self, TransferError> {
        if header.len() > MAX_HEADER_LEN {
            return Err(TransferError::HeaderTooLong(header.len()));
        }
        if address > MAX_ADDRESS {
            return Err(TransferError::InvalidAddress(address));
        }
        // Starting with reload set while a STOP is still pending would
        // suppress that STOP and strand the bus.
        if regs.is_busy() {
            return Err(TransferError::BusBusy);
        }

        Ok(Self {
            regs,
            address,
            header,
            payload,
            offset: 0,
            segment_end: 0,
            state: TransferState::Idle,
        })
    }

    /// Current state
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Payload bytes pushed so far
    pub fn payload_sent(&self) -> usize {
        self.offset
    }

    /// Perform one state transition and return the new state
    ///
    /// Terminal states are absorbing.
    pub fn step(&mut self) -> TransferState {
        use TransferState::*;

        self.state = match self.state {
            Idle => {
                self.begin();
                HeaderStream
            }
            HeaderStream => match send_all(&mut *self.regs, self.header) {
                Ok(()) => ReloadPending,
                Err(Nack) => self.reject(),
            },
            ReloadPending => match self.load_next_segment() {
                Ok(()) => PayloadStream,
                Err(Nack) => self.reject(),
            },
            PayloadStream => {
                let segment = &self.payload[self.offset..self.segment_end];
                match send_all(&mut *self.regs, segment) {
                    Ok(()) => {
                        self.offset = self.segment_end;
                        if self.offset < self.payload.len() {
                            ReloadPending
                        } else {
                            // Reload was cleared before this segment; auto-stop closes it
                            Completed
                        }
                    }
                    Err(Nack) => self.reject(),
                }
            }
            terminal @ (Completed | Rejected) => terminal,
        };

        self.state
    }

    /// Drive the write to completion or rejection
    pub fn run(&mut self) -> Outcome {
        loop {
            if let Some(outcome) = self.step().outcome() {
                return outcome;
            }
        }
    }

    /// Program address, direction and the header segment, then START
    fn begin(&mut self) {
        // Header length checked in new()
        let header_len = self.header.len() as u8;

        self.regs.set_address(self.address);
        self.regs.set_direction(Direction::Write);
        self.regs.set_segment_len(header_len);
        // No effect until reload is cleared for the final segment
        self.regs.set_autoend(true);
        self.regs.set_reload(true);
        self.regs.start();
    }

    /// Wait for the reload request and program the next payload segment
    fn load_next_segment(&mut self) -> Result<(), Nack> {
        wait_reload_pending(&mut *self.regs)?;

        let remaining = self.payload.len() - self.offset;
        let len = remaining.min(MAX_SEGMENT_LEN);

        // NBYTES must be written before reload is cleared, otherwise
        // auto-stop fires against the exhausted count.
        self.regs.set_segment_len(len as u8);
        if len == remaining {
            self.regs.set_reload(false);
        }

        self.segment_end = self.offset + len;
        Ok(())
    }

    /// Leave the controller with reload cleared after a NACK
    fn reject(&mut self) -> TransferState {
        self.regs.set_reload(false);
        TransferState::Rejected
    }
}

/// Write `header` then `payload` to the target at `address` in one transaction
///
/// Returns `Err` if the write was refused before any register was written,
/// otherwise the bus-level [`Outcome`].
pub fn write_with_header<R: I2cRegisters>(
    regs: &mut R,
    address: u8,
    header: &[u8],
    payload: &[u8],
) -> Result<Outcome, TransferError> {
    let mut transfer = Transfer::new(regs, address, header, payload)?;
    Ok(transfer.run())
}

/// Write `data` to the target at `address` in one transaction
pub fn write<R: I2cRegisters>(
    regs: &mut R,
    address: u8,
    data: &[u8],
) -> Result<Outcome, TransferError> {
    write_with_header(regs, address, &[], data)
}

/// Push every byte of `bytes`, checking for NACK before each one
fn send_all<R: I2cRegisters>(regs: &mut R, bytes: &[u8]) -> Result<(), Nack> {
    for &byte in bytes {
        wait_tx_ready(regs)?;
        regs.write_byte(byte);
    }
    Ok(())
}

fn wait_tx_ready<R: I2cRegisters>(regs: &mut R) -> Result<(), Nack> {
    loop {
        if regs.is_nack() {
            regs.clear_nack();
            return Err(Nack);
        }
        if regs.is_tx_ready() {
            return Ok(());
        }
    }
}

/// A NACK on the last byte of a segment means no reload request will follow,
/// so the wait watches NACK as well.
fn wait_reload_pending<R: I2cRegisters>(regs: &mut R) -> Result<(), Nack> {
    loop {
        if regs.is_nack() {
            regs.clear_nack();
            return Err(Nack);
        }
        if regs.is_reload_pending() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimRegisters;
    use crate::transfer::{segment_plan, SegmentKind};
    use proptest::prelude::*;

    const ADDR: u8 = 0x3C;

    fn pattern<const N: usize>() -> [u8; N] {
        core::array::from_fn(|i| (i * 7 + 3) as u8)
    }

    fn nonzero_segments(sim: &SimRegisters) -> usize {
        sim.segments().iter().filter(|&&len| len > 0).count()
    }

    #[test]
    fn test_full_frame_write() {
        let mut sim = SimRegisters::new();
        let frame = pattern::<1024>();

        let outcome = write_with_header(&mut sim, ADDR, &[0x40], &frame);

        assert_eq!(outcome, Ok(Outcome::Completed));
        assert_eq!(sim.payload_segments(), &[255, 255, 255, 255, 4]);
        assert_eq!(sim.pushed(), 1025);
        assert_eq!(sim.received()[0], 0x40);
        assert_eq!(&sim.received()[1..], &frame[..]);
        assert_eq!(sim.stops(), 1);
        assert_eq!(sim.address(), Some(ADDR));
        assert!(!sim.reload());
        assert!(!sim.is_busy());
    }

    #[test]
    fn test_headerless_write() {
        let mut sim = SimRegisters::new();
        let data = pattern::<300>();

        let outcome = write_with_header(&mut sim, ADDR, &[], &data);

        assert_eq!(outcome, Ok(Outcome::Completed));
        assert_eq!(sim.payload_segments(), &[255, 45]);
        assert_eq!(nonzero_segments(&sim), 2);
        assert_eq!(sim.pushed(), 300);
        assert_eq!(sim.stops(), 1);
    }

    #[test]
    fn test_plain_write_matches_headerless() {
        let mut sim = SimRegisters::new();
        let data = pattern::<20>();

        assert_eq!(write(&mut sim, ADDR, &data), Ok(Outcome::Completed));
        assert_eq!(sim.segments(), &[0, 20]);
        assert_eq!(sim.received(), &data[..]);
    }

    #[test]
    fn test_rejection_mid_payload() {
        let mut sim = SimRegisters::new();
        sim.reject_at(2 + 5);
        let data = pattern::<10>();

        let outcome = write_with_header(&mut sim, ADDR, &[0x00, 0xAF], &data);

        assert_eq!(outcome, Ok(Outcome::Rejected));
        assert_eq!(sim.pushed(), 7);
        assert_eq!(sim.nack_clears(), 1);
        assert!(!sim.reload());
        assert!(!sim.is_nack());
    }

    #[test]
    fn test_address_nack() {
        let mut sim = SimRegisters::new();
        sim.reject_at(0);

        let outcome = write_with_header(&mut sim, 0x3D, &[0x00], &[0xAE]);

        assert_eq!(outcome, Ok(Outcome::Rejected));
        assert_eq!(sim.pushed(), 0);
        assert_eq!(sim.nack_clears(), 1);
    }

    #[test]
    fn test_nack_on_last_header_byte_does_not_hang() {
        // Nack raised after the header, where the engine waits for reload
        let mut sim = SimRegisters::new();
        sim.reject_at(3);

        let outcome = write_with_header(&mut sim, ADDR, &[1, 2, 3], &[4, 5, 6]);

        assert_eq!(outcome, Ok(Outcome::Rejected));
        assert_eq!(sim.pushed(), 3);
        assert_eq!(sim.nack_clears(), 1);
    }

    #[test]
    fn test_nack_on_last_byte_of_payload_segment() {
        // Header plus one full segment accepted, then the reload wait sees NACK
        let mut sim = SimRegisters::new();
        sim.reject_at(1 + 255);
        let data = pattern::<300>();

        let outcome = write_with_header(&mut sim, ADDR, &[0x40], &data);

        assert_eq!(outcome, Ok(Outcome::Rejected));
        assert_eq!(sim.pushed(), 256);
        assert_eq!(sim.payload_segments(), &[255]);
        assert_eq!(sim.nack_clears(), 1);
        assert_eq!(sim.stops(), 0);
        assert!(!sim.reload());
        assert!(!sim.is_busy());
    }

    #[test]
    fn test_header_too_long_touches_nothing() {
        let mut sim = SimRegisters::new();
        let header = [0u8; 256];

        let outcome = write_with_header(&mut sim, ADDR, &header, &[1, 2, 3]);

        assert_eq!(outcome, Err(TransferError::HeaderTooLong(256)));
        assert_eq!(sim.writes(), 0);
        assert_eq!(sim.polls(), 0);
    }

    #[test]
    fn test_max_header_is_accepted() {
        let mut sim = SimRegisters::new();
        let header = [0x5Au8; 255];

        let outcome = write_with_header(&mut sim, ADDR, &header, &[1]);

        assert_eq!(outcome, Ok(Outcome::Completed));
        assert_eq!(sim.segments(), &[255, 1]);
    }

    #[test]
    fn test_invalid_address() {
        let mut sim = SimRegisters::new();

        let outcome = write_with_header(&mut sim, 0x80, &[], &[1]);

        assert_eq!(outcome, Err(TransferError::InvalidAddress(0x80)));
        assert_eq!(sim.writes(), 0);
    }

    #[test]
    fn test_busy_bus_touches_nothing() {
        let mut sim = SimRegisters::busy();

        let outcome = write_with_header(&mut sim, ADDR, &[0x40], &[0; 16]);

        assert_eq!(outcome, Err(TransferError::BusBusy));
        assert_eq!(sim.writes(), 0);
        // Only the busy query itself
        assert_eq!(sim.polls(), 1);
    }

    #[test]
    fn test_bus_free_again_after_completion() {
        let mut sim = SimRegisters::new();

        assert_eq!(
            write_with_header(&mut sim, ADDR, &[0x00], &[0xAE, 0xAF]),
            Ok(Outcome::Completed)
        );
        assert_eq!(
            write_with_header(&mut sim, ADDR, &[0x40], &[0xFF; 8]),
            Ok(Outcome::Completed)
        );
        assert_eq!(sim.stops(), 2);
        assert_eq!(sim.pushed(), 3 + 9);
    }

    #[test]
    fn test_empty_payload_closes_after_header() {
        let mut sim = SimRegisters::new();

        let outcome = write_with_header(&mut sim, ADDR, &[0x00, 0xAE], &[]);

        assert_eq!(outcome, Ok(Outcome::Completed));
        assert_eq!(sim.segments(), &[2, 0]);
        assert_eq!(sim.pushed(), 2);
        assert_eq!(sim.stops(), 1);
    }

    #[test]
    fn test_state_sequence() {
        let mut sim = SimRegisters::new();
        let data = pattern::<300>();
        let mut transfer = Transfer::new(&mut sim, ADDR, &[0x40], &data).unwrap();

        assert_eq!(transfer.state(), TransferState::Idle);
        assert_eq!(transfer.step(), TransferState::HeaderStream);
        assert_eq!(transfer.step(), TransferState::ReloadPending);
        assert_eq!(transfer.step(), TransferState::PayloadStream);
        assert_eq!(transfer.step(), TransferState::ReloadPending);
        assert_eq!(transfer.payload_sent(), 255);
        assert_eq!(transfer.step(), TransferState::PayloadStream);
        assert_eq!(transfer.step(), TransferState::Completed);
        // Terminal states absorb further steps
        assert_eq!(transfer.step(), TransferState::Completed);
        assert_eq!(transfer.payload_sent(), 300);
    }

    #[test]
    fn test_reload_cleared_only_for_final_segment() {
        let mut sim = SimRegisters::new();
        let data = pattern::<600>();
        let mut transfer = Transfer::new(&mut sim, ADDR, &[0x40], &data).unwrap();

        transfer.step(); // HeaderStream
        transfer.step(); // ReloadPending
        transfer.step(); // PayloadStream, first chunk programmed
        drop(transfer);
        assert!(sim.reload());
    }

    #[test]
    fn test_engine_matches_plan() {
        for (header_len, payload_len) in [(0usize, 0usize), (1, 1), (2, 255), (8, 256), (1, 1024)] {
            let mut sim = SimRegisters::new();
            let header = [0xA5u8; 8];
            let payload = [0x5Au8; 1024];

            let outcome =
                write_with_header(&mut sim, ADDR, &header[..header_len], &payload[..payload_len]);
            assert_eq!(outcome, Ok(Outcome::Completed));

            let planned: heapless::Vec<u8, 16> = segment_plan(header_len as u8, payload_len)
                .map(|s| s.len)
                .collect();
            assert_eq!(sim.segments(), planned.as_slice());

            let payload_planned = segment_plan(header_len as u8, payload_len)
                .filter(|s| s.kind == SegmentKind::Payload)
                .count();
            assert_eq!(sim.payload_segments().len(), payload_planned);
        }
    }

    proptest! {
        #[test]
        fn prop_segment_count_and_byte_total(
            header_len in 0usize..=255,
            payload_len in 1usize..=2048,
        ) {
            let header = [0x11u8; 255];
            let payload = [0x22u8; 2048];
            let mut sim = SimRegisters::new();

            let outcome = write_with_header(
                &mut sim,
                ADDR,
                &header[..header_len],
                &payload[..payload_len],
            );

            prop_assert_eq!(outcome, Ok(Outcome::Completed));
            let expected = payload_len.div_ceil(255) + usize::from(header_len > 0);
            prop_assert_eq!(nonzero_segments(&sim), expected);
            let total: usize = sim.segments().iter().map(|&len| usize::from(len)).sum();
            prop_assert_eq!(total, header_len + payload_len);
            prop_assert_eq!(sim.pushed(), header_len + payload_len);
            prop_assert!(sim.payload_segments().iter().all(|&len| len > 0));
            prop_assert!(!sim.reload());
        }

        #[test]
        fn prop_rejection_pushes_exactly_index(
            header_len in 0usize..=16,
            payload_len in 1usize..=1024,
            reject_seed in any::<usize>(),
        ) {
            let total = header_len + payload_len;
            let reject = reject_seed % total;
            let header = [0x33u8; 16];
            let payload = [0x44u8; 1024];
            let mut sim = SimRegisters::new();
            sim.reject_at(reject);

            let outcome = write_with_header(
                &mut sim,
                ADDR,
                &header[..header_len],
                &payload[..payload_len],
            );

            prop_assert_eq!(outcome, Ok(Outcome::Rejected));
            prop_assert_eq!(sim.pushed(), reject);
            prop_assert_eq!(sim.nack_clears(), 1);
            prop_assert!(!sim.reload());
        }
    }
}
