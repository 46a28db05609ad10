//! Software model of a reload-capable I2C controller
//!
//! [`SimRegisters`] behaves like the STM32 "v2" I2C peripheral as seen by
//! the transfer engine: bytes leave the data register instantly, NBYTES
//! counts them down, an exhausted segment raises the reload flag (TCR) while
//! RELOAD is set and otherwise triggers auto-stop. A target NACK can be
//! injected at any byte index; the model then releases the bus, which is
//! the assumed (not verified) behaviour of real hardware.
//!
//! Every register write and every flag poll is counted so tests can assert
//! that refused transfers never touched the controller. A flag polled many
//! times with no intervening register write means the caller is waiting on
//! something the model will never raise; the model panics instead of
//! letting the test hang.

use core::cell::Cell;

use heapless::Vec;
use monoframe_hal::{Direction, I2cRegisters};

/// Maximum bytes retained by [`SimRegisters::received`]
pub const SIM_CAPACITY: usize = 4096;

/// Segment lengths retained by [`SimRegisters::segments`]; later ones are only counted
pub const SIM_MAX_SEGMENTS: usize = 64;

/// Consecutive polls without a register write before the model gives up
const STALL_LIMIT: u32 = 100_000;

/// Simulated I2C controller with one attached target
#[derive(Debug)]
pub struct SimRegisters {
    // Control register state
    address: Option<u8>,
    direction: Direction,
    nbytes: u8,
    autoend: bool,
    reload: bool,

    // Status
    active: bool,
    external_busy: bool,
    nackf: bool,
    tcr: bool,
    sent_in_segment: u8,

    // Target model
    reject_at: Option<usize>,

    // Observations
    received: Vec<u8, SIM_CAPACITY>,
    pushed: usize,
    /// Bytes pushed since the last START
    tx_pushed: usize,
    segments: Vec<u8, SIM_MAX_SEGMENTS>,
    segment_count: usize,
    starts: usize,
    stops: usize,
    nack_clears: usize,
    writes: usize,
    polls: Cell<usize>,
    idle_polls: Cell<u32>,
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// Idle controller, target acknowledges everything
    pub fn new() -> Self {
        Self {
            address: None,
            direction: Direction::Write,
            nbytes: 0,
            autoend: false,
            reload: false,
            active: false,
            external_busy: false,
            nackf: false,
            tcr: false,
            sent_in_segment: 0,
            reject_at: None,
            received: Vec::new(),
            pushed: 0,
            tx_pushed: 0,
            segments: Vec::new(),
            segment_count: 0,
            starts: 0,
            stops: 0,
            nack_clears: 0,
            writes: 0,
            polls: Cell::new(0),
            idle_polls: Cell::new(0),
        }
    }

    /// Controller whose bus is held by a transaction the engine did not start
    pub fn busy() -> Self {
        Self {
            external_busy: true,
            ..Self::new()
        }
    }

    /// Release a bus created with [`SimRegisters::busy`]
    pub fn release_bus(&mut self) {
        self.external_busy = false;
    }

    /// Make the target NACK so that exactly `index` bytes of the next
    /// transaction are accepted (0 = NACK on the address)
    pub fn reject_at(&mut self, index: usize) {
        self.reject_at = Some(index);
    }

    /// Last programmed target address
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Last programmed direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reload mode currently set
    pub fn reload(&self) -> bool {
        self.reload
    }

    /// Auto-stop currently enabled
    pub fn autoend(&self) -> bool {
        self.autoend
    }

    /// Bytes received by the target (first [`SIM_CAPACITY`] only)
    pub fn received(&self) -> &[u8] {
        &self.received
    }

    /// Transactions started
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Total bytes written to the data register
    pub fn pushed(&self) -> usize {
        self.pushed
    }

    /// NBYTES values programmed inside transactions, in order (first
    /// [`SIM_MAX_SEGMENTS`] only)
    pub fn segments(&self) -> &[u8] {
        &self.segments
    }

    /// Number of NBYTES values programmed inside transactions
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// NBYTES values programmed after the header segment
    ///
    /// Only meaningful for a simulator that has run a single transaction.
    pub fn payload_segments(&self) -> &[u8] {
        let skip = usize::from(self.starts > 0);
        &self.segments[skip..]
    }

    /// STOP conditions generated by auto-stop
    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Times the NACK flag was cleared
    pub fn nack_clears(&self) -> usize {
        self.nack_clears
    }

    /// Register writes of any kind (including data)
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Flag reads of any kind
    pub fn polls(&self) -> usize {
        self.polls.get()
    }

    fn record_write(&mut self) {
        self.writes += 1;
        self.idle_polls.set(0);
    }

    fn record_poll(&self, flag: &str) {
        self.polls.set(self.polls.get() + 1);
        let idle = self.idle_polls.get() + 1;
        self.idle_polls.set(idle);
        if idle > STALL_LIMIT {
            panic!("simulated I2C stalled waiting on {}", flag);
        }
    }

    fn record_segment(&mut self, len: u8) {
        self.segment_count += 1;
        let _ = self.segments.push(len);
    }

    /// Raise NACK if the target refuses the byte about to be clocked
    fn check_reject(&mut self) -> bool {
        if self.reject_at == Some(self.tx_pushed) {
            self.reject_at = None;
            self.nackf = true;
            // Assumed: the controller releases the bus on NACK
            self.active = false;
            self.tcr = false;
            return true;
        }
        false
    }

    /// Apply end-of-segment behaviour once NBYTES bytes have gone out
    fn settle(&mut self) {
        if !self.active || self.nackf || self.sent_in_segment < self.nbytes {
            return;
        }
        if self.reload {
            self.tcr = true;
        } else if self.autoend {
            self.active = false;
            self.tcr = false;
            self.stops += 1;
        }
    }
}

impl I2cRegisters for SimRegisters {
    fn set_address(&mut self, address: u8) {
        self.record_write();
        self.address = Some(address);
    }

    fn set_direction(&mut self, direction: Direction) {
        self.record_write();
        self.direction = direction;
    }

    fn set_segment_len(&mut self, len: u8) {
        self.record_write();
        self.nbytes = len;
        self.sent_in_segment = 0;
        if len > 0 {
            // TCR clears when NBYTES is rewritten with a non-zero value
            self.tcr = false;
        }
        if self.active {
            self.record_segment(len);
        }
        self.settle();
    }

    fn set_autoend(&mut self, enabled: bool) {
        self.record_write();
        self.autoend = enabled;
    }

    fn set_reload(&mut self, enabled: bool) {
        self.record_write();
        self.reload = enabled;
        self.settle();
    }

    fn start(&mut self) {
        self.record_write();
        if self.active || self.external_busy {
            panic!("simulated I2C START while bus busy");
        }
        self.active = true;
        self.tcr = false;
        self.sent_in_segment = 0;
        self.tx_pushed = 0;
        self.starts += 1;
        self.record_segment(self.nbytes);
        if !self.check_reject() {
            self.settle();
        }
    }

    fn is_tx_ready(&self) -> bool {
        self.record_poll("TXIS");
        self.active && !self.nackf && !self.tcr && self.sent_in_segment < self.nbytes
    }

    fn is_reload_pending(&self) -> bool {
        self.record_poll("TCR");
        self.tcr
    }

    fn is_nack(&self) -> bool {
        self.record_poll("NACKF");
        self.nackf
    }

    fn clear_nack(&mut self) {
        self.record_write();
        self.nackf = false;
        self.nack_clears += 1;
    }

    fn is_busy(&self) -> bool {
        self.record_poll("BUSY");
        self.active || self.external_busy
    }

    fn write_byte(&mut self, byte: u8) {
        self.record_write();
        if !self.active || self.sent_in_segment >= self.nbytes {
            panic!("simulated I2C data written outside an open segment");
        }
        let _ = self.received.push(byte);
        self.pushed += 1;
        self.tx_pushed += 1;
        self.sent_in_segment += 1;
        if !self.check_reject() {
            self.settle();
        }
    }
}
