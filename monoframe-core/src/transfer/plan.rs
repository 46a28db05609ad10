//! Segment schedule for a chunked write
//!
//! Pure computation of the NBYTES values the engine programs, in order.
//! Useful for reasoning about bus timing without hardware; the engine and
//! this plan are checked against each other in tests.

use super::MAX_SEGMENT_LEN;

/// Which part of the write a segment carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentKind {
    Header,
    Payload,
}

/// One programmed segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Header or payload
    pub kind: SegmentKind,
    /// Value programmed into NBYTES
    pub len: u8,
    /// Reload is cleared before this segment (auto-stop follows it)
    pub last: bool,
}

/// Iterator over the segments of a write
///
/// Always yields the header segment (possibly zero-length) followed by at
/// least one payload segment. An empty payload yields a single zero-length
/// final segment, which is how the engine closes a header-only write.
#[derive(Debug, Clone)]
pub struct SegmentPlan {
    header_len: Option<u8>,
    remaining: usize,
    finished: bool,
}

/// Plan the segments for a header of `header_len` bytes and a payload of
/// `payload_len` bytes
pub fn segment_plan(header_len: u8, payload_len: usize) -> SegmentPlan {
    SegmentPlan {
        header_len: Some(header_len),
        remaining: payload_len,
        finished: false,
    }
}

/// Number of payload segments for `payload_len` bytes (never zero)
pub fn payload_segment_count(payload_len: usize) -> usize {
    payload_len.div_ceil(MAX_SEGMENT_LEN).max(1)
}

impl Iterator for SegmentPlan {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(len) = self.header_len.take() {
            return Some(Segment {
                kind: SegmentKind::Header,
                len,
                last: false,
            });
        }

        if self.finished {
            return None;
        }

        let len = self.remaining.min(MAX_SEGMENT_LEN);
        self.remaining -= len;
        self.finished = self.remaining == 0;

        Some(Segment {
            kind: SegmentKind::Payload,
            len: len as u8,
            last: self.finished,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let header = usize::from(self.header_len.is_some());
        let payload = if self.finished {
            0
        } else {
            payload_segment_count(self.remaining)
        };
        (header + payload, Some(header + payload))
    }
}

impl ExactSizeIterator for SegmentPlan {}
