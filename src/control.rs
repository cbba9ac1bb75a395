//! Segment-boundary bitmap stored in the first two bytes of a record.

use std::fmt;

use crate::format::{CONTROL_BYTES, DATA_BYTES};

/// One bit per data byte, MSB first: set = segment start, clear =
/// continuation of the previous byte.
///
/// Positions outside the data area read as segment starts, so a lookahead
/// past the last byte never sees a continuation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlBitmap(u16);

impl ControlBitmap {
    /// Every position starts a segment. This is the state of an empty record.
    pub const ALL_STARTS: Self = Self(u16::MAX);

    pub const fn from_be_bytes(bytes: [u8; CONTROL_BYTES]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    pub const fn to_be_bytes(self) -> [u8; CONTROL_BYTES] {
        self.0.to_be_bytes()
    }

    fn mask(pos: usize) -> Option<u16> {
        if pos < DATA_BYTES {
            Some(1 << (DATA_BYTES - 1 - pos))
        } else {
            None
        }
    }

    /// Bit at `pos`, or `None` outside the data area.
    pub fn get(self, pos: usize) -> Option<bool> {
        Self::mask(pos).map(|m| self.0 & m != 0)
    }

    /// Whether data byte `pos` starts a segment.
    pub fn is_start(self, pos: usize) -> bool {
        self.get(pos).unwrap_or(true)
    }

    /// Whether data byte `pos` continues the segment started at `pos - 1`.
    pub fn is_continuation(self, pos: usize) -> bool {
        !self.is_start(pos)
    }

    /// Mark `pos` as a continuation byte. Returns `false` if `pos` is outside
    /// the data area and nothing changed.
    pub fn mark_continuation(&mut self, pos: usize) -> bool {
        match Self::mask(pos) {
            Some(m) => {
                self.0 &= !m;
                true
            }
            None => false,
        }
    }

}

impl Default for ControlBitmap {
    fn default() -> Self {
        Self::ALL_STARTS
    }
}

impl fmt::Debug for ControlBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlBitmap({:016b})", self.0)
    }
}

impl fmt::Display for ControlBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_positions() {
        let mut c = ControlBitmap::ALL_STARTS;
        assert!(c.mark_continuation(3));
        assert!(c.mark_continuation(6));
        assert_eq!(c.to_be_bytes(), [0xED, 0xFF]);
        assert!(c.is_continuation(3) && c.is_continuation(6));
        assert!(c.is_start(4));
    }

    #[test]
    fn second_byte_positions() {
        let mut c = ControlBitmap::ALL_STARTS;
        c.mark_continuation(8);
        c.mark_continuation(15);
        assert_eq!(c.to_be_bytes(), [0xFF, 0x7E]);
        assert_eq!(c.get(15), Some(false));
        assert_eq!(c.get(14), Some(true));
    }

    #[test]
    fn out_of_range_reads_as_start() {
        let mut c = ControlBitmap::from_be_bytes([0, 0]);
        assert_eq!(c.get(16), None);
        assert!(c.is_start(16));
        assert!(!c.mark_continuation(16));
        assert!(!c.mark_continuation(99));
        assert_eq!(c.to_be_bytes(), [0, 0]);
    }

    #[test]
    fn display_is_binary() {
        let c = ControlBitmap::from_be_bytes([0xED, 0xFF]);
        assert_eq!(c.to_string(), "1110110111111111");
    }
}
