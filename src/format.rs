//! On-disk layout of an itree record.
//!
//! A record is a fixed 18-byte blob:
//!
//! ```text
//! [control: 2 bytes][data: 16 bytes]
//! ```
//!
//! Bit `i` of the big-endian control word is set when data byte `i` starts a
//! segment and clear when it continues the segment started at byte `i - 1`.
//! Segments up to 255 take one data byte, larger ones take two (big endian).
//! A start byte holding [`SENTINEL`] ends the sequence; unused trailing bytes
//! are zero with their control bits set.
//!
//! Capacity and sentinel are tied to a layout version. Changing any of them
//! means a new [`Layout`] constant, never an in-place edit of [`LAYOUT_V1`],
//! since existing records on disk depend on it.

/// Parameters of one version of the record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Format version number.
    pub version: u8,
    /// Maximum number of segments a record can hold.
    pub max_segments: usize,
    /// Size of the data area in bytes.
    pub data_bytes: usize,
    /// Size of the control bitmap in bytes.
    pub control_bytes: usize,
    /// Start-byte value that terminates the segment sequence.
    pub sentinel: u8,
}

impl Layout {
    /// Total size of a record in bytes.
    pub const fn record_size(&self) -> usize {
        self.control_bytes + self.data_bytes
    }
}

/// The 16 segment / 18 byte layout.
pub const LAYOUT_V1: Layout = Layout {
    version: 1,
    max_segments: 16,
    data_bytes: 16,
    control_bytes: 2,
    sentinel: 0,
};

/// Layout produced and consumed by this crate.
pub const CURRENT: Layout = LAYOUT_V1;

/// Maximum number of segments in a path.
pub const MAX_SEGMENTS: usize = CURRENT.max_segments;
/// Size of the data area in bytes.
pub const DATA_BYTES: usize = CURRENT.data_bytes;
/// Size of the control bitmap in bytes.
pub const CONTROL_BYTES: usize = CURRENT.control_bytes;
/// Size of a full record in bytes.
pub const RECORD_SIZE: usize = CURRENT.record_size();
/// End-of-sequence marker.
pub const SENTINEL: u8 = CURRENT.sentinel;
/// Largest value a single segment can hold.
pub const MAX_SEGMENT_VALUE: u32 = u16::MAX as u32;
/// Largest value stored in a single data byte.
pub const ONE_BYTE_MAX: u16 = u8::MAX as u16;

// The control word is a u16, one bit per data byte.
const _: () = assert!(CONTROL_BYTES * 8 == DATA_BYTES);
const _: () = assert!(MAX_SEGMENTS <= DATA_BYTES);

/// Number of data bytes a segment value occupies.
pub const fn segment_width(value: u16) -> usize {
    if value > ONE_BYTE_MAX {
        2
    } else {
        1
    }
}
