//! Conversion between dotted text and itree records.
//!
//! [`pack`] is the only writer of the physical layout. Reading goes through
//! [`crate::algebra::segments`].

use crate::algebra::segments;
use crate::config::Config;
use crate::control::ControlBitmap;
use crate::error::{CapacityError, DecodeError};
use crate::format::{segment_width, DATA_BYTES, MAX_SEGMENTS, MAX_SEGMENT_VALUE, SENTINEL};
use crate::record::Itree;

/// Parse a dotted path such as `"12.300.4"`.
pub fn decode(text: &str) -> Result<Itree, DecodeError> {
    decode_with(text, &Config::default())
}

/// Parse a dotted path, also enforcing `config.max_levels`.
pub fn decode_with(text: &str, config: &Config) -> Result<Itree, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut values = Vec::with_capacity(MAX_SEGMENTS);
    let mut bytes = 0usize;
    for field in text.split('.') {
        let value = parse_segment(field)?;
        bytes += segment_width(value);
        if values.len() == MAX_SEGMENTS || bytes > DATA_BYTES {
            return Err(DecodeError::TooManySegments);
        }
        values.push(value);
    }

    if values.len() > config.max_levels {
        return Err(DecodeError::ExceedsMaxLevels {
            levels: values.len(),
            max: config.max_levels,
        });
    }

    pack(&values).map_err(|_| DecodeError::TooManySegments)
}

fn parse_segment(field: &str) -> Result<u16, DecodeError> {
    let invalid = || DecodeError::InvalidSegment(field.to_string());
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match field.parse::<u32>() {
        Ok(v) if v >= 1 && v <= MAX_SEGMENT_VALUE => Ok(v as u16),
        _ => Err(invalid()),
    }
}

/// Render a path as dotted text. The empty path renders as `""`.
pub fn encode(tree: &Itree) -> String {
    segments(tree)
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Lay out segments in a fresh record.
///
/// Segments must be non-zero; callers validate user input before packing.
pub(crate) fn pack(values: &[u16]) -> Result<Itree, CapacityError> {
    if values.len() > MAX_SEGMENTS {
        return Err(CapacityError::ExceedsMaxSegments);
    }
    debug_assert!(!values.contains(&SENTINEL.into()));

    let mut control = ControlBitmap::ALL_STARTS;
    let mut data = [SENTINEL; DATA_BYTES];
    let mut cursor = 0usize;
    for &value in values {
        let width = segment_width(value);
        if cursor + width > DATA_BYTES {
            return Err(CapacityError::ExceedsMaxSegments);
        }
        if width == 1 {
            data[cursor] = value as u8;
        } else {
            let [hi, lo] = value.to_be_bytes();
            data[cursor] = hi;
            data[cursor + 1] = lo;
            control.mark_continuation(cursor + 1);
        }
        cursor += width;
    }
    Ok(Itree::from_parts(control, data))
}

/// Pack a run of segments taken from an existing record, which always fits.
pub(crate) fn repack(values: &[u16]) -> Itree {
    match pack(values) {
        Ok(tree) => tree,
        Err(_) => unreachable!("segments of a valid itree always fit a record"),
    }
}
