//! Path manipulation: concatenation, slicing, depth and lookups.

use crate::algebra::segments;
use crate::codec::{pack, repack};
use crate::error::{CapacityError, RangeError};
use crate::record::Itree;

/// Append `b` below `a`.
pub fn concat(a: &Itree, b: &Itree) -> Result<Itree, CapacityError> {
    let mut values = segments(a);
    values.extend(segments(b));
    pack(&values)
}

/// Python-style slice of `len` segments starting at `offset`.
///
/// A negative `offset` counts from the end. A negative `len` leaves that many
/// segments off the end instead of giving a count, so `subpath(p, 0, -1)` is
/// the parent of `p`.
pub fn subpath(path: &Itree, offset: i32, len: i32) -> Result<Itree, RangeError> {
    let values = segments(path);
    let count = values.len() as i64;

    let mut start = i64::from(offset);
    if start < 0 {
        start += count;
    }
    let mut take = i64::from(len);
    if take < 0 {
        take += count - start;
    }

    if start < 0 || take < 0 {
        return Err(RangeError::NegativeAfterNormalization);
    }
    if start > count || start + take > count {
        return Err(RangeError::OutOfBounds);
    }
    let (start, end) = (start as usize, (start + take) as usize);
    Ok(repack(&values[start..end]))
}

/// Segments `[start, end)`.
pub fn subitree(path: &Itree, start: i32, end: i32) -> Result<Itree, RangeError> {
    if start < 0 || end < 0 {
        return Err(RangeError::NegativeAfterNormalization);
    }
    let values = segments(path);
    let (start, end) = (start as usize, end as usize);
    if start > end || end > values.len() {
        return Err(RangeError::OutOfBounds);
    }
    Ok(repack(&values[start..end]))
}

/// Number of segments.
pub fn ilevel(path: &Itree) -> u32 {
    segments(path).len() as u32
}

/// Position of the first contiguous occurrence of `needle` inside `path`.
/// The empty needle occurs at position 0.
pub fn index_of(path: &Itree, needle: &Itree) -> Option<usize> {
    let hay = segments(path);
    let needle = segments(needle);
    if needle.is_empty() {
        return Some(0);
    }
    hay.windows(needle.len()).position(|w| w == needle.as_slice())
}

pub fn contains_segment(path: &Itree, value: u16) -> bool {
    segments(path).contains(&value)
}

/// Segment at `index`; negative indices count from the end.
pub fn segment_at(path: &Itree, index: i32) -> Option<u16> {
    let values = segments(path);
    let pos = if index < 0 {
        values.len().checked_sub(index.unsigned_abs() as usize)?
    } else {
        index as usize
    };
    values.get(pos).copied()
}
