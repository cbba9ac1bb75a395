//! Comparison and containment over segment sequences.
//!
//! Everything here works on the decoded `Vec<u16>` form. [`segments`] is the
//! only place that reads the physical layout.

use std::cmp::Ordering;

use crate::control::ControlBitmap;
use crate::format::{DATA_BYTES, SENTINEL};
use crate::record::Itree;

struct Segments<'a> {
    control: ControlBitmap,
    data: &'a [u8; DATA_BYTES],
    cursor: usize,
}

impl Iterator for Segments<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let first = *self.data.get(self.cursor)?;
        if first == SENTINEL {
            self.cursor = DATA_BYTES;
            return None;
        }
        if self.control.is_continuation(self.cursor + 1) {
            let value = u16::from_be_bytes([first, self.data[self.cursor + 1]]);
            self.cursor += 2;
            Some(value)
        } else {
            self.cursor += 1;
            Some(first.into())
        }
    }
}

/// Decode the segment sequence of a path.
pub fn segments(tree: &Itree) -> Vec<u16> {
    Segments {
        control: tree.control(),
        data: tree.data(),
        cursor: 0,
    }
    .collect()
}

/// Prefix order: position-wise by value, a strict prefix sorts first.
pub fn compare(a: &Itree, b: &Itree) -> Ordering {
    segments(a).cmp(&segments(b))
}

/// Whether `prefix` is a position-wise prefix of `of` (or equal to it).
pub(crate) fn is_prefix(prefix: &[u16], of: &[u16]) -> bool {
    of.starts_with(prefix)
}

/// `child` lies at or below `parent`.
pub fn is_descendant(child: &Itree, parent: &Itree) -> bool {
    is_prefix(&segments(parent), &segments(child))
}

/// `parent` lies at or above `child`.
pub fn is_ancestor(parent: &Itree, child: &Itree) -> bool {
    let parent = segments(parent);
    let child = segments(child);
    parent.len() <= child.len() && parent[..] == child[..parent.len()]
}

pub fn not_descendant(child: &Itree, parent: &Itree) -> bool {
    !is_descendant(child, parent)
}

pub fn not_ancestor(parent: &Itree, child: &Itree) -> bool {
    !is_ancestor(parent, child)
}

pub fn equals(a: &Itree, b: &Itree) -> bool {
    segments(a) == segments(b)
}
