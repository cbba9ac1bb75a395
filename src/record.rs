//! The fixed-size itree value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::control::ControlBitmap;
use crate::error::{DecodeError, ItreeError, RecordError};
use crate::format::{segment_width, CONTROL_BYTES, DATA_BYTES, RECORD_SIZE, SENTINEL};
use crate::{algebra, codec, ops};

#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
struct RawRecord {
    control: [u8; CONTROL_BYTES],
    data: [u8; DATA_BYTES],
}

const _: () = assert!(std::mem::size_of::<RawRecord>() == RECORD_SIZE);

/// A hierarchical integer path packed into an 18-byte record.
///
/// Values are immutable and always canonical: every constructor either packs
/// segments itself or validates the bytes it is given. Byte equality and
/// hashing therefore agree with segment equality. Ordering is the prefix
/// order of [`algebra::compare`], not byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Itree {
    raw: RawRecord,
}

impl Itree {
    /// The path with no segments. It has no textual form that `decode`
    /// accepts.
    pub const EMPTY: Itree = Itree {
        raw: RawRecord {
            control: ControlBitmap::ALL_STARTS.to_be_bytes(),
            data: [SENTINEL; DATA_BYTES],
        },
    };

    pub(crate) fn from_parts(control: ControlBitmap, data: [u8; DATA_BYTES]) -> Self {
        Self {
            raw: RawRecord {
                control: control.to_be_bytes(),
                data,
            },
        }
    }

    /// Build a path from its segments.
    pub fn from_segments(segments: &[u16]) -> Result<Self, ItreeError> {
        if segments.contains(&0) {
            return Err(DecodeError::InvalidSegment("0".into()).into());
        }
        Ok(codec::pack(segments)?)
    }

    /// Read a record from its 18-byte at-rest form, rejecting anything that
    /// is not canonical.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let raw: RawRecord = *bytemuck::try_from_bytes(bytes)
            .map_err(|_| RecordError::WrongLength(bytes.len()))?;
        validate(ControlBitmap::from_be_bytes(raw.control), &raw.data)?;
        Ok(Self { raw })
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_SIZE] {
        bytemuck::cast_ref(&self.raw)
    }

    pub fn to_bytes(self) -> [u8; RECORD_SIZE] {
        *self.as_bytes()
    }

    pub fn control(&self) -> ControlBitmap {
        ControlBitmap::from_be_bytes(self.raw.control)
    }

    pub fn data(&self) -> &[u8; DATA_BYTES] {
        &self.raw.data
    }

    pub fn segments(&self) -> Vec<u16> {
        algebra::segments(self)
    }

    pub fn level(&self) -> u32 {
        ops::ilevel(self)
    }

    pub fn is_empty(&self) -> bool {
        algebra::segments(self).is_empty()
    }

    /// Number of data bytes in use.
    pub fn byte_len(&self) -> usize {
        self.segments().into_iter().map(segment_width).sum()
    }
}

/// Structural check of a raw record: every segment begins on a start bit and
/// everything after the sentinel is zero padding with start bits.
fn validate(control: ControlBitmap, data: &[u8; DATA_BYTES]) -> Result<(), RecordError> {
    let mut pos = 0;
    while pos < DATA_BYTES {
        if control.is_continuation(pos) {
            return Err(RecordError::OrphanContinuation(pos));
        }
        if data[pos] == SENTINEL {
            return match (pos..DATA_BYTES).find(|&p| data[p] != 0 || control.is_continuation(p)) {
                Some(p) => Err(RecordError::NonCanonicalPadding(p)),
                None => Ok(()),
            };
        }
        pos += if control.is_continuation(pos + 1) { 2 } else { 1 };
    }
    Ok(())
}

impl Default for Itree {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Ord for Itree {
    fn cmp(&self, other: &Self) -> Ordering {
        algebra::compare(self, other)
    }
}

impl PartialOrd for Itree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Itree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl fmt::Debug for Itree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Itree({:?})", codec::encode(self))
    }
}

impl FromStr for Itree {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode(s)
    }
}

impl TryFrom<&[u8]> for Itree {
    type Error = RecordError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<Itree> for [u8; RECORD_SIZE] {
    fn from(tree: Itree) -> Self {
        tree.to_bytes()
    }
}

impl Serialize for Itree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

struct ItreeVisitor;

impl<'de> Visitor<'de> for ItreeVisitor {
    type Value = Itree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a dotted itree path or an 18-byte itree record")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Itree, E> {
        codec::decode(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Itree, E> {
        Itree::from_bytes(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Itree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(ItreeVisitor)
        } else {
            deserializer.deserialize_bytes(ItreeVisitor)
        }
    }
}
