//! Fixed-size hierarchical integer paths.
//!
//! An [`Itree`] is a materialized path such as `1.2.300` packed into an
//! 18-byte record: a 16-bit control bitmap marking segment boundaries
//! followed by 16 data bytes. Segments are `1..=65535` and take one or two
//! bytes each, so a path holds up to 16 segments.
//!
//! The crate provides:
//!
//! * the codec between dotted text and records ([`decode`], [`encode`]);
//! * prefix ordering and containment ([`compare`], [`is_descendant`],
//!   [`is_ancestor`]);
//! * path operations ([`concat`], [`subpath`], [`subitree`], [`ilevel`]);
//! * the inverted-index support protocol in [`gin`], and an in-memory
//!   [`PathIndex`] built on it.
//!
//! ```
//! use itree::{decode, gin, Predicate};
//!
//! let path = decode("1.2.300").unwrap();
//! assert_eq!(path.segments(), vec![1, 2, 300]);
//! let keys: Vec<String> = gin::extract_keys(&path).iter().map(|k| k.to_string()).collect();
//! assert_eq!(keys, ["1", "1.2", "1.2.300"]);
//! let (query_keys, _) = gin::extract_query_keys(&path, Predicate::AncestorOf);
//! assert_eq!(query_keys, vec![path]);
//! ```

pub mod algebra;
pub mod codec;
pub mod config;
pub mod control;
pub mod error;
pub mod format;
pub mod gin;
pub mod io_utils;
pub mod ops;
pub mod path_index;
pub mod record;

pub use algebra::{
    compare, equals, is_ancestor, is_descendant, not_ancestor, not_descendant, segments,
};
pub use codec::{decode, decode_with, encode};
pub use config::Config;
pub use control::ControlBitmap;
pub use error::{CapacityError, DecodeError, IndexError, ItreeError, RangeError, RecordError};
pub use format::{Layout, MAX_SEGMENTS, RECORD_SIZE};
pub use gin::{Predicate, SearchMode, Ternary};
pub use ops::{concat, contains_segment, ilevel, index_of, segment_at, subitree, subpath};
pub use path_index::PathIndex;
pub use record::Itree;
