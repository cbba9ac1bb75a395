//! Index support protocol for generalized inverted indexes.
//!
//! Every stored path is indexed under all of its non-empty prefixes
//! ([`extract_keys`]). A query is turned into a set of keys
//! ([`extract_query_keys`]); the index reports which of those keys a stored
//! row carries, and [`consistent`] turns that report into a decision:
//!
//! * `(false, _)`: the row certainly does not match;
//! * `(true, false)`: the row certainly matches;
//! * `(true, true)`: the row may match and must be rechecked with
//!   [`Predicate::evaluate`].
//!
//! Only a hit on a key as long as the query itself is exact. Hits on shorter
//! prefix keys are recheck matches.

use std::cmp::Ordering;

use crate::algebra::{is_ancestor, is_descendant, segments};
use crate::codec::repack;
use crate::error::IndexError;
use crate::ops::ilevel;
use crate::record::Itree;

/// Indexable predicates, identified to the host by strategy number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Strategy 1, `value <@ query`: the stored value is at or below the
    /// query.
    DescendantOf,
    /// Strategy 2, `query @> value`: the query is an ancestor of (or equal
    /// to) the stored value.
    AncestorOf,
}

impl Predicate {
    pub const fn strategy(self) -> u16 {
        match self {
            Predicate::DescendantOf => 1,
            Predicate::AncestorOf => 2,
        }
    }

    pub fn from_strategy(strategy: u16) -> Result<Self, IndexError> {
        match strategy {
            1 => Ok(Predicate::DescendantOf),
            2 => Ok(Predicate::AncestorOf),
            n => Err(IndexError::UnknownPredicate(n)),
        }
    }

    /// Host operator symbol.
    pub const fn operator(self) -> &'static str {
        match self {
            Predicate::DescendantOf => "<@",
            Predicate::AncestorOf => "@>",
        }
    }

    /// Exact evaluation against a stored value; what a recheck runs.
    pub fn evaluate(self, value: &Itree, query: &Itree) -> bool {
        match self {
            Predicate::DescendantOf => is_descendant(value, query),
            Predicate::AncestorOf => is_ancestor(query, value),
        }
    }
}

/// How the index should enumerate candidates for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Only rows carrying at least one query key.
    Default,
    /// Every row; the query produced no keys.
    All,
}

/// Key presence in the three-valued form of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ternary {
    False,
    True,
    Maybe,
}

impl From<bool> for Ternary {
    fn from(b: bool) -> Self {
        if b {
            Ternary::True
        } else {
            Ternary::False
        }
    }
}

fn prefixes(values: &[u16]) -> Vec<Itree> {
    (1..=values.len()).map(|n| repack(&values[..n])).collect()
}

/// Index keys of a stored value: every non-empty prefix, shortest first.
pub fn extract_keys(value: &Itree) -> Vec<Itree> {
    prefixes(&segments(value))
}

/// Keys to probe for `query` under `predicate`.
///
/// The empty query is the root: it has no keys and every row matches.
pub fn extract_query_keys(query: &Itree, predicate: Predicate) -> (Vec<Itree>, SearchMode) {
    if query.is_empty() {
        return (Vec::new(), SearchMode::All);
    }
    let keys = match predicate {
        Predicate::DescendantOf => extract_keys(query),
        Predicate::AncestorOf => vec![*query],
    };
    (keys, SearchMode::Default)
}

/// Three-valued match decision. `check[i]` is the presence of `keys[i]` in
/// the row.
///
/// Returns `True` only when the row matches whatever the `Maybe` keys turn
/// out to be, `False` only when it fails whatever they turn out to be.
pub fn tri_consistent(
    check: &[Ternary],
    predicate: Predicate,
    query: &Itree,
    keys: &[Itree],
) -> Ternary {
    if keys.is_empty() {
        return Ternary::True;
    }
    let full = ilevel(query);
    let states = check.iter().zip(keys);

    match predicate {
        Predicate::DescendantOf => {
            let mut result = Ternary::False;
            for (&state, key) in states {
                match (state, ilevel(key) == full) {
                    (Ternary::True, true) => return Ternary::True,
                    (Ternary::False, _) => {}
                    _ => result = Ternary::Maybe,
                }
            }
            result
        }
        Predicate::AncestorOf => states
            .filter(|(_, key)| ilevel(key) == full)
            .map(|(&state, _)| state)
            .next()
            .unwrap_or(Ternary::False),
    }
}

/// Boolean match decision: `(matches, recheck)`.
pub fn consistent(
    check: &[bool],
    predicate: Predicate,
    query: &Itree,
    keys: &[Itree],
) -> (bool, bool) {
    let states: Vec<Ternary> = check.iter().map(|&b| b.into()).collect();
    match tri_consistent(&states, predicate, query, keys) {
        Ternary::True => (true, false),
        Ternary::Maybe => (true, true),
        Ternary::False => (false, false),
    }
}

/// Position of an indexed key relative to the matches of a partial scan
/// starting at `fragment`.
///
/// Compares position-wise up to the shorter length. `Equal` means the key can
/// still extend to a match, `Less` that it sorts before every match and
/// `Greater` that the scan is past all of them. Both predicates match values
/// carrying the fragment as a prefix, so a key shorter than the fragment is
/// `Less` under either.
pub fn compare_partial(fragment: &Itree, candidate: &Itree, _predicate: Predicate) -> Ordering {
    let fragment = segments(fragment);
    let candidate = segments(candidate);
    let n = fragment.len().min(candidate.len());
    match candidate[..n].cmp(&fragment[..n]) {
        Ordering::Equal if candidate.len() < fragment.len() => Ordering::Less,
        other => other,
    }
}
