//! In-memory inverted index over itree values.
//!
//! Rows are posted under every prefix key of their value and queried through
//! the [`crate::gin`] protocol, including the recheck step a database host
//! would perform against the stored row.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::CURRENT;
use crate::gin::{
    compare_partial, consistent, extract_keys, extract_query_keys, Predicate, SearchMode,
};
use crate::record::Itree;
use crate::ItreeError;

#[derive(Debug, Default, Clone)]
pub struct PathIndex {
    rows: BTreeMap<u64, Itree>,
    postings: BTreeMap<Itree, BTreeSet<u64>>,
}

/// On-disk form: rows only, postings are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u8,
    rows: Vec<(u64, Itree)>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Itree> {
        self.rows.get(&id)
    }

    /// Number of distinct keys in the index.
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Store `value` under `id`, returning the value it replaces.
    pub fn insert(&mut self, id: u64, value: Itree) -> Option<Itree> {
        let previous = self.remove(id);
        for key in extract_keys(&value) {
            self.postings.entry(key).or_default().insert(id);
        }
        self.rows.insert(id, value);
        previous
    }

    pub fn remove(&mut self, id: u64) -> Option<Itree> {
        let value = self.rows.remove(&id)?;
        for key in extract_keys(&value) {
            if let Some(ids) = self.postings.get_mut(&key) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.postings.remove(&key);
                }
            }
        }
        Some(value)
    }

    fn carries(&self, id: u64, key: &Itree) -> bool {
        self.postings.get(key).is_some_and(|ids| ids.contains(&id))
    }

    /// Ids of rows matching `predicate` against `query`, ascending.
    pub fn search(&self, query: &Itree, predicate: Predicate) -> Vec<u64> {
        let (keys, mode) = extract_query_keys(query, predicate);
        let candidates: BTreeSet<u64> = match mode {
            SearchMode::All => self.rows.keys().copied().collect(),
            SearchMode::Default => keys
                .iter()
                .filter_map(|key| self.postings.get(key))
                .flatten()
                .copied()
                .collect(),
        };

        candidates
            .into_iter()
            .filter(|&id| {
                let Some(value) = self.rows.get(&id) else {
                    return false;
                };
                let check: Vec<bool> = keys.iter().map(|key| self.carries(id, key)).collect();
                match consistent(&check, predicate, query, &keys) {
                    (false, _) => false,
                    (true, false) => true,
                    (true, true) => predicate.evaluate(value, query),
                }
            })
            .collect()
    }

    /// Keys reachable by an ordered scan starting at `fragment`.
    pub fn scan_prefix(&self, fragment: &Itree, predicate: Predicate) -> Vec<Itree> {
        self.postings
            .range(*fragment..)
            .map(|(key, _)| *key)
            .take_while(|key| compare_partial(fragment, key, predicate) != Ordering::Greater)
            .filter(|key| compare_partial(fragment, key, predicate) == Ordering::Equal)
            .collect()
    }

    /// Write the rows to `path` with bincode.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ItreeError> {
        let snapshot = Snapshot {
            version: CURRENT.version,
            rows: self.rows.iter().map(|(&id, &value)| (id, value)).collect(),
        };
        let data =
            bincode::serialize(&snapshot).map_err(|e| ItreeError::Snapshot(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Read rows written by [`PathIndex::save`] and rebuild the postings.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ItreeError> {
        let data = fs::read(path)?;
        let snapshot: Snapshot =
            bincode::deserialize(&data).map_err(|e| ItreeError::Snapshot(e.to_string()))?;
        if snapshot.version != CURRENT.version {
            return Err(ItreeError::Snapshot(format!(
                "unsupported layout version {}",
                snapshot.version
            )));
        }
        Ok(snapshot.rows.into_iter().collect())
    }
}

impl FromIterator<(u64, Itree)> for PathIndex {
    fn from_iter<I: IntoIterator<Item = (u64, Itree)>>(iter: I) -> Self {
        let mut index = PathIndex::new();
        for (id, value) in iter {
            index.insert(id, value);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Itree {
        s.parse().unwrap()
    }

    fn sample() -> PathIndex {
        ["1", "1.2", "1.2.3", "1.2.300", "1.3", "2", "2.1"]
            .iter()
            .enumerate()
            .map(|(i, s)| (i as u64, t(s)))
            .collect()
    }

    #[test]
    fn descendants() {
        let index = sample();
        assert_eq!(index.search(&t("1.2"), Predicate::DescendantOf), vec![1, 2, 3]);
        assert_eq!(index.search(&t("2"), Predicate::DescendantOf), vec![5, 6]);
        assert!(index.search(&t("3"), Predicate::DescendantOf).is_empty());
    }

    #[test]
    fn ancestor_queries() {
        let index = sample();
        assert_eq!(index.search(&t("1.2"), Predicate::AncestorOf), vec![1, 2, 3]);
        assert_eq!(index.search(&t("1.2.300"), Predicate::AncestorOf), vec![3]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let index = sample();
        assert_eq!(index.search(&Itree::EMPTY, Predicate::DescendantOf).len(), 7);
    }

    #[test]
    fn replace_and_remove() {
        let mut index = sample();
        assert_eq!(index.insert(0, t("9")), Some(t("1")));
        assert_eq!(index.search(&t("9"), Predicate::DescendantOf), vec![0]);
        assert_eq!(index.remove(0), Some(t("9")));
        assert_eq!(index.remove(0), None);
        assert!(index.search(&t("9"), Predicate::DescendantOf).is_empty());
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn prefix_scan() {
        let index = sample();
        let keys = index.scan_prefix(&t("1.2"), Predicate::DescendantOf);
        assert_eq!(keys, vec![t("1.2"), t("1.2.3"), t("1.2.300")]);
    }
}
