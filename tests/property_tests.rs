use std::cmp::Ordering;

use itree::gin::{consistent, extract_keys, extract_query_keys};
use itree::{
    compare, concat, decode, encode, equals, ilevel, is_ancestor, is_descendant, subitree,
    subpath, Itree, Predicate,
};
use proptest::prelude::*;

fn fit(values: Vec<u16>) -> Vec<u16> {
    let mut bytes = 0usize;
    values
        .into_iter()
        .take_while(|&v| {
            bytes += if v > 255 { 2 } else { 1 };
            bytes <= 16
        })
        .collect()
}

fn segments() -> impl Strategy<Value = Vec<u16>> {
    proptest::collection::vec(prop_oneof![1u16..=255, 256u16..=u16::MAX], 0..=16).prop_map(fit)
}

fn tree() -> impl Strategy<Value = Itree> {
    segments().prop_map(|s| Itree::from_segments(&s).unwrap())
}

/// A query related to `value`: a prefix of it, optionally with its last
/// segment changed (keeping its width) so it diverges.
fn related(value: &[u16], cut: usize, bump: bool) -> Itree {
    let mut q: Vec<u16> = value[..cut.min(value.len())].to_vec();
    if bump {
        if let Some(last) = q.last_mut() {
            *last = match *last {
                255 | u16::MAX => *last - 1,
                v => v + 1,
            };
        }
    }
    Itree::from_segments(&q).unwrap()
}

proptest! {
    #[test]
    fn value_roundtrip(s in segments()) {
        let t = Itree::from_segments(&s).unwrap();
        prop_assert_eq!(t.segments(), s.clone());
        if !s.is_empty() {
            let back = decode(&encode(&t)).unwrap();
            prop_assert_eq!(back.segments(), s);
            prop_assert_eq!(back, t);
        }
    }

    #[test]
    fn text_roundtrip(s in segments().prop_filter("non-empty", |s| !s.is_empty())) {
        let text = s.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(".");
        prop_assert_eq!(encode(&decode(&text).unwrap()), text);
    }

    #[test]
    fn bytes_roundtrip(t in tree()) {
        prop_assert_eq!(Itree::from_bytes(t.as_bytes()).unwrap(), t);
    }

    #[test]
    fn order_matches_segment_order(a in tree(), b in tree()) {
        let expected = a.segments().cmp(&b.segments());
        prop_assert_eq!(compare(&a, &b), expected);
        prop_assert_eq!(compare(&b, &a), expected.reverse());
        prop_assert_eq!(compare(&a, &b) == Ordering::Equal, equals(&a, &b));
        prop_assert_eq!(equals(&a, &b), a == b);
    }

    #[test]
    fn containment_reflexive(t in tree()) {
        prop_assert!(is_descendant(&t, &t));
        prop_assert!(is_ancestor(&t, &t));
    }

    #[test]
    fn containment_antisymmetric(v in segments(), cut in 0usize..=16, bump in any::<bool>()) {
        let a = Itree::from_segments(&v).unwrap();
        let b = related(&v, cut, bump);
        if is_descendant(&a, &b) && ilevel(&a) == ilevel(&b) {
            prop_assert!(equals(&a, &b));
        }
        prop_assert_eq!(is_descendant(&a, &b), is_ancestor(&b, &a));
    }

    #[test]
    fn concat_then_slice(a in tree(), b in tree()) {
        if let Ok(c) = concat(&a, &b) {
            let la = ilevel(&a) as i32;
            let lc = ilevel(&c) as i32;
            prop_assert_eq!(subitree(&c, 0, la).unwrap().segments(), a.segments());
            prop_assert_eq!(subitree(&c, la, lc).unwrap().segments(), b.segments());
            prop_assert!(is_descendant(&c, &a));
        } else {
            let total = a.byte_len() + b.byte_len();
            prop_assert!(total > 16);
        }
    }

    #[test]
    fn parent_is_ancestor(t in tree().prop_filter("non-empty", |t| !t.is_empty())) {
        let parent = subpath(&t, 0, -1).unwrap();
        prop_assert_eq!(ilevel(&parent) + 1, ilevel(&t));
        prop_assert!(is_ancestor(&parent, &t));
    }

    #[test]
    fn index_decisions_are_sound(
        v in segments(),
        cut in 0usize..=16,
        bump in any::<bool>(),
        pick in any::<bool>(),
    ) {
        let value = Itree::from_segments(&v).unwrap();
        let query = related(&v, cut, bump);
        let predicate = if pick { Predicate::DescendantOf } else { Predicate::AncestorOf };
        let stored = extract_keys(&value);
        let (keys, _) = extract_query_keys(&query, predicate);
        let check: Vec<bool> = keys.iter().map(|k| stored.contains(k)).collect();
        let truth = predicate.evaluate(&value, &query);

        match consistent(&check, predicate, &query, &keys) {
            (true, false) => prop_assert!(truth && is_descendant(&value, &query)),
            (false, _) => prop_assert!(!truth),
            (true, true) => {}
        }
    }
}

#[test]
fn capacity_at_seventeen_segments() {
    let a = decode("1.2.3.4.5.6.7.8").unwrap();
    let b = decode("9.10.11.12.13.14.15.16.17").unwrap();
    assert!(concat(&a, &b).is_err());
}

#[test]
fn negative_slices() {
    let p = decode("1.2.3.4.5").unwrap();
    assert_eq!(subpath(&p, 0, -1).unwrap().segments(), vec![1, 2, 3, 4]);
    assert_eq!(subpath(&p, -2, 1).unwrap().segments(), vec![4]);
}
