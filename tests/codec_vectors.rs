use itree::{decode, encode, gin, DecodeError, Itree, Predicate, RECORD_SIZE};

fn record(s: &str) -> String {
    hex::encode(decode(s).unwrap().as_bytes())
}

#[test]
fn binary_layout_vectors() {
    assert_eq!(record("1.2.300.4.500"), "edff0102012c0401f4000000000000000000");
    assert_eq!(record("1"), "ffff01000000000000000000000000000000");
    assert_eq!(record("65535"), "bfffffff0000000000000000000000000000");
    assert_eq!(record("256.1"), "bfff01000100000000000000000000000000");
}

#[test]
fn records_are_fixed_size() {
    for s in ["1", "1.2.3", "1000.1000.1000.1000.1000.1000.1000.1000"] {
        assert_eq!(decode(s).unwrap().as_bytes().len(), RECORD_SIZE);
    }
}

#[test]
fn end_to_end_example() {
    let path = decode("1.2.300").unwrap();
    assert_eq!(path.segments(), vec![1, 2, 300]);

    let keys: Vec<String> = gin::extract_keys(&path).iter().map(encode).collect();
    assert_eq!(keys, ["1", "1.2", "1.2.300"]);

    let (query_keys, mode) = gin::extract_query_keys(&path, Predicate::AncestorOf);
    let query_keys: Vec<String> = query_keys.iter().map(encode).collect();
    assert_eq!(query_keys, ["1.2.300"]);
    assert_eq!(mode, gin::SearchMode::Default);
}

#[test]
fn text_roundtrip_examples() {
    for s in [
        "1",
        "12.300.4",
        "255.256",
        "65535.65535.65535.65535.65535.65535.65535.65535",
        "1.2.3.4.5.6.7.8.9.10.11.12.13.14.15.16",
    ] {
        assert_eq!(encode(&decode(s).unwrap()), s);
    }
}

#[test]
fn rejects_reserved_zero() {
    assert_eq!(
        decode("1.0.2"),
        Err(DecodeError::InvalidSegment("0".to_string()))
    );
}

#[test]
fn bytes_roundtrip() {
    let tree = decode("7.4000.9").unwrap();
    let bytes: [u8; RECORD_SIZE] = tree.into();
    assert_eq!(Itree::try_from(&bytes[..]).unwrap(), tree);
}
