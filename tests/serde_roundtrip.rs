use itree::{decode, Itree};
use serde_json::Value;

#[test]
fn json_uses_dotted_text() {
    let t = decode("1.2.300").unwrap();
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, "\"1.2.300\"");
    let back: Itree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);

    let v: Value = serde_json::json!({ "paths": [t, decode("4").unwrap()] });
    assert_eq!(v["paths"][1], "4");
}

#[test]
fn json_rejects_invalid_paths() {
    assert!(serde_json::from_str::<Itree>("\"1..2\"").is_err());
    assert!(serde_json::from_str::<Itree>("\"\"").is_err());
    assert!(serde_json::from_str::<Itree>("12").is_err());
}

#[test]
fn bincode_uses_raw_record() {
    let t = decode("1.2.300.4.500").unwrap();
    let encoded = bincode::serialize(&t).unwrap();
    // u64 length prefix followed by the 18 record bytes
    assert_eq!(encoded.len(), 8 + 18);
    assert_eq!(&encoded[8..], t.as_bytes());
    let back: Itree = bincode::deserialize(&encoded).unwrap();
    assert_eq!(back, t);
}

#[test]
fn bincode_rejects_non_canonical_record() {
    let mut encoded = bincode::serialize(&decode("1.2").unwrap()).unwrap();
    encoded[8] = 0x7F;
    assert!(bincode::deserialize::<Itree>(&encoded).is_err());
}
