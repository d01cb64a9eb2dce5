use contentmgmt_types::{Error, Version};
use proptest::prelude::*;
use serde_json::json;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_rejects_zero() {
    assert_eq!(Version::new(0), Err(Error::InvalidVersion("0".into())));
}

#[test]
fn initial_is_one() {
    assert_eq!(Version::INITIAL.get(), 1);
    assert_eq!(Version::default(), Version::INITIAL);
}

#[test]
fn next_and_previous() {
    let v2 = Version::new(2).unwrap();
    assert_eq!(v2.next().get(), 3);
    assert_eq!(v2.previous(), Some(Version::INITIAL));
    assert_eq!(Version::INITIAL.previous(), None);
}

#[test]
fn ordering_is_numeric() {
    let v2 = Version::new(2).unwrap();
    let v10 = Version::new(10).unwrap();
    assert!(v2 < v10);
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_numeric_string() {
    assert_eq!(Version::parse("1").unwrap().get(), 1);
    assert_eq!(Version::parse(" 7 ").unwrap().get(), 7);
    assert_eq!(Version::parse("2.0").unwrap().get(), 2);
}

#[test]
fn parse_rejects_garbage() {
    assert!(Version::parse("one").is_err());
    assert!(Version::parse("").is_err());
    assert!(Version::parse("1.5").is_err());
    assert!(Version::parse("-1").is_err());
    assert!(Version::parse("0").is_err());
}

#[test]
fn from_json_number_and_string() {
    assert_eq!(Version::from_json(&json!(3)).unwrap().get(), 3);
    assert_eq!(Version::from_json(&json!("3")).unwrap().get(), 3);
    assert_eq!(Version::from_json(&json!(3.0)).unwrap().get(), 3);
}

#[test]
fn from_json_rejects_non_numeric() {
    assert!(Version::from_json(&json!(null)).is_err());
    assert!(Version::from_json(&json!(true)).is_err());
    assert!(Version::from_json(&json!({})).is_err());
    assert!(Version::from_json(&json!(-4)).is_err());
    assert!(Version::from_json(&json!(u64::from(u32::MAX) + 1)).is_err());
}

#[test]
fn serializes_as_number() {
    let v = Version::new(2).unwrap();
    assert_eq!(serde_json::to_value(v).unwrap(), json!(2));
    let parsed: Version = serde_json::from_value(json!("2")).unwrap();
    assert_eq!(parsed, v);
}

proptest! {
    #[test]
    fn every_positive_integer_parses_from_string_and_number(n in 1u32..=u32::MAX) {
        let from_str = Version::parse(&n.to_string()).unwrap();
        let from_num = Version::from_json(&json!(n)).unwrap();
        prop_assert_eq!(from_str, from_num);
        prop_assert_eq!(from_str.get(), n);
    }

    #[test]
    fn display_parse_roundtrip(n in 1u32..=u32::MAX) {
        let v = Version::new(n).unwrap();
        prop_assert_eq!(v.to_string().parse::<Version>().unwrap(), v);
    }
}
