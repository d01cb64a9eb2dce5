use contentmgmt_types::{ContentTypeId, Error, Operation};
use std::collections::HashMap;
use std::str::FromStr;

// ── ContentTypeId ─────────────────────────────────────────────────

#[test]
fn content_type_id_accepts_non_empty() {
    let id = ContentTypeId::new("foo").unwrap();
    assert_eq!(id.as_str(), "foo");
    assert_eq!(id.to_string(), "foo");
}

#[test]
fn content_type_id_rejects_empty() {
    assert_eq!(ContentTypeId::new(""), Err(Error::EmptyContentTypeId));
    assert!(ContentTypeId::from_str("").is_err());
}

#[test]
fn content_type_id_is_case_sensitive() {
    let lower = ContentTypeId::new("foo").unwrap();
    let upper = ContentTypeId::new("Foo").unwrap();
    assert_ne!(lower, upper);
}

#[test]
fn content_type_id_map_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(ContentTypeId::new("dashboard").unwrap(), 1);
    assert_eq!(map.get("dashboard"), Some(&1));
    assert_eq!(map.get("Dashboard"), None);
}

#[test]
fn content_type_id_serializes_as_plain_string() {
    let id = ContentTypeId::new("map").unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"map\"");
    let parsed: ContentTypeId = serde_json::from_str("\"map\"").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn content_type_id_deserialize_rejects_empty() {
    assert!(serde_json::from_str::<ContentTypeId>("\"\"").is_err());
}

// ── Operation ─────────────────────────────────────────────────────

#[test]
fn operation_wire_names() {
    assert_eq!(Operation::BulkGet.as_str(), "bulkGet");
    assert_eq!(Operation::Create.to_string(), "create");
    assert_eq!(serde_json::to_string(&Operation::BulkGet).unwrap(), "\"bulkGet\"");
}

#[test]
fn operation_parses_every_wire_name() {
    for op in Operation::ALL {
        assert_eq!(Operation::from_str(op.as_str()), Ok(op));
    }
}

#[test]
fn operation_rejects_unknown_name() {
    assert_eq!(Operation::from_str("mSearch"), Err("mSearch".to_string()));
    assert!(Operation::from_str("Create").is_err());
}
