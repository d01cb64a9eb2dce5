use contentmgmt_schema::{ObjectSchema, Schema, Unknowns, ValidationError, ValidationErrorKind, type_name};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

fn message(schema: &Schema, value: Value) -> String {
    schema.validate(&value).unwrap_err().to_string()
}

fn request_schema() -> Schema {
    ObjectSchema::new()
        .field("contentTypeId", Schema::String)
        .field("version", Schema::number_min(1))
        .field("data", Schema::open_object())
        .optional("options", Schema::PlainObject)
        .into()
}

// ── type_name ────────────────────────────────────────────────────

#[test]
fn type_names() {
    assert_eq!(type_name(None), "undefined");
    assert_eq!(type_name(Some(&json!(null))), "null");
    assert_eq!(type_name(Some(&json!(true))), "boolean");
    assert_eq!(type_name(Some(&json!(1))), "number");
    assert_eq!(type_name(Some(&json!("a"))), "string");
    assert_eq!(type_name(Some(&json!([]))), "Array");
    assert_eq!(type_name(Some(&json!({}))), "Object");
}

// ── Scalars ──────────────────────────────────────────────────────

#[test]
fn string_rejects_number() {
    assert_eq!(
        message(&Schema::String, json!(1)),
        "expected value of type [string] but got [number]"
    );
}

#[test]
fn number_coerces_numeric_string() {
    assert_eq!(Schema::number().validate(&json!("12")).unwrap(), json!(12));
    assert_eq!(Schema::number().validate(&json!(" 1.5 ")).unwrap(), json!(1.5));
}

#[test]
fn number_rejects_non_numeric_string() {
    assert_eq!(
        message(&Schema::number(), json!("abc")),
        "expected value of type [number] but got [string]"
    );
}

#[test]
fn number_minimum() {
    assert_eq!(
        message(&Schema::number_min(1), json!(0)),
        "Value must be equal to or greater than [1]."
    );
    assert_eq!(Schema::number_min(1).validate(&json!(1)).unwrap(), json!(1));
}

#[test]
fn boolean_rejects_string() {
    assert_eq!(
        message(&Schema::Boolean, json!("true")),
        "expected value of type [boolean] but got [string]"
    );
}

#[test]
fn any_accepts_everything() {
    for value in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
        assert_eq!(Schema::Any.validate(&value).unwrap(), value);
    }
}

// ── Objects ──────────────────────────────────────────────────────

#[test]
fn valid_request_passes() {
    let input = json!({"contentTypeId": "foo", "version": 1, "data": {"title": "hello"}});
    assert_eq!(request_schema().validate(&input).unwrap(), input);
}

#[test]
fn string_version_is_coerced() {
    let input = json!({"contentTypeId": "foo", "version": "1", "data": {}});
    let out = request_schema().validate(&input).unwrap();
    assert_eq!(out["version"], json!(1));
}

#[test]
fn missing_fields_report_undefined() {
    assert_eq!(
        message(&request_schema(), json!({"version": 1, "data": {}})),
        "[contentTypeId]: expected value of type [string] but got [undefined]"
    );
    assert_eq!(
        message(&request_schema(), json!({"contentTypeId": "foo", "data": {}})),
        "[version]: expected value of type [number] but got [undefined]"
    );
    assert_eq!(
        message(&request_schema(), json!({"contentTypeId": "foo", "version": 1})),
        "[data]: expected value of type [object] but got [undefined]"
    );
}

#[test]
fn data_must_be_object() {
    assert_eq!(
        message(&request_schema(), json!({"contentTypeId": "foo", "version": 1, "data": 123})),
        "[data]: expected value of type [object] but got [number]"
    );
}

#[test]
fn unknown_key_is_rejected() {
    assert_eq!(
        message(
            &request_schema(),
            json!({"contentTypeId": "foo", "version": 1, "data": {}, "unknown": "foo"})
        ),
        "[unknown]: definition for this key is missing"
    );
}

#[test]
fn options_must_be_plain_object() {
    let ok = json!({"contentTypeId": "foo", "version": 1, "data": {}, "options": {"any": "object"}});
    assert!(request_schema().validate(&ok).is_ok());

    assert_eq!(
        message(
            &request_schema(),
            json!({"contentTypeId": "foo", "version": 1, "data": {}, "options": 123})
        ),
        "[options]: expected a plain object value, but found [number] instead."
    );
}

#[test]
fn absent_optional_field_stays_absent() {
    let out = request_schema()
        .validate(&json!({"contentTypeId": "foo", "version": 1, "data": {}}))
        .unwrap();
    assert!(out.get("options").is_none());
}

#[test]
fn declared_fields_are_checked_before_unknown_keys() {
    let err = request_schema()
        .validate(&json!({"unknown": 1, "version": 1, "data": {}}))
        .unwrap_err();
    assert_eq!(err.path(), "contentTypeId");
}

#[test]
fn open_object_keeps_unknown_keys() {
    let schema = Schema::Object(ObjectSchema::new().field("a", Schema::String).unknowns(Unknowns::Allow));
    let input = json!({"a": "x", "b": 2});
    assert_eq!(schema.validate(&input).unwrap(), input);
}

#[test]
fn nested_paths_are_dot_joined() {
    let schema: Schema = ObjectSchema::new()
        .field("query", ObjectSchema::new().field("limit", Schema::number()).into())
        .into();
    let err = schema.validate(&json!({"query": {"limit": "many"}})).unwrap_err();
    assert_eq!(err.path(), "query.limit");
    assert_eq!(
        err.to_string(),
        "[query.limit]: expected value of type [number] but got [string]"
    );
}

// ── Arrays ───────────────────────────────────────────────────────

#[test]
fn array_items_report_index() {
    let schema: Schema = ObjectSchema::new().field("ids", Schema::array_of(Schema::String)).into();
    assert_eq!(
        message(&schema, json!({"ids": ["a", 2]})),
        "[ids.1]: expected value of type [string] but got [number]"
    );
    assert_eq!(
        message(&schema, json!({"ids": "a"})),
        "[ids]: expected value of type [Array] but got [string]"
    );
}

// ── ValidationError ──────────────────────────────────────────────

#[test]
fn custom_error_message() {
    let err = ValidationError::custom("version", "expected an integer");
    assert_eq!(err.to_string(), "[version]: expected an integer");
    assert_eq!(err.kind(), &ValidationErrorKind::Custom("expected an integer".into()));
}

#[test]
fn root_error_has_no_path_prefix() {
    let err = Schema::PlainObject.validate(&json!(123)).unwrap_err();
    assert_eq!(err.path(), "");
    assert_eq!(err.message(), "expected a plain object value, but found [number] instead.");
}

proptest! {
    #[test]
    fn integer_strings_coerce_to_the_same_number(n in any::<i64>()) {
        let coerced = Schema::number().validate(&json!(n.to_string())).unwrap();
        prop_assert_eq!(coerced, json!(n));
    }

    #[test]
    fn unknown_keys_are_named_in_the_error(key in "[a-z]{1,12}") {
        prop_assume!(!["contentTypeId", "version", "data", "options"].contains(&key.as_str()));
        let mut input = json!({"contentTypeId": "foo", "version": 1, "data": {}});
        input[&key] = json!(true);
        let err = request_schema().validate(&input).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("[{key}]: definition for this key is missing"));
    }
}
