use contentmgmt_core::DuplicatePolicy;
use contentmgmt_server::{
    registry_from_config, ConfigSource, ContentTypeConfig, ServerConfig, DEFAULT_PORT,
};
use pretty_assertions::assert_eq;

fn load_config_from_str(toml_content: &str) -> (ServerConfig, ConfigSource) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contentmgmt.toml");
    std::fs::write(&path, toml_content).unwrap();
    ServerConfig::read(&path)
}

#[test]
fn parse_full_config() {
    let toml_str = r#"
        port = 8080
        log_filter = "debug"

        [registry]
        on_duplicate = "reject"

        [[content_types]]
        id = "dashboard"
        latest_version = 2

        [[content_types]]
        id = "map"
    "#;
    let config = ServerConfig::from_toml_str(toml_str).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.registry.on_duplicate, DuplicatePolicy::Reject);
    assert_eq!(
        config.content_types,
        vec![
            ContentTypeConfig { id: "dashboard".into(), latest_version: 2 },
            ContentTypeConfig { id: "map".into(), latest_version: 1 },
        ]
    );
}

#[test]
fn empty_config_is_default() {
    let config = ServerConfig::from_toml_str("").unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.registry.on_duplicate, DuplicatePolicy::Replace);
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let fake_path = dir.path().join("nonexistent.toml");

    let (config, source) = ServerConfig::read(&fake_path);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(source, ConfigSource::Missing(fake_path));
}

#[test]
fn load_from_valid_file() {
    let (config, source) = load_config_from_str("port = 9000\n");
    assert_eq!(config.port, 9000);
    assert!(matches!(source, ConfigSource::File(_)));
}

#[test]
fn load_from_malformed_file_falls_back_to_defaults() {
    let (config, source) = load_config_from_str("this is not valid toml {{{{");
    assert_eq!(config, ServerConfig::default());
    assert!(matches!(source, ConfigSource::Invalid { .. }));
}

#[test]
fn load_from_wrong_types_falls_back_to_defaults() {
    let (config, source) = load_config_from_str("port = \"not a number\"\n");
    assert_eq!(config, ServerConfig::default());
    assert!(matches!(source, ConfigSource::Invalid { .. }));
}

#[test]
fn load_from_logs_and_returns_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contentmgmt.toml");
    std::fs::write(&path, "log_filter = \"warn\"\n").unwrap();
    assert_eq!(ServerConfig::load_from(&path).log_filter, "warn");
}

// ── registry construction ────────────────────────────────────────

#[test]
fn registry_from_config_registers_content_types() {
    let config = ServerConfig::from_toml_str(
        r#"
        [[content_types]]
        id = "dashboard"
        latest_version = 3
        "#,
    )
    .unwrap();

    let registry = registry_from_config(&config).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("dashboard").unwrap().latest_version().get(), 3);
}

#[test]
fn registry_from_config_rejects_duplicates_when_configured() {
    let config = ServerConfig::from_toml_str(
        r#"
        [registry]
        on_duplicate = "reject"

        [[content_types]]
        id = "dashboard"

        [[content_types]]
        id = "dashboard"
        "#,
    )
    .unwrap();

    let err = registry_from_config(&config).unwrap_err();
    assert_eq!(err.to_string(), "Content [dashboard] is already registered.");
}

#[test]
fn registry_from_config_rejects_invalid_version() {
    let config = ServerConfig::from_toml_str(
        r#"
        [[content_types]]
        id = "dashboard"
        latest_version = 0
        "#,
    )
    .unwrap();

    assert!(registry_from_config(&config).is_err());
}
