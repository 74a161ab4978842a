use super::*;

#[test]
fn test_defaults_match_backend_protocol() {
    let config = ExternalEngineConfig::default();
    assert_eq!(config.command, PathBuf::from("~/bin/engine"));
    assert_eq!(config.scratch_dir, PathBuf::from("temp"));
    assert_eq!(config.table_size, 69_696_983);
    assert!(config.args.is_empty());
}

#[test]
fn test_empty_toml_table_uses_defaults() {
    let config: ExternalEngineConfig = toml::from_str("").unwrap();
    assert_eq!(config, ExternalEngineConfig::default());
}

#[test]
fn test_toml_overrides() {
    let config: ExternalEngineConfig = toml::from_str(
        r#"
        name = "Homemade"
        command = "/opt/engine/bin/engine"
        args = ["--quiet"]
        scratch_dir = "/tmp/engine-io"
        "#,
    )
    .unwrap();

    assert_eq!(config.name, "Homemade");
    assert_eq!(config.command, PathBuf::from("/opt/engine/bin/engine"));
    assert_eq!(config.args, vec!["--quiet".to_string()]);
    assert_eq!(config.scratch_dir, PathBuf::from("/tmp/engine-io"));
    assert_eq!(config.table_size, DEFAULT_TABLE_SIZE);
}

#[test]
fn test_expand_home() {
    let home = Some(OsString::from("/home/bot"));
    assert_eq!(
        expand_home(Path::new("~/bin/engine"), home.clone()).unwrap(),
        PathBuf::from("/home/bot/bin/engine")
    );
    assert_eq!(
        expand_home(Path::new("/usr/bin/engine"), home.clone()).unwrap(),
        PathBuf::from("/usr/bin/engine")
    );
    // Only a whole `~` component is expanded.
    assert_eq!(
        expand_home(Path::new("~bot/engine"), home).unwrap(),
        PathBuf::from("~bot/engine")
    );
}

#[test]
fn test_expand_home_without_home_is_configuration_error() {
    let err = expand_home(Path::new("~/bin/engine"), None).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}
