use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::config::{ConfigError, StaticfsConfig};

fn mount_toml(prefix: &str, root: &Path) -> String {
    format!(
        "[[mount]]\nurl_prefix = \"{prefix}\"\nroot = \"{}\"\n",
        root.display()
    )
}

//-----------------------------------------------------------------------------
// Parsing
//-----------------------------------------------------------------------------
#[test]
fn parses_full_mount() {
    // Arrange
    let text = r#"
        listen = "127.0.0.1:8080"

        [[mount]]
        url_prefix = "/dir"
        root = "./public"
        browse = true
        index = "home.html"
        max_age = 3600
        not_found_file = "index.html"
        path_prefix = "img"
        auth_token = { header = "token", value = "123" }
    "#;

    // Act
    let cfg = StaticfsConfig::parse(text).unwrap();

    // Assert
    assert_eq!(cfg.listen, "127.0.0.1:8080");
    assert_eq!(cfg.mounts.len(), 1);
    let mount = &cfg.mounts[0];
    assert_eq!(mount.options.url_prefix, "/dir");
    assert_eq!(mount.root, Path::new("./public"));
    assert!(mount.options.browse);
    assert_eq!(mount.options.index, "home.html");
    assert_eq!(mount.options.max_age, 3600);
    assert_eq!(mount.options.not_found_file.as_deref(), Some("index.html"));
    assert_eq!(mount.options.path_prefix, "img");
    let token = mount.auth_token.as_ref().unwrap();
    assert_eq!(token.header, "token");
    assert_eq!(token.value, "123");
}

#[test]
fn omitted_fields_take_defaults() {
    let cfg = StaticfsConfig::parse("[[mount]]\nroot = \"./public\"\n").unwrap();

    assert_eq!(cfg.listen, "0.0.0.0:3000");
    let mount = &cfg.mounts[0];
    assert_eq!(mount.options.url_prefix, "");
    assert!(!mount.options.browse);
    assert_eq!(mount.options.index, "index.html");
    assert_eq!(mount.options.max_age, 0);
    assert!(mount.options.not_found_file.is_none());
    assert!(mount.auth_token.is_none());
}

#[test]
fn missing_root_is_a_parse_error() {
    assert!(StaticfsConfig::parse("[[mount]]\nurl_prefix = \"/a\"\n").is_err());
}

//-----------------------------------------------------------------------------
// Validation
//-----------------------------------------------------------------------------
#[test]
fn no_mounts_is_rejected() {
    let cfg = StaticfsConfig::parse("listen = \"0.0.0.0:3000\"\n").unwrap();

    assert!(matches!(cfg.validate(), Err(ConfigError::NoMounts)));
}

#[test]
fn valid_config_passes() {
    let dir = tempdir().unwrap();
    let text = format!(
        "{}{}",
        mount_toml("/a", dir.path()),
        mount_toml("", dir.path())
    );

    let cfg = StaticfsConfig::parse(&text).unwrap();

    assert!(cfg.validate().is_ok());
}

#[test]
fn prefix_without_leading_slash_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = StaticfsConfig::parse(&mount_toml("assets", dir.path())).unwrap();

    let err = cfg.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidPrefix { ref prefix } if prefix == "assets"));
}

#[test]
fn duplicate_prefix_is_rejected() {
    let dir = tempdir().unwrap();
    let text = format!(
        "{}{}",
        mount_toml("/a", dir.path()),
        mount_toml("/a", dir.path())
    );
    let cfg = StaticfsConfig::parse(&text).unwrap();

    let err = cfg.validate().unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateMount { .. }));
}

#[test]
fn missing_root_directory_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = StaticfsConfig::parse(&mount_toml("/a", &dir.path().join("nope"))).unwrap();

    let err = cfg.validate().unwrap_err();

    assert!(matches!(err, ConfigError::MissingRoot { .. }));
}

#[test]
fn invalid_auth_header_is_rejected() {
    let dir = tempdir().unwrap();
    let text = format!(
        "{}auth_token = {{ header = \"bad header\", value = \"x\" }}\n",
        mount_toml("/a", dir.path())
    );
    let cfg = StaticfsConfig::parse(&text).unwrap();

    let err = cfg.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidAuthHeader { ref header, .. } if header == "bad header"));
}

//-----------------------------------------------------------------------------
// Loading
//-----------------------------------------------------------------------------
#[test]
fn from_file_loads_and_validates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staticfs.toml");
    fs::write(&path, mount_toml("/static", dir.path())).unwrap();

    let cfg = StaticfsConfig::from_file(&path).unwrap();

    assert_eq!(cfg.mounts[0].options.url_prefix, "/static");
}

#[test]
fn from_file_reports_missing_file() {
    let dir = tempdir().unwrap();

    let err = StaticfsConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn from_file_reports_parse_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[mount]\n").unwrap();

    let err = StaticfsConfig::from_file(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}
