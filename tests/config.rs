//! Loading configuration from TOML files and the environment.

use marquee::{initialize, Config, MarqueeError};
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_apply_and_env_wins() {
    let file = write_config(
        r#"
api_url = "http://catalog.internal:9000"
limit_per_genre = 4
debounce_ms = 150
trace_file = "/tmp/marquee-spans.jsonl"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.api_url, "http://catalog.internal:9000");
    assert_eq!(config.limit_per_genre, 4);
    assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/marquee-spans.jsonl")));
    assert!(config.admin);

    let config = config.apply_env(|name| {
        (name == "MARQUEE_LIMIT_PER_GENRE").then(|| "12".to_string())
    });
    assert_eq!(config.limit_per_genre, 12);
    assert_eq!(config.debounce_ms, 150);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let file = write_config("limit_per_genre = \"lots\"");
    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, MarqueeError::Config(_)), "{err}");
}

#[test]
fn explicit_missing_path_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, MarqueeError::Io(_)));
}

#[test]
fn viewer_config_starts_without_admin_controls() {
    let file = write_config("admin = false\nlimit_per_genre = 3");
    let config = Config::from_file(file.path()).unwrap();
    let state = initialize(&config);

    assert!(!state.context.is_admin());
    assert_eq!(state.limit_per_genre(), 3);
    assert!(!state.compute_viewmodel().header.admin);
}
