//! Loading referee settings from TOML files.

use std::io::Write;
use std::time::Duration;
use strictly_morris::RefereeConfig;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
move_timeout_ms = 1500
visual = false
web = true
port = 9001
random_colors = false
forward_stderr = true
move_delay_ms = 250
quiet_move_limit = 20
"#,
    );
    let config = RefereeConfig::from_file(file.path()).unwrap();
    assert_eq!(config.move_timeout(), Duration::from_millis(1500));
    assert!(!*config.visual());
    assert!(*config.web());
    assert_eq!(*config.port(), 9001);
    assert!(!*config.random_colors());
    assert!(*config.forward_stderr());
    assert_eq!(config.move_delay(), Duration::from_millis(250));
    assert_eq!(*config.quiet_move_limit(), Some(20));
}

#[test]
fn test_empty_file_is_all_defaults() {
    let file = write_config("");
    assert_eq!(
        RefereeConfig::from_file(file.path()).unwrap(),
        RefereeConfig::default()
    );
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("move_timeout_ms = 0\n");
    let err = RefereeConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("greater than zero"), "{err}");
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("port = \"eight thousand\"\n");
    let err = RefereeConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"), "{err}");
}

#[test]
fn test_missing_file_rejected() {
    let err = RefereeConfig::from_file("/no/such/referee.toml").unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"), "{err}");
}
