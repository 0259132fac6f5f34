// tests/config_test.rs
use serial_test::serial;
use srcbump::config::{load_config, Config, CONFIG_FILE_NAME};
use srcbump::BumpError;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
#[serial]
fn test_load_default_config() {
    let work = TempDir::new().unwrap();
    let xdg = TempDir::new().unwrap();
    let original_dir = env::current_dir().unwrap();
    let saved: Vec<_> = ["HOME", "XDG_CONFIG_HOME"]
        .iter()
        .map(|key| (*key, env::var_os(key)))
        .collect();

    env::set_current_dir(work.path()).unwrap();
    for (key, _) in &saved {
        env::set_var(key, xdg.path());
    }
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();
    for (key, value) in saved {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    let config = result.unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.name_pattern, "^(?i)version$");
    assert_eq!(config.default_version, "0.0.0");
    assert!(!config.check_version_up);
    assert!(!config.output.raw);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
name_pattern = "^(App)?Version$"
default_version = "0.1.0"
check_version_up = true

[output]
raw = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.name_pattern, "^(App)?Version$");
    assert_eq!(config.default_version, "0.1.0");
    assert!(config.check_version_up);
    assert!(config.output.raw);

    let policy = config.to_policy().unwrap();
    assert!(policy.name_pattern().is_match("AppVersion"));
    assert!(policy.name_pattern().is_match("Version"));
    assert!(!policy.name_pattern().is_match("version"));
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"check_version_up = \"sometimes\"").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, BumpError::Config(_)));
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "default_version = \"2.0.0\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.unwrap().default_version, "2.0.0");
}

#[test]
#[serial]
fn test_explicit_path_wins_over_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "check_version_up = true\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "check_version_up = false\n").unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let config = load_config(Some(explicit.to_str().unwrap()));
    env::set_current_dir(original_dir).unwrap();

    assert!(!config.unwrap().check_version_up);
}
