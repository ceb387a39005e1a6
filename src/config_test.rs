use std::collections::HashMap;

use super::*;

fn load(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| map.get(key).cloned())
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn empty_environment_uses_defaults() {
    let config = load(&[]);
    assert_eq!(config, Config::default());
    assert_eq!(config.latency, Duration::from_millis(1000));
    assert_eq!(config.allowed_emails, vec!["demo@example.com".to_owned(), "user@example.com".to_owned()]);
    assert_eq!(config.rehydrate, RehydratePolicy::FailClosed);
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn store_path_override() {
    let config = load(&[(STORE_PATH_VAR, "/tmp/session.json")]);
    assert_eq!(config.store_path, PathBuf::from("/tmp/session.json"));
}

#[test]
fn blank_store_path_falls_back() {
    let config = load(&[(STORE_PATH_VAR, "  ")]);
    assert_eq!(config.store_path, Config::default().store_path);
}

#[test]
fn latency_override() {
    let config = load(&[(LATENCY_MS_VAR, "0")]);
    assert_eq!(config.latency, Duration::ZERO);
}

#[test]
fn invalid_latency_falls_back() {
    let config = load(&[(LATENCY_MS_VAR, "soon")]);
    assert_eq!(config.latency, DEFAULT_LATENCY);
}

#[test]
fn allowed_emails_parsed_and_trimmed() {
    let config = load(&[(ALLOWED_EMAILS_VAR, " a@x.io , ,b@y.io")]);
    assert_eq!(config.allowed_emails, vec!["a@x.io".to_owned(), "b@y.io".to_owned()]);
}

#[test]
fn empty_allowed_emails_falls_back() {
    let config = load(&[(ALLOWED_EMAILS_VAR, " , ")]);
    assert_eq!(config.allowed_emails, Config::default().allowed_emails);
}

#[test]
fn strict_rehydrate_flag() {
    assert_eq!(load(&[(STRICT_REHYDRATE_VAR, "yes")]).rehydrate, RehydratePolicy::Strict);
    assert_eq!(load(&[(STRICT_REHYDRATE_VAR, "off")]).rehydrate, RehydratePolicy::FailClosed);
    assert_eq!(load(&[(STRICT_REHYDRATE_VAR, "maybe")]).rehydrate, RehydratePolicy::FailClosed);
}

#[test]
fn auth_options_mirror_config() {
    let config = load(&[(LATENCY_MS_VAR, "5"), (STRICT_REHYDRATE_VAR, "1")]);
    let options = config.auth_options();
    assert_eq!(options.latency, Duration::from_millis(5));
    assert_eq!(options.rehydrate, RehydratePolicy::Strict);
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_accepts_common_spellings() {
    for raw in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(raw), Some(true), "{raw}");
    }
    for raw in ["0", "False", "no", "OFF"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw}");
    }
    assert_eq!(parse_bool(""), None);
}
