use super::*;
use std::collections::HashMap;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_defaults() {
    let cfg = Config::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn from_vars_overrides() {
    let cfg = Config::from_vars(vars(&[("HOST", "127.0.0.1"), ("PORT", " 8080 "), ("CORS_PERMISSIVE", "off")])).unwrap();
    assert_eq!(cfg.addr().to_string(), "127.0.0.1:8080");
    assert!(!cfg.cors_permissive);
}

#[test]
fn from_vars_invalid_port_errors() {
    let err = Config::from_vars(vars(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".into() });
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn from_vars_invalid_host_errors() {
    assert!(Config::from_vars(vars(&[("HOST", "not-an-ip")])).is_err());
}

#[test]
fn from_vars_invalid_cors_errors() {
    assert!(Config::from_vars(vars(&[("CORS_PERMISSIVE", "maybe")])).is_err());
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  true  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "NO"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}
