use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_without_env() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.site_root, None);
    assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn reads_port_and_site_root() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 "), ("SEHATNAMA_SITE_ROOT", "target/site")])).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.site_root, Some(PathBuf::from("target/site")));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", ""), ("SEHATNAMA_SITE_ROOT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.site_root, None);
}

#[test]
fn rejects_invalid_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "eighty"));
    assert_eq!(err.to_string(), "invalid PORT value `eighty`");
}
