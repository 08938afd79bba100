//! Loading configuration from disk and wiring it into a client

use lattice::prelude::*;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_from_yaml_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        r#"
base_url: https://api.example.org/
auth_token: abc
timeout_ms: 5000
api_overrides:
  linking: http://127.0.0.1:9000/linking
"#
    )?;

    let config = Configuration::from_yaml_file(file.path().to_str().unwrap())?;
    assert_eq!(config.base_url, "https://api.example.org");
    assert_eq!(config.auth_token(), Some("abc"));
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(
        config.api_base_url(ApiName::Organizations),
        "https://api.example.org/datastore/organizations"
    );
    assert_eq!(
        config.api_base_url(ApiName::Linking),
        "http://127.0.0.1:9000/linking"
    );

    let client = LatticeClient::new(config.clone())?;
    assert_eq!(client.config(), &config);
    Ok(())
}

#[test]
fn test_sub_second_timeouts_survive() {
    let config = Configuration::new("production")
        .unwrap()
        .with_timeout(Duration::from_millis(500));
    assert_eq!(config.timeout(), Duration::from_millis(500));

    let config = config.with_timeout(Duration::from_micros(10));
    assert_eq!(config.timeout(), Duration::from_millis(1));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let result = Configuration::from_yaml_str("base_url: localhost
timeout_ms: 0
");
    assert!(matches!(result, Err(ConfigError::InvalidTimeout)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = Configuration::from_yaml_file("/definitely/not/here.yaml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let result = Configuration::from_yaml_str("base_url: [unclosed");
    assert!(matches!(result, Err(ConfigError::Parse(_))));

    let result = Configuration::from_yaml_str("auth_token: abc\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_every_api_has_a_distinct_default_url() {
    let config = Configuration::new("production").unwrap();
    let urls: std::collections::HashSet<_> = ApiName::ALL
        .iter()
        .map(|api| config.api_base_url(*api))
        .collect();
    assert_eq!(urls.len(), ApiName::ALL.len());
    assert!(urls.iter().all(|url| url.starts_with("https://api.openlattice.com/datastore/")));
}

#[test]
fn test_config_error_converts_into_lattice_error() {
    let err: LatticeError = Configuration::new("mailto:someone").unwrap_err().into();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert!(err.is_local());
}
