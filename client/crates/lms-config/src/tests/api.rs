use crate::ApiConfig;

#[test]
fn test_default_api_config_is_valid() {
    assert!(ApiConfig::default().validate().is_ok());
}

#[test]
fn test_endpoint_url_joins_prefix() {
    let config = ApiConfig {
        base_url: "http://localhost:8000/".to_string(),
        ..Default::default()
    };
    assert_eq!(
        config.endpoint_url(&config.session_path),
        "http://localhost:8000/api/auth/me"
    );
}

#[test]
fn test_base_url_without_scheme_rejected() {
    let config = ApiConfig {
        base_url: "localhost:8000".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_relative_endpoint_rejected() {
    let config = ApiConfig {
        logout_path: "auth/logout".to_string(),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("logout_path"));
}

#[test]
fn test_timeout_out_of_range_rejected() {
    let zero = ApiConfig {
        timeout_secs: 0,
        ..Default::default()
    };
    let huge = ApiConfig {
        timeout_secs: crate::MAX_TIMEOUT_SECS + 1,
        ..Default::default()
    };
    assert!(zero.validate().is_err());
    assert!(huge.validate().is_err());
}
