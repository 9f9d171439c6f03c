use trackrec::config::{ConfigError, normalize_base_url};
use trackrec::spotify::Backend;

#[test]
fn test_normalize_base_url() {
    assert_eq!(
        normalize_base_url("X", "http://localhost:8888/").unwrap(),
        "http://localhost:8888"
    );
    assert_eq!(
        normalize_base_url("X", " https://recs.example.com// ").unwrap(),
        "https://recs.example.com"
    );
}

#[test]
fn test_normalize_base_url_rejects_non_http() {
    match normalize_base_url("TRACKREC_BACKEND_URL", "localhost:8888") {
        Err(ConfigError::InvalidUrl { name, value }) => {
            assert_eq!(name, "TRACKREC_BACKEND_URL");
            assert_eq!(value, "localhost:8888");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_login_url() {
    let backend = Backend::new("http://localhost:8888/");
    assert_eq!(backend.login_url(), "http://localhost:8888/");
}
