use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_console_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("BACKEND_URL");
        std::env::remove_var("BACKEND_TIMEOUT_SECS");
        std::env::remove_var("BACKEND_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("MAX_BODY_BYTES");
    }
}

#[test]
fn from_env_uses_defaults() {
    unsafe { clear_console_env() };

    let cfg = ConsoleConfig::from_env().unwrap();
    assert_eq!(cfg, ConsoleConfig::default());
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.backend_url, "http://127.0.0.1:5000");
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(30));
    assert_eq!(cfg.timeouts.connect(), Duration::from_secs(5));
    assert_eq!(cfg.max_body_bytes, 16 * 1024 * 1024);
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_console_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BACKEND_URL", "https://api.example.test/");
        std::env::set_var("BACKEND_TIMEOUT_SECS", "12");
        std::env::set_var("BACKEND_CONNECT_TIMEOUT_SECS", " 2 ");
        std::env::set_var("MAX_BODY_BYTES", "1024");
    }

    let cfg = ConsoleConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://api.example.test");
    assert_eq!(cfg.timeouts, BackendTimeouts { request_secs: 12, connect_secs: 2 });
    assert_eq!(cfg.max_body_bytes, 1024);

    unsafe { clear_console_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    unsafe {
        clear_console_env();
        std::env::set_var("PORT", "eighty");
    }

    let err = ConsoleConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    assert!(err.to_string().contains("eighty"));

    unsafe { clear_console_env() };
}

#[test]
fn empty_values_fall_back_to_defaults() {
    unsafe {
        clear_console_env();
        std::env::set_var("PORT", "");
        std::env::set_var("BACKEND_URL", "  ");
    }

    let cfg = ConsoleConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);

    unsafe { clear_console_env() };
}

#[test]
fn backend_url_requires_http_scheme() {
    let err = parse_backend_url(Some("ftp://files.example.test")).unwrap_err();
    assert!(err.to_string().contains("BACKEND_URL"));
    assert_eq!(parse_backend_url(Some("http://localhost:5000//")).unwrap(), "http://localhost:5000");
}
