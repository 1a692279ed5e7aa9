//! Unit tests for configuration parsing
//!
//! Tests environment variable parsing and default values.
//!
//! Note: These tests modify global environment variables and must run serially.

use bugtrack::config::{
    Config, ConfigError, EmailConfig, EmailProviderConfig, FunctionsConfig, SecurityConfig,
};
use serial_test::serial;

const EMAIL_VARS: &[&str] = &[
    "EMAIL_PROVIDER",
    "EMAIL_FROM",
    "RESEND_API_KEY",
    "RESEND_API_URL",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USERNAME",
    "SMTP_PASSWORD",
];

fn clear(vars: &[&str]) {
    for var in vars {
        std::env::remove_var(var);
    }
}

// =============================================================================
// Email Config Tests
// =============================================================================

#[test]
#[serial]
fn test_email_config_defaults_to_resend() {
    clear(EMAIL_VARS);
    std::env::set_var("RESEND_API_KEY", "re_test");

    let config = EmailConfig::from_env().unwrap();

    assert_eq!(config.from_address, "Bug Tracker <bugs@resend.dev>");
    match config.provider {
        EmailProviderConfig::Resend { api_key, api_url } => {
            assert_eq!(api_key, "re_test");
            assert_eq!(api_url.as_str(), "https://api.resend.com/");
        }
        other => panic!("expected resend, got {:?}", other),
    }

    clear(EMAIL_VARS);
}

#[test]
#[serial]
fn test_email_config_resend_requires_key() {
    clear(EMAIL_VARS);

    assert_eq!(
        EmailConfig::from_env().unwrap_err(),
        ConfigError::MissingResendApiKey
    );
}

#[test]
#[serial]
fn test_email_config_smtp() {
    clear(EMAIL_VARS);
    std::env::set_var("EMAIL_PROVIDER", "SMTP");
    std::env::set_var("SMTP_HOST", "smtp.example.com");
    std::env::set_var("SMTP_PORT", "465");
    std::env::set_var("EMAIL_FROM", "Bugs <bugs@example.com>");

    let config = EmailConfig::from_env().unwrap();

    assert_eq!(config.from_address, "Bugs <bugs@example.com>");
    match config.provider {
        EmailProviderConfig::Smtp {
            host,
            port,
            username,
            ..
        } => {
            assert_eq!(host, "smtp.example.com");
            assert_eq!(port, 465);
            assert!(username.is_none());
        }
        other => panic!("expected smtp, got {:?}", other),
    }

    clear(EMAIL_VARS);
}

#[test]
#[serial]
fn test_email_config_smtp_errors() {
    clear(EMAIL_VARS);
    std::env::set_var("EMAIL_PROVIDER", "smtp");
    assert_eq!(
        EmailConfig::from_env().unwrap_err(),
        ConfigError::MissingSmtpHost
    );

    std::env::set_var("SMTP_HOST", "smtp.example.com");
    std::env::set_var("SMTP_PORT", "not-a-port");
    assert_eq!(
        EmailConfig::from_env().unwrap_err(),
        ConfigError::InvalidSmtpPort
    );

    clear(EMAIL_VARS);
}

#[test]
#[serial]
fn test_email_config_unknown_provider() {
    clear(EMAIL_VARS);
    std::env::set_var("EMAIL_PROVIDER", "carrier-pigeon");

    assert_eq!(
        EmailConfig::from_env().unwrap_err(),
        ConfigError::UnknownEmailProvider("carrier-pigeon".to_string())
    );

    clear(EMAIL_VARS);
}

// =============================================================================
// Functions Config Tests
// =============================================================================

#[test]
#[serial]
fn test_functions_config_defaults_to_local_server() {
    clear(&["FUNCTIONS_URL", "FUNCTIONS_TOKEN"]);

    let config = FunctionsConfig::from_env(9000).unwrap();

    assert_eq!(
        config.send_bug_email_url(),
        "http://127.0.0.1:9000/functions/v1/send-bug-email"
    );
    assert!(config.token.is_none());
}

#[test]
#[serial]
fn test_functions_config_custom_url_and_token() {
    std::env::set_var("FUNCTIONS_URL", "https://project.example.co/");
    std::env::set_var("FUNCTIONS_TOKEN", "anon-key");

    let config = FunctionsConfig::from_env(8080).unwrap();

    assert_eq!(
        config.send_bug_email_url(),
        "https://project.example.co/functions/v1/send-bug-email"
    );
    assert_eq!(config.token.as_deref(), Some("anon-key"));

    clear(&["FUNCTIONS_URL", "FUNCTIONS_TOKEN"]);
}

#[test]
#[serial]
fn test_functions_config_rejects_non_http_url() {
    std::env::set_var("FUNCTIONS_URL", "ftp://example.com");

    assert_eq!(
        FunctionsConfig::from_env(8080).unwrap_err(),
        ConfigError::InvalidUrl("FUNCTIONS_URL")
    );

    clear(&["FUNCTIONS_URL"]);
}

// =============================================================================
// Server Config Tests
// =============================================================================

#[test]
#[serial]
fn test_security_config_requires_secret_behind_ssl_proxy() {
    std::env::set_var("SSL_PROXY", "true");
    std::env::remove_var("SESSION_SECRET_KEY");

    assert_eq!(
        SecurityConfig::from_env().unwrap_err(),
        ConfigError::MissingSessionSecret
    );

    std::env::remove_var("SSL_PROXY");
}

#[test]
#[serial]
fn test_config_requires_database_url() {
    std::env::remove_var("DATABASE_URL");
    std::env::remove_var("PORT");

    assert_eq!(
        Config::from_env().unwrap_err(),
        ConfigError::MissingDatabaseUrl
    );
}

#[test]
#[serial]
fn test_config_invalid_port() {
    std::env::set_var("PORT", "eighty");

    assert_eq!(Config::from_env().unwrap_err(), ConfigError::InvalidPort);

    std::env::remove_var("PORT");
}
