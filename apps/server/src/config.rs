use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_EMAIL_FROM: &str = "Bug Tracker <bugs@resend.dev>";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub functions: FunctionsConfig,
    pub email: EmailConfig,
}

/// Database connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

/// Security configuration for production deployments
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// True if server is behind a proxy that terminates SSL (nginx, Cloudflare, etc.)
    /// When true: cookie_secure=true is enabled
    pub ssl_proxy: bool,
    /// Session encryption key (64 hex chars). Required when ssl_proxy=true
    pub session_secret_key: Option<String>,
}

/// Where the notification function lives and how to call it
#[derive(Debug, Clone)]
pub struct FunctionsConfig {
    /// Base URL of the function host, without the `/functions/v1` suffix
    pub base_url: Url,
    /// Bearer token sent by the submission flow and required by the function.
    /// When unset the function accepts unauthenticated calls.
    pub token: Option<String>,
}

/// Outbound email provider settings used by the notification function
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from_address: String,
    pub provider: EmailProviderConfig,
}

#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    Resend {
        api_key: String,
        api_url: Url,
    },
    Smtp {
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
    },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            security: SecurityConfig::from_env()?,
            functions: FunctionsConfig::from_env(port)?,
            email: EmailConfig::from_env()?,
            host,
            port,
        })
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        Ok(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            acquire_timeout: Duration::from_secs(
                env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),
            idle_timeout: Duration::from_secs(
                env::var("DATABASE_IDLE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()
                    .unwrap_or(600),
            ),
            max_lifetime: Duration::from_secs(
                env::var("DATABASE_MAX_LIFETIME_SECS")
                    .unwrap_or_else(|_| "1800".to_string())
                    .parse()
                    .unwrap_or(1800),
            ),
        })
    }
}

impl SecurityConfig {
    /// Load security configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret_key = env::var("SESSION_SECRET_KEY").ok();

        let ssl_proxy = env::var("SSL_PROXY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        // When SSL_PROXY is enabled, SESSION_SECRET_KEY is required
        if ssl_proxy && session_secret_key.is_none() {
            return Err(ConfigError::MissingSessionSecret);
        }

        Ok(Self {
            ssl_proxy,
            session_secret_key,
        })
    }
}

impl FunctionsConfig {
    /// Load function host settings. Defaults to this server on loopback.
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        let raw =
            env::var("FUNCTIONS_URL").unwrap_or_else(|_| format!("http://127.0.0.1:{}", port));
        let base_url = parse_http_url(&raw, "FUNCTIONS_URL")?;

        Ok(Self {
            base_url,
            token: env::var("FUNCTIONS_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }

    /// Full URL of the send-bug-email function
    pub fn send_bug_email_url(&self) -> String {
        format!(
            "{}/functions/v1/send-bug-email",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

impl EmailConfig {
    /// Load email provider settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let from_address =
            env::var("EMAIL_FROM").unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string());

        let provider = match env::var("EMAIL_PROVIDER")
            .unwrap_or_else(|_| "resend".to_string())
            .to_lowercase()
            .as_str()
        {
            "resend" => {
                let api_key = env::var("RESEND_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty())
                    .ok_or(ConfigError::MissingResendApiKey)?;
                let api_url = parse_http_url(
                    &env::var("RESEND_API_URL")
                        .unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string()),
                    "RESEND_API_URL",
                )?;
                EmailProviderConfig::Resend { api_key, api_url }
            }
            "smtp" => EmailProviderConfig::Smtp {
                host: env::var("SMTP_HOST").map_err(|_| ConfigError::MissingSmtpHost)?,
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidSmtpPort)?,
                username: env::var("SMTP_USERNAME").ok(),
                password: env::var("SMTP_PASSWORD").ok(),
            },
            other => return Err(ConfigError::UnknownEmailProvider(other.to_string())),
        };

        Ok(Self {
            from_address,
            provider,
        })
    }
}

fn parse_http_url(raw: &str, var: &'static str) -> Result<Url, ConfigError> {
    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(url),
        _ => Err(ConfigError::InvalidUrl(var)),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort,
    InvalidSmtpPort,
    InvalidUrl(&'static str),
    MissingDatabaseUrl,
    MissingSessionSecret,
    MissingResendApiKey,
    MissingSmtpHost,
    UnknownEmailProvider(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid number"),
            ConfigError::InvalidUrl(var) => write!(f, "{} must be a valid http(s) URL", var),
            ConfigError::MissingDatabaseUrl => {
                write!(f, "DATABASE_URL environment variable is required")
            }
            ConfigError::MissingSessionSecret => {
                write!(
                    f,
                    "SESSION_SECRET_KEY is required when SSL_PROXY is enabled"
                )
            }
            ConfigError::MissingResendApiKey => {
                write!(f, "RESEND_API_KEY is required when EMAIL_PROVIDER=resend")
            }
            ConfigError::MissingSmtpHost => {
                write!(f, "SMTP_HOST is required when EMAIL_PROVIDER=smtp")
            }
            ConfigError::UnknownEmailProvider(name) => {
                write!(
                    f,
                    "EMAIL_PROVIDER '{}' is not supported (expected 'resend' or 'smtp')",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
