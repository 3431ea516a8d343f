//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, ServiceConfig};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use domain::{HashConfig, UserRules};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// URL userinfo keeps unreserved characters; everything else is escaped.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Bind address and logging
    pub service: ServiceConfig,
    /// Database connection
    pub database: DatabaseConfig,
    /// Username, email and password rules
    pub rules: UserRules,
    /// Password hash cost
    pub hashing: HashConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();
        let rules_defaults = UserRules::default();
        let hashing_defaults = HashConfig::default();

        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                host: env::var("SERVER_HOST").unwrap_or(service_defaults.host),
                port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_PORT),
                log_level: env::var("RUST_LOG").unwrap_or(service_defaults.log_level),
            },
            database: DatabaseConfig {
                url: database_url().unwrap_or(database_defaults.url),
                max_connections: parse_var("DB_MAX_CONNECTIONS")
                    .unwrap_or(database_defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS")
                    .unwrap_or(database_defaults.min_connections),
            },
            rules: UserRules {
                username_min_chars: parse_var("USERNAME_MIN_CHARS")
                    .unwrap_or(rules_defaults.username_min_chars),
                username_max_chars: parse_var("USERNAME_MAX_CHARS")
                    .unwrap_or(rules_defaults.username_max_chars),
                password_min_chars: parse_var("PASSWORD_MIN_CHARS")
                    .unwrap_or(rules_defaults.password_min_chars),
                email_pattern: env::var("EMAIL_PATTERN").unwrap_or(rules_defaults.email_pattern),
            },
            hashing: HashConfig {
                memory_kib: parse_var("ARGON2_MEMORY_KIB").unwrap_or(hashing_defaults.memory_kib),
                iterations: parse_var("ARGON2_ITERATIONS").unwrap_or(hashing_defaults.iterations),
                parallelism: parse_var("ARGON2_PARALLELISM")
                    .unwrap_or(hashing_defaults.parallelism),
            },
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            rules: UserRules::default(),
            hashing: HashConfig::default(),
        }
    }
}

/// `DATABASE_URL`, or a Postgres URL assembled from the `DB_*` parts.
fn database_url() -> Option<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Some(url);
    }

    let host = env::var("DB_HOST").ok()?;
    let name = env::var("DB_NAME").ok()?;
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_default();

    Some(compose_database_url(&user, &password, &host, &port, &name))
}

fn compose_database_url(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    let user = utf8_percent_encode(user, USERINFO);
    if password.is_empty() {
        format!("postgres://{}@{}:{}/{}", user, host, port, name)
    } else {
        let password = utf8_percent_encode(password, USERINFO);
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
