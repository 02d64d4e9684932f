//! Configuration management for the web server
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored in development) into a typed struct.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `HOST`: Host to bind to (default: 0.0.0.0)
//! - `PORT`: Port to bind to (default: 5500)
//! - `JWT_SECRET`: Secret for signing identity tokens (required, >= 32 chars)
//! - `SESSION_SECRET`: Secret for signing the notice cookie (required, >= 64 chars)
//! - `APP_ENV`: "production" enables secure cookies and HSTS
//! - `RUST_LOG`: Log filter (default: info)

use openlot_shared::db::pool::DatabaseConfig;
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseSettings,

    /// Secrets for tokens and the signed notice cookie
    pub secrets: SecretsConfig,

    /// Whether we are running in production
    ///
    /// Controls the `Secure` flag on cookies and the HSTS header.
    pub production: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Signing secrets
#[derive(Debug, Clone)]
pub struct SecretsConfig {
    /// Secret key for signing identity tokens
    pub jwt_secret: String,

    /// Secret key for the signed one-shot notice cookie
    pub session_secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a numeric
    /// variable fails to parse, or a secret is too short to sign with.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5500".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        // The cookie signing key is built directly from these bytes.
        if session_secret.len() < 64 {
            anyhow::bail!("SESSION_SECRET must be at least 64 characters long");
        }

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseSettings {
                url: database_url,
                max_connections,
            },
            secrets: SecretsConfig {
                jwt_secret,
                session_secret,
            },
            production,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Builds the pool configuration for the shared database layer
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5500,
            },
            database: DatabaseSettings {
                url: "postgresql://localhost/openlot_test".to_string(),
                max_connections: 5,
            },
            secrets: SecretsConfig {
                jwt_secret: "test-jwt-secret-at-least-32-bytes-long".to_string(),
                session_secret:
                    "test-session-secret-that-is-at-least-sixty-four-characters-long!!"
                        .to_string(),
            },
            production: false,
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:5500");
    }

    #[test]
    fn test_pool_config_carries_settings() {
        let pool = test_config().pool_config();
        assert_eq!(pool.url, "postgresql://localhost/openlot_test");
        assert_eq!(pool.max_connections, 5);
        // Remaining knobs come from the shared defaults.
        assert_eq!(pool.min_connections, 2);
    }
}
