//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default connection-establishment timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default directory served under `/images`.
pub const DEFAULT_IMAGES_DIR: &str = "./public";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub contact: ContactConfig,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// Root of the static files served under `/images`
    pub images_dir: PathBuf,
}

/// Database configuration. Without a URL the server keeps its data in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty denies cross-origin access, `*` allows any
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

/// Contact form settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Shared secret expected in the `x-api-key` header
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ContactConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Telegram Bot API credentials for operator notifications
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_nonempty(key).and_then(|s| s.parse().ok())
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let telegram = match (
            env_nonempty("TELEGRAM_BOT_TOKEN"),
            env_nonempty("TELEGRAM_CHAT_ID"),
        ) {
            (None, None) => None,
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_base: env_nonempty("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
                bot_token,
                chat_id,
            }),
            _ => anyhow::bail!("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together"),
        };

        let config = Config {
            server: ServerConfig {
                host: env_nonempty("SHOWROOM_HOST")
                    .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: env_parse("PORT").unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_parse("SHOWROOM_SHUTDOWN_TIMEOUT")
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
                images_dir: env_nonempty("IMAGES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
            },
            database: DatabaseConfig {
                url: env_nonempty("DATABASE_URL"),
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
                connect_timeout_secs: env_parse("DATABASE_CONNECT_TIMEOUT")
                    .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
            },
            cors: CorsConfig {
                allowed_origins: env_nonempty("FRONTEND_URLS")
                    .map(|raw| parse_origins(&raw))
                    .unwrap_or_default(),
                allow_credentials: env_parse("CORS_ALLOW_CREDENTIALS").unwrap_or(true),
            },
            contact: ContactConfig {
                api_key: env_nonempty("CONTACT_API_KEY").or_else(|| env_nonempty("API_KEY")),
            },
            telegram,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("Database max_connections must be greater than 0");
        }

        if let Some(telegram) = &self.telegram {
            if telegram.bot_token.is_empty() || telegram.chat_id.is_empty() {
                anyhow::bail!("Telegram bot token and chat id cannot be empty");
            }
        }

        if self.database.url.is_none() {
            tracing::warn!("DATABASE_URL not set - data will be kept in memory only");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("FRONTEND_URLS not set - cross-origin requests will be refused");
        }

        if self.contact.api_key.is_none() {
            tracing::warn!("CONTACT_API_KEY not set - every contact submission will be rejected");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
                allow_credentials: true,
            },
            contact: ContactConfig::default(),
            telegram: None,
        }
    }
}
