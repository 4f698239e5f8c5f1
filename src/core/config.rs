use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub ratelimits: RatelimitConfig,
    pub user_agent_blocks: UserAgentBlocksConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub expiry_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatelimitConfig {
    pub enabled: bool,
    pub requests_threshold: i64,
    pub block_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct UserAgentBlocksConfig {
    pub enabled: bool,
    pub user_agents: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

fn require_env(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{} is required", name))
}

/// Parse a 0/1 flag. The admission gates are explicitly configured on or
/// off; an unset key or anything other than "0" or "1" is a startup
/// error, not a default.
fn parse_enabled_flag(name: &str) -> Result<bool, String> {
    match require_env(name)?.as_str() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("{} must be either 0 or 1, got '{}'", name, other)),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env()?,
            ratelimits: RatelimitConfig::from_env()?,
            user_agent_blocks: UserAgentBlocksConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        Ok(Self { host, port })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Conservative pool defaults; this is a single-file SQLite deployment.
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

    pub fn from_env() -> Result<Self, String> {
        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://db/hirgon.sqlite3".to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SessionConfig {
    const DEFAULT_COOKIE_NAME: &'static str = "hirgon.sid";
    const DEFAULT_EXPIRY_DAYS: i64 = 3;

    pub fn from_env() -> Result<Self, String> {
        let cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| Self::DEFAULT_COOKIE_NAME.to_string());

        // Secure cookies by default; only development should turn this off.
        let secure = match env::var("SESSION_SECURE")
            .unwrap_or_else(|_| "1".to_string())
            .as_str()
        {
            "0" => false,
            "1" => true,
            other => return Err(format!("SESSION_SECURE must be either 0 or 1, got '{}'", other)),
        };

        let expiry_days = env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| Self::DEFAULT_EXPIRY_DAYS.to_string())
            .parse::<i64>()
            .map_err(|_| "SESSION_EXPIRY_DAYS must be a valid number".to_string())?;

        if expiry_days <= 0 {
            return Err("SESSION_EXPIRY_DAYS must be a positive number".to_string());
        }

        Ok(Self {
            cookie_name,
            secure,
            expiry_days,
        })
    }
}

impl RatelimitConfig {
    pub fn from_env() -> Result<Self, String> {
        let enabled = parse_enabled_flag("RATELIMITS_ENABLED")?;

        let requests_threshold = require_env("RATELIMITS_REQUESTS_THRESHOLD")?
            .parse::<i64>()
            .map_err(|_| "RATELIMITS_REQUESTS_THRESHOLD must be a valid number".to_string())?;

        if requests_threshold <= 0 {
            return Err("RATELIMITS_REQUESTS_THRESHOLD must be a positive number".to_string());
        }

        let block_seconds = require_env("RATELIMITS_BLOCK_SECONDS")?
            .parse::<i64>()
            .map_err(|_| "RATELIMITS_BLOCK_SECONDS must be a valid number".to_string())?;

        if block_seconds <= 0 {
            return Err("RATELIMITS_BLOCK_SECONDS must be a positive number".to_string());
        }

        Ok(Self {
            enabled,
            requests_threshold,
            block_seconds,
        })
    }
}

impl UserAgentBlocksConfig {
    pub fn from_env() -> Result<Self, String> {
        let enabled = parse_enabled_flag("USER_AGENT_BLOCKS_ENABLED")?;

        // Comma-separated list of literal user-agent fragments to reject.
        let user_agents: Vec<String> = env::var("USER_AGENT_BLOCKS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if enabled && user_agents.is_empty() {
            return Err(
                "USER_AGENT_BLOCKS must list at least one pattern when blocking is enabled"
                    .to_string(),
            );
        }

        Ok(Self {
            enabled,
            user_agents,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Hirgon API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for Hirgon".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_flag_accepts_zero_and_one() {
        std::env::set_var("TEST_FLAG_ZERO", "0");
        std::env::set_var("TEST_FLAG_ONE", "1");
        assert_eq!(parse_enabled_flag("TEST_FLAG_ZERO"), Ok(false));
        assert_eq!(parse_enabled_flag("TEST_FLAG_ONE"), Ok(true));
    }

    #[test]
    fn enabled_flag_rejects_other_values() {
        std::env::set_var("TEST_FLAG_BAD", "true");
        assert!(parse_enabled_flag("TEST_FLAG_BAD").is_err());
    }

    #[test]
    fn enabled_flag_requires_a_value() {
        std::env::remove_var("TEST_FLAG_UNSET");
        assert_eq!(
            parse_enabled_flag("TEST_FLAG_UNSET"),
            Err("TEST_FLAG_UNSET is required".to_string())
        );
    }

    // Single test so the shared RATELIMITS_* keys are never raced by a
    // parallel test.
    #[test]
    fn ratelimit_config_requires_every_key() {
        std::env::set_var("RATELIMITS_ENABLED", "1");
        std::env::set_var("RATELIMITS_REQUESTS_THRESHOLD", "10");
        std::env::set_var("RATELIMITS_BLOCK_SECONDS", "300");
        assert!(RatelimitConfig::from_env().is_ok());

        std::env::remove_var("RATELIMITS_REQUESTS_THRESHOLD");
        assert_eq!(
            RatelimitConfig::from_env(),
            Err("RATELIMITS_REQUESTS_THRESHOLD is required".to_string())
        );

        std::env::set_var("RATELIMITS_REQUESTS_THRESHOLD", "10");
        std::env::remove_var("RATELIMITS_BLOCK_SECONDS");
        assert_eq!(
            RatelimitConfig::from_env(),
            Err("RATELIMITS_BLOCK_SECONDS is required".to_string())
        );

        std::env::set_var("RATELIMITS_BLOCK_SECONDS", "300");
        std::env::remove_var("RATELIMITS_ENABLED");
        assert_eq!(
            RatelimitConfig::from_env(),
            Err("RATELIMITS_ENABLED is required".to_string())
        );
    }
}
