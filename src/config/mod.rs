use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::screening::policy::SkillTier;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub provider: ProviderConfig,
    pub screening: ScreeningDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let provider = ProviderConfig {
            api_key: env::var("RIOT_API_KEY").ok().filter(|key| !key.is_empty()),
            account_region: env::var("RIOT_ACCOUNT_REGION").unwrap_or_else(|_| "asia".to_string()),
            platform_region: env::var("RIOT_PLATFORM_REGION")
                .unwrap_or_else(|_| "jp1".to_string()),
        };

        let default_tier = match env::var("SCREEN_DEFAULT_TIER") {
            Ok(raw) => raw
                .parse::<SkillTier>()
                .map_err(|_| ConfigError::InvalidTier { value: raw })?,
            Err(_) => SkillTier::Beginner,
        };
        let level_ceiling = parse_level("SCREEN_LEVEL_CEILING", 200)?;
        let level_floor = parse_level("SCREEN_LEVEL_FLOOR", 50)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            provider,
            screening: ScreeningDefaults {
                default_tier,
                level_ceiling,
                level_floor,
            },
        })
    }
}

fn parse_level(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidLevelBound { var }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Upstream match-statistics provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub account_region: String,
    pub platform_region: String,
}

impl ProviderConfig {
    /// The key is optional at load time so commands that never reach the
    /// provider (and tests) do not require credentials.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Caller-side screening defaults applied when a request omits them.
#[derive(Debug, Clone)]
pub struct ScreeningDefaults {
    pub default_tier: SkillTier,
    pub level_ceiling: u32,
    pub level_floor: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTier { value: String },
    InvalidLevelBound { var: &'static str },
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTier { value } => {
                write!(
                    f,
                    "SCREEN_DEFAULT_TIER '{value}' is not one of beginner/intermediate/advanced"
                )
            }
            ConfigError::InvalidLevelBound { var } => {
                write!(f, "{var} must be a non-negative integer")
            }
            ConfigError::MissingApiKey => write!(f, "RIOT_API_KEY is not set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
