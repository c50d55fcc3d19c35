use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::grading::aggregate::ComponentMaximums;
use crate::grading::scale::ScaleMode;

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
    pub grading: GradingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            grading: GradingConfig::from_env()?,
        })
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Grading scale mode and component maximums.
#[derive(Debug, Clone, Default)]
pub struct GradingConfig {
    pub scale_mode: ScaleMode,
    pub maximums: ComponentMaximums,
}

impl GradingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let scale_mode = match env::var("GRADING_SCALE_MODE") {
            Ok(value) => {
                ScaleMode::parse(&value).ok_or(ConfigError::InvalidScaleMode { value })?
            }
            Err(_) => ScaleMode::default(),
        };

        let defaults = ComponentMaximums::default();
        let maximums = ComponentMaximums {
            classwork: maximum_from_env("GRADING_MAX_CLASSWORK", defaults.classwork)?,
            midterm: maximum_from_env("GRADING_MAX_MIDTERM", defaults.midterm)?,
            final_exam: maximum_from_env("GRADING_MAX_FINAL", defaults.final_exam)?,
            behavior: maximum_from_env("GRADING_MAX_BEHAVIOR", defaults.behavior)?,
        };

        Ok(Self {
            scale_mode,
            maximums,
        })
    }
}

/// Unset keeps the default; an empty value or `none` removes the component from grading.
fn maximum_from_env(key: &'static str, default: Option<f64>) -> Result<Option<f64>, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Some(value)),
        _ => Err(ConfigError::InvalidMaximum { key, value: raw }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScaleMode { value: String },
    InvalidMaximum { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScaleMode { value } => write!(
                f,
                "GRADING_SCALE_MODE must be 'lenient' or 'strict', got '{}'",
                value
            ),
            ConfigError::InvalidMaximum { key, value } => {
                write!(f, "{} must be a positive number or 'none', got '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidScaleMode { .. }
            | ConfigError::InvalidMaximum { .. } => None,
        }
    }
}
