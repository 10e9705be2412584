use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_LMSTUDIO_MODEL: &str = "llama-3.2-3b-instruct";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Which of the two services a process is running as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    ResumeParser,
    CoverLetter,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Service::ResumeParser => "resume-parser",
            Service::CoverLetter => "cover-letter",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Service::ResumeParser => 8000,
            Service::CoverLetter => 8003,
        }
    }

    fn default_log_file(self) -> &'static str {
        match self {
            Service::ResumeParser => "resume_parser.log",
            Service::CoverLetter => "cover_letter_ai.log",
        }
    }
}

/// Connection settings for the model provider backing a service.
#[derive(Clone)]
pub enum ProviderConfig {
    Gemini { api_key: String, model: String },
    LmStudio { host: String, model: String },
}

impl ProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::Gemini { .. } => "gemini",
            ProviderConfig::LmStudio { .. } => "lmstudio",
        }
    }
}

// Hand-written so the API key never reaches a log line or error message.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Gemini { model, .. } => f
                .debug_struct("Gemini")
                .field("api_key", &"[redacted]")
                .field("model", model)
                .finish(),
            ProviderConfig::LmStudio { host, model } => f
                .debug_struct("LmStudio")
                .field("host", host)
                .field("model", model)
                .finish(),
        }
    }
}

/// CORS policy. `Any` mirrors the wide-open `*` the services have always shipped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// Service configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub service: Service,
    pub provider: ProviderConfig,
    /// Loaded for parity with the frontend deployment; not used for CORS.
    pub frontend_url: Option<String>,
    pub cors_origins: CorsOrigins,
    pub port: u16,
    pub log_file: PathBuf,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env(service: Service) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(service, |key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(service: Service, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let provider = match service {
            Service::ResumeParser => ProviderConfig::Gemini {
                api_key: require("GEMINI_API_KEY")?,
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
            Service::CoverLetter => ProviderConfig::LmStudio {
                host: require("SERVER_API_HOST")?,
                model: get("LMSTUDIO_MODEL")
                    .unwrap_or_else(|| DEFAULT_LMSTUDIO_MODEL.to_string()),
            },
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => service.default_port(),
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "MAX_UPLOAD_BYTES",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Config {
            service,
            provider,
            frontend_url: get("FRONTEND_URL"),
            cors_origins: parse_cors_origins(get("CORS_ALLOW_ORIGINS").as_deref()),
            port,
            log_file: get("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(service.default_log_file())),
            max_upload_bytes,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_cors_origins(raw: Option<&str>) -> CorsOrigins {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
