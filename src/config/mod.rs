use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the incident API lives
    pub backend: BackendConfig,
    /// Log level and format
    pub logging: LoggingConfig,
    /// HTTP request limits
    pub request: RequestConfig,
    /// Duplicate detection settings
    pub wizard: WizardConfig,
    /// Facts reported about the client
    pub client: ClientConfig,
}

/// Incident backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info`
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// How candidate descriptions are compared against existing incidents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityStrategy {
    /// Word-set overlap computed locally
    Lexical,
    /// Pairwise calls to the backend's compare endpoint
    Remote,
}

/// Duplicate detection settings for the chat widget
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Minimum score, inclusive, that counts as a duplicate
    pub duplicate_threshold: f64,
    /// How many recent incidents to scan
    pub recent_incident_limit: u32,
    /// Scoring strategy
    pub similarity: SimilarityStrategy,
}

/// Facts about the client environment the widget reports with each incident
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// App version sent as `u_version`
    pub version: String,
    /// Page URL sent as `u_page`
    pub page_url: String,
    /// User agent used for platform detection
    pub user_agent: String,
    /// JSON file shown on the metadata view
    pub metadata_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        let similarity = match env::var("SIMILARITY_STRATEGY")
            .unwrap_or_else(|_| "lexical".to_string())
            .to_lowercase()
            .as_str()
        {
            "lexical" => SimilarityStrategy::Lexical,
            "remote" => SimilarityStrategy::Remote,
            other => {
                return Err(AppError::Config {
                    message: format!(
                        "SIMILARITY_STRATEGY must be 'lexical' or 'remote', got '{}'",
                        other
                    ),
                })
            }
        };

        let wizard = WizardConfig {
            duplicate_threshold: env::var("DUPLICATE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|t| t.is_finite())
                .map(|t| t.clamp(0.0, 1.0))
                .unwrap_or(0.8),
            recent_incident_limit: env::var("RECENT_INCIDENT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            similarity,
        };

        let client = ClientConfig {
            version: env::var("APP_VERSION").unwrap_or_else(|_| "1.0.0".to_string()),
            page_url: env::var("PAGE_URL").unwrap_or_else(|_| "http://localhost:3000/".to_string()),
            user_agent: env::var("USER_AGENT").unwrap_or_default(),
            metadata_path: env::var("METADATA_PATH").ok().map(PathBuf::from),
        };

        Ok(Config {
            backend,
            logging,
            request,
            wizard,
            client,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.8,
            recent_incident_limit: 100,
            similarity: SimilarityStrategy::Lexical,
        }
    }
}
