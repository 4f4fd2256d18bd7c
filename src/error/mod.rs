use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable held an unusable value
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Login or session check failed
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The app metadata file could not be read or parsed
    #[error("Metadata error: {message}")]
    Metadata { message: String },
}

/// Incident backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-2xx status; `message` is the response body
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The body did not have the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The request URL could not be built from the base URL
    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    /// No response within the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The backend answered with `success: false`
    #[error("{message}")]
    Reported { operation: String, message: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Login errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The view needs a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
