use thiserror::Error;

/// Crate-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur while
/// driving the wizard. They provide context and can be chained with anyhow.

/// Failure of a remote operation (analysis, draft store, billing).
///
/// This is the error shape the retry classifier operates on: variants carry
/// enough structure (HTTP status, domain code) for classification without
/// string matching, and `Other` falls back to message heuristics.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("network request failed: {0}")]
    Network(String),

    #[error("server returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("insufficient credits: {required} required, {remaining} remaining")]
    InsufficientCredits { required: u32, remaining: u32 },

    #[error("payment required")]
    PaymentRequired,

    #[error("rate limited by server")]
    RateLimited,

    #[error("operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,

    #[error("failed to read stored value for key: {key}")]
    Read {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write stored value for key: {key}")]
    Write {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to remove stored value for key: {key}")]
    Remove {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
