use thiserror::Error;

/// Custom error type for Ledgerbot operations.
///
/// Pipeline stages (correction, extraction, dialogue, reply synthesis) are
/// total functions and never produce these; only I/O-touching collaborators
/// (platform, backend, key-value store) and startup configuration do.
#[derive(Debug, Error)]
pub enum LedgerbotError {
    /// Chat-platform call failed (posting, bot registration).
    #[error("Platform error: {0}")]
    Platform(String),

    /// ERP backend query failed (transport, decode, or missing field).
    #[error("Backend error: {0}")]
    Backend(String),

    /// Key-value collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Startup configuration is invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for LedgerbotError {
    fn from(err: std::io::Error) -> Self {
        LedgerbotError::Storage(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LedgerbotError {
    fn from(err: serde_json::Error) -> Self {
        LedgerbotError::Backend(format!("JSON decode error: {}", err))
    }
}

impl From<toml::de::Error> for LedgerbotError {
    fn from(err: toml::de::Error) -> Self {
        LedgerbotError::Config(format!("TOML parse error: {}", err))
    }
}
