use thiserror::Error;

/// Errors raised while decoding server-embedded page data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid delivery method: {0}")]
    InvalidDeliveryMethod(String),

    #[error("invalid page data for {context}: {source}")]
    InvalidPageData {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
