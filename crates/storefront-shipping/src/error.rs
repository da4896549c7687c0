use std::time::Duration;

use thiserror::Error;

/// Errors returned by a shipping-rate lookup.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `{"error": ...}` for this region.
    #[error("shipping unavailable: {0}")]
    Unavailable(String),

    /// The response body was not a shipping payload.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The lookup did not settle within the client-side bound.
    #[error("shipping lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ShippingError {
    /// `true` for a semantic refusal from the server, as opposed to a
    /// transport or decoding failure.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ShippingError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_keeps_sub_second_precision() {
        let err = ShippingError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "shipping lookup timed out after 250ms");
        assert_eq!(
            ShippingError::Timeout(Duration::from_secs(10)).to_string(),
            "shipping lookup timed out after 10s"
        );
    }
}
