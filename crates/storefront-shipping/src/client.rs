//! HTTP client for the storefront's local shipping endpoint.
//!
//! Wraps `reqwest` with the endpoint's quirks: the body is JSON whatever the
//! HTTP status (a missing state is answered with `400 {"error": ...}`), and
//! the price may be a number or a decimal string.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use storefront_core::{ShippingQuote, StorefrontConfig};

use crate::error::ShippingError;
use crate::types::ShippingResponse;

const SHIPPING_PATH: &str = "api/get_local_shipping/";

/// Source of shipping quotes for a region.
///
/// [`ShippingClient`] is the production implementation; resolvers are
/// generic over this trait so they can be driven by in-process fakes.
pub trait ShippingRates {
    /// Looks up the local shipping rate for `region`.
    fn quote(
        &self,
        region: &str,
    ) -> impl Future<Output = Result<ShippingQuote, ShippingError>> + Send;
}

/// Client for `GET /api/get_local_shipping/?state={region}`.
pub struct ShippingClient {
    client: Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl ShippingClient {
    /// Creates a client rooted at `base_url` (the storefront origin).
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShippingError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ShippingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash keeps `join` appending below any path prefix
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SHIPPING_PATH))
            .map_err(|e| ShippingError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout_secs,
        })
    }

    /// Creates a client from the environment-derived storefront settings.
    ///
    /// # Errors
    ///
    /// See [`ShippingClient::new`].
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ShippingError> {
        Self::new(
            &config.base_url,
            config.shipping_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the shipping quote for `region`.
    ///
    /// # Errors
    ///
    /// - [`ShippingError::Unavailable`] if the server answers with an `error` field.
    /// - [`ShippingError::Timeout`] if the request exceeds the client timeout.
    /// - [`ShippingError::Http`] on any other transport failure.
    /// - [`ShippingError::Deserialize`] if the body is not a shipping payload.
    pub async fn get_local_shipping(&self, region: &str) -> Result<ShippingQuote, ShippingError> {
        let url = self.build_url(region);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        let payload: ShippingResponse =
            serde_json::from_str(&body).map_err(|source| ShippingError::Deserialize {
                context: format!("{url} (HTTP {status})"),
                source,
            })?;
        let quote = payload.into_quote()?;

        tracing::debug!(region, price = %quote.price, label = %quote.label, "shipping quote received");
        Ok(quote)
    }

    fn build_url(&self, region: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("state", region);
        url
    }

    fn classify(&self, error: reqwest::Error) -> ShippingError {
        if error.is_timeout() {
            ShippingError::Timeout(Duration::from_secs(self.timeout_secs))
        } else {
            ShippingError::Http(error)
        }
    }
}

impl ShippingRates for ShippingClient {
    fn quote(
        &self,
        region: &str,
    ) -> impl Future<Output = Result<ShippingQuote, ShippingError>> + Send {
        self.get_local_shipping(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ShippingClient {
        ShippingClient::new(base_url, 10, "storefront-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_shipping_endpoint() {
        let client = test_client("https://shop.example.ng");
        let url = client.build_url("Lagos");
        assert_eq!(
            url.as_str(),
            "https://shop.example.ng/api/get_local_shipping/?state=Lagos"
        );
    }

    #[test]
    fn build_url_strips_trailing_slashes() {
        let client = test_client("https://shop.example.ng//");
        let url = client.build_url("Rivers");
        assert_eq!(
            url.as_str(),
            "https://shop.example.ng/api/get_local_shipping/?state=Rivers"
        );
    }

    #[test]
    fn build_url_keeps_path_prefix() {
        let client = test_client("https://example.ng/shop");
        let url = client.build_url("Oyo");
        assert_eq!(
            url.as_str(),
            "https://example.ng/shop/api/get_local_shipping/?state=Oyo"
        );
    }

    #[test]
    fn build_url_encodes_region() {
        let client = test_client("https://shop.example.ng");
        let url = client.build_url("Cross River & Co");
        assert!(
            url.as_str().ends_with("state=Cross+River+%26+Co"),
            "region should be percent-encoded: {url}"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = ShippingClient::new("not a url", 10, "storefront-test/0.1");
        assert!(matches!(result, Err(ShippingError::InvalidBaseUrl { .. })));
    }
}
