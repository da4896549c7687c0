/// Settings for talking to the storefront backend.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Origin serving `/api/get_local_shipping/`, e.g. `https://shop.example.ng`.
    pub base_url: String,
    /// Upper bound on a single shipping-rate lookup.
    pub shipping_timeout_secs: u64,
    pub user_agent: String,
}
