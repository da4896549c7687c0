pub mod app_config;
pub mod config;
pub mod delivery;
pub mod error;
pub mod money;
pub mod variants;

pub use app_config::StorefrontConfig;
pub use config::{load_config, load_config_from_env, load_log_level};
pub use delivery::{CheckoutPageData, DeliveryMethod, DeliveryState, ShippingQuote};
pub use error::{ConfigError, CoreError};
pub use money::{format_naira, parse_decimal, CURRENCY_GLYPH};
pub use variants::{MatchPolicy, SelectionState, Variant, VariantCatalog};
