//! Checkout delivery model: the chosen method, the shipping region and the
//! last resolved shipping quote.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::{format_naira, required_decimal};

/// Which branch of the checkout form is active.
///
/// Mirrors the checked `delivery_method` radio button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Deliver,
    Pickup,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Deliver => write!(f, "deliver"),
            DeliveryMethod::Pickup => write!(f, "pickup"),
        }
    }
}

impl FromStr for DeliveryMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "deliver" => Ok(DeliveryMethod::Deliver),
            "pickup" => Ok(DeliveryMethod::Pickup),
            other => Err(CoreError::InvalidDeliveryMethod(other.to_string())),
        }
    }
}

/// A resolved shipping price and its carrier label, e.g. `{6000, "Nationwide Delivery"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub price: Decimal,
    pub label: String,
}

impl ShippingQuote {
    /// The fixed quote for in-store pickup.
    #[must_use]
    pub fn pickup() -> Self {
        Self {
            price: Decimal::ZERO,
            label: "Pickup".to_string(),
        }
    }

    /// Summary line shown to the shopper, e.g. `"Express – ₦1,500"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!("{} – {}", self.label, format_naira(self.price))
    }
}

/// Delivery state for one checkout page.
///
/// The fields are private so the invariant holds: pickup always carries the
/// pickup quote and no region, and a delivery without a region has no quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryState {
    method: DeliveryMethod,
    region: Option<String>,
    shipping: Option<ShippingQuote>,
}

impl DeliveryState {
    #[must_use]
    pub fn new(method: DeliveryMethod) -> Self {
        let mut state = Self {
            method,
            region: None,
            shipping: None,
        };
        state.select_method(method);
        state
    }

    #[must_use]
    pub fn method(&self) -> DeliveryMethod {
        self.method
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The last resolved quote; `None` means "to be calculated".
    #[must_use]
    pub fn shipping(&self) -> Option<&ShippingQuote> {
        self.shipping.as_ref()
    }

    /// Switches branch. Both directions drop the region and any delivery quote.
    pub fn select_method(&mut self, method: DeliveryMethod) {
        self.method = method;
        self.region = None;
        self.shipping = match method {
            DeliveryMethod::Pickup => Some(ShippingQuote::pickup()),
            DeliveryMethod::Deliver => None,
        };
    }

    /// Records a region pick and returns `true` when a shipping lookup is needed.
    ///
    /// Ignored under pickup. An empty region clears the quote.
    pub fn set_region(&mut self, region: &str) -> bool {
        if self.method != DeliveryMethod::Deliver {
            return false;
        }
        self.shipping = None;
        if region.is_empty() {
            self.region = None;
            false
        } else {
            self.region = Some(region.to_string());
            true
        }
    }

    /// Stores `quote` if it was fetched for the current region.
    ///
    /// Returns `false` (and changes nothing) when the method or region has
    /// moved on since the lookup started.
    pub fn apply_quote(&mut self, region: &str, quote: ShippingQuote) -> bool {
        if self.method != DeliveryMethod::Deliver || self.region.as_deref() != Some(region) {
            return false;
        }
        self.shipping = Some(quote);
        true
    }

    /// Forgets the delivery quote, e.g. after the server reports the region unavailable.
    pub fn clear_quote(&mut self) {
        if self.method == DeliveryMethod::Deliver {
            self.shipping = None;
        }
    }
}

impl Default for DeliveryState {
    fn default() -> Self {
        Self::new(DeliveryMethod::default())
    }
}

/// Configuration object the server embeds in the checkout page.
///
/// ```json
/// { "subtotal": "10000.00", "delivery_method": "deliver" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutPageData {
    #[serde(deserialize_with = "required_decimal")]
    pub subtotal: Decimal,
    #[serde(default)]
    pub delivery_method: Option<DeliveryMethod>,
}

impl CheckoutPageData {
    /// Parses the embedded JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPageData`] if the JSON is malformed or the
    /// subtotal is missing or non-numeric.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(|source| CoreError::InvalidPageData {
            context: "checkout page data".to_string(),
            source,
        })
    }
}
