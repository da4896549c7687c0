//! Payloads of `GET /api/get_local_shipping/`.

use serde::Deserialize;
use serde_json::Value;
use storefront_core::{parse_decimal, ShippingQuote};

use crate::error::ShippingError;

/// Either a rate or an error message; no other shape is accepted.
///
/// `price` arrives as a number or as a decimal string (`"6000.00"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShippingResponse {
    Failed { error: String },
    Rate { price: Value, label: String },
}

impl ShippingResponse {
    /// Converts the payload into a quote.
    ///
    /// # Errors
    ///
    /// - [`ShippingError::Unavailable`] for an `error` payload.
    /// - [`ShippingError::Deserialize`] if `price` is not numeric or is negative.
    pub fn into_quote(self) -> Result<ShippingQuote, ShippingError> {
        match self {
            ShippingResponse::Failed { error } => Err(ShippingError::Unavailable(error)),
            ShippingResponse::Rate { price, label } => {
                let amount = parse_decimal(&price).ok_or_else(|| ShippingError::Deserialize {
                    context: "shipping price".to_string(),
                    source: serde::de::Error::custom(format!("non-numeric price {price}")),
                })?;
                if amount.is_sign_negative() && !amount.is_zero() {
                    return Err(ShippingError::Deserialize {
                        context: "shipping price".to_string(),
                        source: serde::de::Error::custom(format!("negative price {amount}")),
                    });
                }
                Ok(ShippingQuote {
                    price: amount,
                    label,
                })
            }
        }
    }
}
