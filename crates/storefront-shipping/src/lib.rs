pub mod client;
pub mod error;
pub mod types;

pub use client::{ShippingClient, ShippingRates};
pub use error::ShippingError;
pub use types::ShippingResponse;
