//! Shared fixtures: an in-memory checkout page and a scripted rates source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use storefront_core::ShippingQuote;
use storefront_page::{CheckoutElements, Element, MemoryElement};
use storefront_shipping::{ShippingError, ShippingRates};

pub struct CheckoutPage {
    pub delivery_method: Arc<MemoryElement>,
    pub address_group: Arc<MemoryElement>,
    pub city_group: Arc<MemoryElement>,
    pub region_group: Arc<MemoryElement>,
    pub address_input: Arc<MemoryElement>,
    pub city_input: Arc<MemoryElement>,
    pub region_input: Arc<MemoryElement>,
    pub store_selector: Arc<MemoryElement>,
    pub shipping_text: Arc<MemoryElement>,
    pub grand_total: Arc<MemoryElement>,
    pub subtotal_text: Arc<MemoryElement>,
    pub shipping_price: Arc<MemoryElement>,
    pub shipping_label: Arc<MemoryElement>,
    pub place_order: Arc<MemoryElement>,
}

impl CheckoutPage {
    /// A page as the server renders it: `method` checked and the subtotal
    /// already formatted into the summary.
    pub fn new(method: &str, subtotal_text: &str) -> Self {
        let node = || Arc::new(MemoryElement::new());
        Self {
            delivery_method: Arc::new(MemoryElement::with_value(method)),
            address_group: node(),
            city_group: node(),
            region_group: node(),
            address_input: node(),
            city_input: node(),
            region_input: node(),
            store_selector: node(),
            shipping_text: node(),
            grand_total: Arc::new(MemoryElement::with_text(subtotal_text)),
            subtotal_text: Arc::new(MemoryElement::with_text(subtotal_text)),
            shipping_price: node(),
            shipping_label: node(),
            place_order: node(),
        }
    }

    pub fn elements(&self) -> CheckoutElements {
        CheckoutElements {
            delivery_method: self.delivery_method.clone(),
            address_group: self.address_group.clone(),
            city_group: self.city_group.clone(),
            region_group: self.region_group.clone(),
            address_input: self.address_input.clone(),
            city_input: self.city_input.clone(),
            region_input: self.region_input.clone(),
            store_selector: self.store_selector.clone(),
            shipping_text: self.shipping_text.clone(),
            grand_total: self.grand_total.clone(),
            subtotal_text: self.subtotal_text.clone(),
            shipping_price: self.shipping_price.clone(),
            shipping_label: self.shipping_label.clone(),
            place_order: self.place_order.clone(),
        }
    }

    pub fn check(&self, method: &str) {
        self.delivery_method.set_value(method);
    }

    pub fn address_groups_visible(&self) -> [bool; 3] {
        [
            self.address_group.is_visible(),
            self.city_group.is_visible(),
            self.region_group.is_visible(),
        ]
    }

    pub fn address_inputs_required(&self) -> [bool; 3] {
        [
            self.address_input.is_required(),
            self.city_input.is_required(),
            self.region_input.is_required(),
        ]
    }
}

#[derive(Clone)]
pub enum Reply {
    Quote(i64, &'static str),
    Unavailable(&'static str),
    Broken,
}

/// Answers each region with a fixed reply after a fixed delay.
#[derive(Default)]
pub struct ScriptedRates {
    replies: HashMap<String, (Duration, Reply)>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, region: &str, delay_ms: u64, reply: Reply) -> Self {
        self.replies
            .insert(region.to_string(), (Duration::from_millis(delay_ms), reply));
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ShippingRates for ScriptedRates {
    fn quote(
        &self,
        region: &str,
    ) -> impl Future<Output = Result<ShippingQuote, ShippingError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.replies.get(region).cloned();
        async move {
            let Some((delay, reply)) = scripted else {
                return Err(ShippingError::Unavailable("unscripted region".to_string()));
            };
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Quote(price, label) => Ok(ShippingQuote {
                    price: Decimal::from(price),
                    label: label.to_string(),
                }),
                Reply::Unavailable(message) => Err(ShippingError::Unavailable(message.to_string())),
                Reply::Broken => Err(ShippingError::Deserialize {
                    context: "scripted".to_string(),
                    source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
                }),
            }
        }
    }
}
