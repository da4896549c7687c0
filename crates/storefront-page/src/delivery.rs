//! Checkout delivery resolver.
//!
//! Keeps the address fields, store selector, shipping summary and the two
//! hidden shipping inputs consistent with the chosen delivery method and
//! region, fetching a shipping quote whenever a delivery region is picked.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rust_decimal::Decimal;
use storefront_core::{
    format_naira, CheckoutPageData, CoreError, DeliveryMethod, DeliveryState, ShippingQuote,
};
use storefront_shipping::{ShippingError, ShippingRates};

use crate::dom::Handle;
use crate::inflight::InFlight;

pub const DEFAULT_SHIPPING_TIMEOUT: Duration = Duration::from_secs(10);

pub const TO_BE_CALCULATED: &str = "To be calculated";
pub const SHIPPING_UNAVAILABLE: &str = "Shipping unavailable";
pub const SHIPPING_FETCH_FAILED: &str = "Error fetching shipping rate";

/// Nodes of the checkout form touched by [`DeliveryResolver`].
pub struct CheckoutElements {
    /// The `delivery_method` radio group; its value is the checked radio's.
    pub delivery_method: Handle,
    pub address_group: Handle,
    pub city_group: Handle,
    pub region_group: Handle,
    pub address_input: Handle,
    pub city_input: Handle,
    pub region_input: Handle,
    pub store_selector: Handle,
    pub shipping_text: Handle,
    pub grand_total: Handle,
    pub subtotal_text: Handle,
    /// Hidden `shipping_price` input.
    pub shipping_price: Handle,
    /// Hidden `shipping_label` input.
    pub shipping_label: Handle,
    pub place_order: Handle,
}

/// Resolves delivery method and shipping for one checkout page.
///
/// Every event takes a new generation number. A shipping response is only
/// applied while its generation is still the latest, so a slow reply for an
/// earlier region (or one arriving after a switch to pickup) is dropped.
pub struct DeliveryResolver<S> {
    elements: CheckoutElements,
    subtotal: Decimal,
    initial_method: Option<DeliveryMethod>,
    rates: S,
    timeout: Duration,
    state: Mutex<DeliveryState>,
    generation: AtomicU64,
    in_flight: InFlight,
}

impl<S: ShippingRates> DeliveryResolver<S> {
    #[must_use]
    pub fn new(elements: CheckoutElements, page: &CheckoutPageData, rates: S) -> Self {
        let in_flight = InFlight::new(elements.place_order.clone());
        Self {
            elements,
            subtotal: page.subtotal,
            initial_method: page.delivery_method,
            rates,
            timeout: DEFAULT_SHIPPING_TIMEOUT,
            state: Mutex::new(DeliveryState::default()),
            generation: AtomicU64::new(0),
            in_flight,
        }
    }

    /// Bounds each shipping lookup; expiry is reported like any fetch failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Document-ready synchronisation with the server-selected method.
    pub fn init(&self) {
        if let Some(method) = self.initial_method {
            self.elements.delivery_method.set_value(&method.to_string());
        }
        self.on_delivery_choice_changed();
    }

    #[must_use]
    pub fn state(&self) -> DeliveryState {
        self.lock_state().clone()
    }

    /// `true` while a shipping lookup is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Applies the checked delivery radio to the form.
    pub fn on_delivery_choice_changed(&self) {
        let method = self.checked_method();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock_state().select_method(method);

        let e = &self.elements;
        let deliver = method == DeliveryMethod::Deliver;
        for group in [&e.address_group, &e.city_group, &e.region_group] {
            group.set_visible(deliver);
        }
        for input in [&e.address_input, &e.city_input, &e.region_input] {
            input.set_required(deliver);
        }
        e.store_selector.set_visible(!deliver);

        if deliver {
            self.show_to_be_calculated();
        } else {
            let label = ShippingQuote::pickup().display_label();
            e.shipping_text.set_text(&label);
            e.grand_total.set_text(&format_naira(self.subtotal));
            e.shipping_price.set_value("0");
            e.shipping_label.set_value(&label);
        }
        tracing::debug!(%method, "delivery method applied");
    }

    /// Handles a pick in the region selector.
    ///
    /// Ignored unless delivering. An empty region resets the summary without
    /// a lookup; otherwise the quote is fetched and applied if still current.
    pub async fn on_region_changed(&self, region: &str) {
        if self.checked_method() != DeliveryMethod::Deliver {
            return;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let needs_lookup = self.lock_state().set_region(region);
        if !needs_lookup {
            self.show_to_be_calculated();
            return;
        }

        let result = {
            let _busy = self.in_flight.begin();
            match tokio::time::timeout(self.timeout, self.rates.quote(region)).await {
                Ok(result) => result,
                Err(_) => Err(ShippingError::Timeout(self.timeout)),
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(region, generation, "discarding stale shipping response");
            return;
        }

        match result {
            Ok(quote) => match self.subtotal.checked_add(quote.price) {
                Some(total) => self.apply_quote(region, quote, total),
                None => {
                    tracing::error!(region, price = %quote.price, "grand total overflowed");
                    self.elements.shipping_text.set_text(SHIPPING_FETCH_FAILED);
                }
            },
            Err(error) if error.is_unavailable() => {
                tracing::warn!(region, %error, "shipping unavailable for region");
                self.lock_state().clear_quote();
                self.show_to_be_calculated();
                self.elements.shipping_text.set_text(SHIPPING_UNAVAILABLE);
            }
            Err(error) => {
                tracing::error!(region, %error, "shipping fetch failed");
                self.elements.shipping_text.set_text(SHIPPING_FETCH_FAILED);
            }
        }
    }

    fn apply_quote(&self, region: &str, quote: ShippingQuote, total: Decimal) {
        let e = &self.elements;
        e.shipping_text.set_text(&quote.display_label());
        e.grand_total.set_text(&format_naira(total));
        e.shipping_price.set_value(&quote.price.to_string());
        e.shipping_label.set_value(&quote.label);
        tracing::debug!(region, price = %quote.price, "shipping quote applied");
        self.lock_state().apply_quote(region, quote);
    }

    fn show_to_be_calculated(&self) {
        let e = &self.elements;
        e.shipping_text.set_text(TO_BE_CALCULATED);
        e.grand_total.set_text(&e.subtotal_text.text());
        e.shipping_price.set_value("0");
        e.shipping_label.set_value("");
    }

    /// Anything other than `pickup` takes the delivery branch.
    fn checked_method(&self) -> DeliveryMethod {
        self.elements
            .delivery_method
            .value()
            .parse()
            .unwrap_or_else(|error: CoreError| {
                tracing::warn!(%error, "unrecognised delivery method, treating as delivery");
                DeliveryMethod::Deliver
            })
    }

    fn lock_state(&self) -> MutexGuard<'_, DeliveryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
