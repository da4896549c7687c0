//! Product-page variant resolver.

use std::sync::{Mutex, MutexGuard, PoisonError};

use storefront_core::{format_naira, MatchPolicy, SelectionState, Variant, VariantCatalog};

use crate::dom::Handle;

pub const SELECT_OPTIONS_PROMPT: &str = "Please select product options";
pub const MISSING_VARIANT_MESSAGE: &str = "Please select all product options before adding to cart.";
const OUT_OF_STOCK: &str = "Out of stock";

/// A clickable option value, e.g. `color = black`.
pub struct VariantPill {
    pub option: String,
    pub value: String,
    pub element: Handle,
}

/// Nodes of the product page touched by [`VariantResolver`].
pub struct ProductElements {
    pub price_display: Handle,
    pub compare_price: Handle,
    pub meta: Handle,
    /// Hidden `variant_id` input of the add-to-cart form.
    pub variant_id: Handle,
    pub add_to_cart: Handle,
    pub pills: Vec<VariantPill>,
}

/// Outcome of an add-to-cart attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    /// Submission cancelled; show the message to the shopper.
    Blocked(&'static str),
    /// The add-to-cart control is disabled, so nothing happens.
    Ignored,
}

pub struct VariantResolver {
    elements: ProductElements,
    catalog: VariantCatalog,
    policy: MatchPolicy,
    selection: Mutex<SelectionState>,
}

impl VariantResolver {
    #[must_use]
    pub fn new(elements: ProductElements, catalog: VariantCatalog) -> Self {
        Self {
            elements,
            catalog,
            policy: MatchPolicy::default(),
            selection: Mutex::new(SelectionState::new()),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.lock_selection().clone()
    }

    /// Handles a pill click: activates it among its siblings, records the
    /// pick and re-resolves.
    pub fn on_option_picked(&self, option: &str, value: &str) -> Option<&Variant> {
        for pill in self.elements.pills.iter().filter(|p| p.option == option) {
            pill.element.set_active(pill.value == value);
        }
        self.lock_selection().select(option, value);
        self.resolve_variant()
    }

    /// Finds the variant for the current selection and refreshes price,
    /// compare price, metadata, the hidden `variant_id` and add-to-cart.
    pub fn resolve_variant(&self) -> Option<&Variant> {
        let found = {
            let selection = self.lock_selection();
            self.catalog.resolve(&selection, self.policy)
        };
        match found {
            Some(variant) => self.show_variant(variant),
            None => self.show_no_match(),
        }
        found
    }

    /// Gate on the add-to-cart form. The server still validates whatever
    /// gets through.
    #[must_use]
    pub fn guard_submit(&self) -> SubmitDecision {
        if !self.catalog.is_empty() && self.elements.variant_id.value().is_empty() {
            tracing::debug!("add to cart blocked, no variant resolved");
            return SubmitDecision::Blocked(MISSING_VARIANT_MESSAGE);
        }
        SubmitDecision::Proceed
    }

    /// The sticky call-to-action clicks the add-to-cart button.
    #[must_use]
    pub fn on_sticky_add(&self) -> SubmitDecision {
        if self.elements.add_to_cart.is_disabled() {
            return SubmitDecision::Ignored;
        }
        self.guard_submit()
    }

    fn show_variant(&self, variant: &Variant) {
        let e = &self.elements;
        e.variant_id.set_value(&variant.id.to_string());
        if let Some(price) = variant.price {
            e.price_display.set_text(&format_naira(price));
        }
        match variant.sale_price {
            Some(compare) => {
                e.compare_price.set_text(&format!("Was {}", format_naira(compare)));
                e.compare_price.set_visible(true);
            }
            None => e.compare_price.set_visible(false),
        }

        let mut meta = variant
            .sku()
            .map(|sku| format!("SKU: {sku}"))
            .unwrap_or_default();
        if variant.is_in_stock() {
            e.add_to_cart.set_disabled(false);
        } else {
            e.add_to_cart.set_disabled(true);
            if !meta.is_empty() {
                meta.push_str(" • ");
            }
            meta.push_str(OUT_OF_STOCK);
        }
        e.meta.set_text(&meta);
    }

    fn show_no_match(&self) {
        let e = &self.elements;
        e.variant_id.set_value("");
        e.compare_price.set_visible(false);
        e.meta.set_text(SELECT_OPTIONS_PROMPT);
        e.add_to_cart.set_disabled(true);
    }

    fn lock_selection(&self) -> MutexGuard<'_, SelectionState> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
