//! Client-held variant catalog and option selection.
//!
//! The catalog is parsed once from the JSON the product page embeds:
//!
//! ```json
//! [{"id": 7, "sku": "WIG-18-BLK", "price": "45000.00", "sale_price": null,
//!   "stock": 3, "length": "18", "color": "black"}]
//! ```
//!
//! Every key other than the fixed fields is an option axis.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::money::lenient_decimal;

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variant {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    /// Compare-at price shown struck through as "Was ...".
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sale_price: Option<Decimal>,
    /// A variant without a stock figure is treated as sold out.
    #[serde(default)]
    pub stock: i64,
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl Variant {
    /// The option value as the string the pills carry.
    ///
    /// Strings are returned as-is; numbers, booleans and `null` use their
    /// JSON text (`18`, `true`, `null`).
    #[must_use]
    pub fn option_text(&self, name: &str) -> Option<String> {
        self.options.get(name).map(value_text)
    }

    /// `true` if every selected option equals this variant's value.
    #[must_use]
    pub fn matches(&self, selection: &SelectionState) -> bool {
        selection
            .iter()
            .all(|(name, value)| self.option_text(name).as_deref() == Some(value))
    }

    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// SKU, ignoring an empty string.
    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|sku| !sku.is_empty())
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Option values picked so far, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    chosen: BTreeMap<String, String>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `option` to `value`, replacing any earlier pick for that option.
    pub fn select(&mut self, option: &str, value: &str) {
        self.chosen.insert(option.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.chosen.get(option).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.chosen.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }
}

/// How strictly a selection must cover the catalog's options to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// First variant agreeing with every selected option. An empty selection
    /// matches the first variant.
    #[default]
    Partial,
    /// As `Partial`, but no match until every catalog option has been picked.
    RequireComplete,
}

/// Ordered, immutable list of a product's variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantCatalog {
    variants: Vec<Variant>,
}

impl VariantCatalog {
    #[must_use]
    pub fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    /// Parses the embedded variants array.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPageData`] if the JSON is not an array of
    /// variant objects.
    pub fn parse(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str::<Vec<Variant>>(json)
            .map(Self::new)
            .map_err(|source| CoreError::InvalidPageData {
                context: "variants data".to_string(),
                source,
            })
    }

    /// Parses the embedded variants array, falling back to an empty catalog.
    ///
    /// A broken payload must not take the product page down; the server
    /// still validates the add-to-cart request.
    #[must_use]
    pub fn from_embedded_json(json: &str) -> Self {
        match Self::parse(json) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!(%error, "variants data unparseable, using empty catalog");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }

    /// Option names with at least one non-blank value somewhere in the catalog.
    #[must_use]
    pub fn option_names(&self) -> BTreeSet<&str> {
        self.variants
            .iter()
            .flat_map(|variant| variant.options.iter())
            .filter(|(_, value)| !is_blank(value))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Finds the first variant, in catalog order, matching `selection`.
    #[must_use]
    pub fn resolve(&self, selection: &SelectionState, policy: MatchPolicy) -> Option<&Variant> {
        if policy == MatchPolicy::RequireComplete
            && self
                .option_names()
                .iter()
                .any(|name| selection.get(name).is_none())
        {
            return None;
        }
        self.variants.iter().find(|variant| variant.matches(selection))
    }
}

#[cfg(test)]
#[path = "variants_test.rs"]
mod tests;
