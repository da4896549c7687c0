//! `resolve` command: replay option picks against a variants file.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use storefront_core::{MatchPolicy, VariantCatalog};
use storefront_page::{
    Element, MemoryElement, ProductElements, SubmitDecision, VariantPill, VariantResolver,
};

/// Print what the product page would show after `selections`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a variants array.
pub(crate) fn run_resolve(
    variants_path: &Path,
    selections: &[(String, String)],
    require_complete: bool,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(variants_path)
        .with_context(|| format!("reading {}", variants_path.display()))?;
    let catalog = VariantCatalog::parse(&raw)?;
    tracing::info!(
        variants = catalog.len(),
        options = ?catalog.option_names(),
        "catalog loaded"
    );

    let price_display = Arc::new(MemoryElement::new());
    let compare_price = Arc::new(MemoryElement::new());
    let meta = Arc::new(MemoryElement::new());
    let variant_id = Arc::new(MemoryElement::new());
    let add_to_cart = Arc::new(MemoryElement::new());
    let pills = selections
        .iter()
        .map(|(option, value)| VariantPill {
            option: option.clone(),
            value: value.clone(),
            element: Arc::new(MemoryElement::new()),
        })
        .collect();
    let elements = ProductElements {
        price_display: price_display.clone(),
        compare_price: compare_price.clone(),
        meta: meta.clone(),
        variant_id: variant_id.clone(),
        add_to_cart: add_to_cart.clone(),
        pills,
    };

    let policy = if require_complete {
        MatchPolicy::RequireComplete
    } else {
        MatchPolicy::Partial
    };
    let resolver = VariantResolver::new(elements, catalog).with_policy(policy);

    if selections.is_empty() {
        resolver.resolve_variant();
    }
    for (option, value) in selections {
        resolver.on_option_picked(option, value);
    }

    println!("variant_id:  {}", variant_id.value());
    println!("price:       {}", price_display.text());
    if compare_price.is_visible() {
        println!("compare:     {}", compare_price.text());
    }
    println!("meta:        {}", meta.text());
    println!(
        "add to cart: {}",
        if add_to_cart.is_disabled() { "disabled" } else { "enabled" }
    );
    match resolver.guard_submit() {
        SubmitDecision::Proceed => println!("submit:      allowed"),
        SubmitDecision::Blocked(message) => {
            println!("submit:      blocked ({message})");
        }
        SubmitDecision::Ignored => println!("submit:      ignored"),
    }
    Ok(())
}
