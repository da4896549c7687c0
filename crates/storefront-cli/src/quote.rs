//! `quote` command: one shipping lookup rendered through a headless checkout.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use storefront_core::{CheckoutPageData, DeliveryMethod, StorefrontConfig};
use storefront_page::{CheckoutElements, DeliveryResolver, Element, MemoryElement};
use storefront_shipping::ShippingClient;

/// Nodes whose contents the command prints; the rest are write-only.
struct Summary {
    shipping_text: Arc<MemoryElement>,
    grand_total: Arc<MemoryElement>,
    shipping_price: Arc<MemoryElement>,
    shipping_label: Arc<MemoryElement>,
}

fn headless_checkout(subtotal: Decimal) -> (CheckoutElements, Summary) {
    let node = || Arc::new(MemoryElement::new());
    let summary = Summary {
        shipping_text: node(),
        grand_total: node(),
        shipping_price: node(),
        shipping_label: node(),
    };
    let elements = CheckoutElements {
        delivery_method: Arc::new(MemoryElement::with_value("deliver")),
        address_group: node(),
        city_group: node(),
        region_group: node(),
        address_input: node(),
        city_input: node(),
        region_input: node(),
        store_selector: node(),
        shipping_text: summary.shipping_text.clone(),
        grand_total: summary.grand_total.clone(),
        subtotal_text: Arc::new(MemoryElement::with_text(&storefront_core::format_naira(
            subtotal,
        ))),
        shipping_price: summary.shipping_price.clone(),
        shipping_label: summary.shipping_label.clone(),
        place_order: node(),
    };
    (elements, summary)
}

/// Fetch the quote for `region` and print the checkout summary it produces.
///
/// # Errors
///
/// Returns an error if the shipping client cannot be built or no quote could
/// be applied (unavailable region, transport failure, timeout).
pub(crate) async fn run_quote(
    config: &StorefrontConfig,
    region: &str,
    subtotal: Decimal,
) -> anyhow::Result<()> {
    let client = ShippingClient::from_config(config)?;
    let (elements, summary) = headless_checkout(subtotal);
    let page = CheckoutPageData {
        subtotal,
        delivery_method: Some(DeliveryMethod::Deliver),
    };
    let resolver = DeliveryResolver::new(elements, &page, client)
        .with_timeout(Duration::from_secs(config.shipping_timeout_secs));
    resolver.init();
    resolver.on_region_changed(region).await;

    println!("shipping:       {}", summary.shipping_text.text());
    println!("grand total:    {}", summary.grand_total.text());
    println!("shipping_price: {}", summary.shipping_price.value());
    println!("shipping_label: {}", summary.shipping_label.value());

    if resolver.state().shipping().is_none() {
        anyhow::bail!("no shipping quote applied for region '{region}'");
    }
    Ok(())
}
