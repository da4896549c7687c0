//! Naira amounts: lenient decoding of server values and display formatting.
//!
//! All arithmetic stays in [`Decimal`]. Formatting is only applied to text
//! shown to the shopper; hidden form fields carry the decimal as received.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Currency glyph prefixed to every displayed amount.
pub const CURRENCY_GLYPH: &str = "₦";

/// Renders `amount` as shown in the checkout summary, e.g. `"₦11,500"`.
///
/// At most two fractional digits are kept (half away from zero) and trailing
/// fractional zeros are dropped, so `1500.50` renders as `"₦1,500.5"`.
#[must_use]
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + CURRENCY_GLYPH.len() + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(CURRENCY_GLYPH);
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Decodes a JSON number or numeric string into a [`Decimal`].
///
/// The storefront serialises decimals as strings (`"6000.00"`) in some
/// payloads and as numbers in others. `null`, empty strings and
/// non-numeric text yield `None`.
#[must_use]
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal_text(&number.to_string()),
        Value::String(text) => parse_decimal_text(text.trim()),
        _ => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// `deserialize_with` helper for optional decimal fields using [`parse_decimal`].
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_decimal))
}

/// `deserialize_with` helper for decimal fields that must be present.
pub(crate) fn required_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_decimal(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a decimal amount, got {value}")))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    #[test]
    fn formats_whole_amounts_with_grouping() {
        assert_eq!(format_naira(dec("11500")), "₦11,500");
        assert_eq!(format_naira(dec("1234567")), "₦1,234,567");
        assert_eq!(format_naira(dec("999")), "₦999");
    }

    #[test]
    fn formats_zero_without_sign_or_fraction() {
        assert_eq!(format_naira(Decimal::ZERO), "₦0");
        assert_eq!(format_naira(dec("0.00")), "₦0");
    }

    #[test]
    fn drops_trailing_fraction_zeros() {
        assert_eq!(format_naira(dec("6000.00")), "₦6,000");
        assert_eq!(format_naira(dec("1500.50")), "₦1,500.5");
        assert_eq!(format_naira(dec("1500.25")), "₦1,500.25");
    }

    #[test]
    fn rounds_to_two_places_half_away_from_zero() {
        assert_eq!(format_naira(dec("10.005")), "₦10.01");
        assert_eq!(format_naira(dec("10.004")), "₦10");
    }

    #[test]
    fn places_sign_before_glyph() {
        assert_eq!(format_naira(dec("-2500")), "-₦2,500");
    }

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_decimal(&json!(1500)), Some(dec("1500")));
        assert_eq!(parse_decimal(&json!("6000.00")), Some(dec("6000.00")));
        assert_eq!(parse_decimal(&json!(" 12.5 ")), Some(dec("12.5")));
        assert_eq!(parse_decimal(&json!(0.1)), Some(dec("0.1")));
    }

    #[test]
    fn rejects_null_empty_and_text() {
        assert_eq!(parse_decimal(&json!(null)), None);
        assert_eq!(parse_decimal(&json!("")), None);
        assert_eq!(parse_decimal(&json!("free")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
    }

    #[test]
    fn keeps_server_scale_for_hidden_fields() {
        let price = parse_decimal(&json!("6000.00")).unwrap();
        assert_eq!(price.to_string(), "6000.00");
    }
}
