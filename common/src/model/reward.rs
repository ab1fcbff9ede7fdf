//! Structured view of a reward description.
//!
//! The backend describes each offer as free text such as
//! `"15% off SKU42 <ABC123>"`. [`parse_reward`] pulls the discount, the
//! product and the redemption code out of that text for display and export.
//! The three fields are extracted independently, and anything missing falls
//! back to a default, so the parser accepts arbitrary input. The original text
//! is always kept next to the parsed fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Product shown when the description names none.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

static DISCOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)% off").unwrap());
static PRODUCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"off ([A-Z0-9]+)").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^>]+)>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReward {
    pub discount_percent: u32,
    pub product_id: String,
    pub redemption_code: String,
    pub raw_text: String,
}

/// Parses a reward description. Never fails.
///
/// - `discount_percent`: ASCII digits right before `% off`, `0` when absent or too
///   large to represent.
/// - `product_id`: uppercase letters and digits right after `off `,
///   [`UNKNOWN_PRODUCT`] when absent.
/// - `redemption_code`: text between the first `<...>` pair, empty when absent.
pub fn parse_reward(text: &str) -> ParsedReward {
    let discount_percent = DISCOUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    let product_id = PRODUCT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNKNOWN_PRODUCT.to_string(), |m| m.as_str().to_string());

    let redemption_code = CODE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    ParsedReward {
        discount_percent,
        product_id,
        redemption_code,
        raw_text: text.to_string(),
    }
}
