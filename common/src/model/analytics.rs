//! Read-only access to the analytics block of an upload response.
//!
//! The client never recomputes analytics, it only renders what the backend
//! sent. [`Analytics`] therefore keeps the raw JSON and offers lookups that
//! tolerate missing or partially populated fields. Display helpers return
//! [`NOT_AVAILABLE`] instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;

/// Placeholder rendered for absent metrics.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Analytics(Value);

/// Best-selling or best-rated product as reported in `basic_stats`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopProduct {
    pub product_id: String,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub total_purchases: Option<u64>,
    pub average_rating: Option<f64>,
    pub rating_count: Option<u64>,
}

/// One row of the rating distribution chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBar {
    pub rating: String,
    pub count: u64,
    pub percent_of_max: u8,
}

impl Analytics {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// `true` when the block carries at least one field.
    pub fn has_content(&self) -> bool {
        self.0.as_object().is_some_and(|obj| !obj.is_empty())
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Whether the backend reports the category's dataset as loaded.
    pub fn data_loaded(&self, category: Category) -> bool {
        self.0
            .get("data_loaded")
            .and_then(|loaded| loaded.get(category.as_str()))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn basic_stats(&self) -> Option<&Value> {
        self.0.get("basic_stats").filter(|v| !v.is_null())
    }

    /// A value from `basic_stats`, treating null as absent.
    pub fn stat(&self, key: &str) -> Option<&Value> {
        self.basic_stats()
            .and_then(|stats| stats.get(key))
            .filter(|v| !v.is_null())
    }

    /// Renders a `basic_stats` entry, or [`NOT_AVAILABLE`] when it is absent,
    /// zero, false or empty.
    pub fn metric_text(&self, key: &str) -> String {
        self.stat(key)
            .filter(|v| is_present(v))
            .map(display_value)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Same as [`Analytics::metric_text`] with a `%` suffix on present values.
    pub fn percent_text(&self, key: &str) -> String {
        match self.stat(key).filter(|v| is_present(v)) {
            Some(value) => format!("{}%", display_value(value)),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn stat_u64(&self, key: &str) -> Option<u64> {
        self.stat(key).and_then(as_u64)
    }

    /// Rating -> number of ratings, sorted by rating key.
    pub fn rating_distribution(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .stat("rating_distribution")
            .and_then(Value::as_object)
            .map(|dist| {
                dist.iter()
                    .map(|(rating, count)| (rating.clone(), as_u64(count).unwrap_or(0)))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Distribution rows with each count scaled against the largest one
    /// (0..=100), for bar widths.
    pub fn rating_bars(&self) -> Vec<RatingBar> {
        let distribution = self.rating_distribution();
        let max = distribution.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
        distribution
            .into_iter()
            .map(|(rating, count)| RatingBar {
                percent_of_max: (count as f64 / max as f64 * 100.0).round() as u8,
                rating,
                count,
            })
            .collect()
    }

    pub fn top_sold_product(&self) -> Option<TopProduct> {
        self.stat("top_sold_product").and_then(top_product)
    }

    pub fn top_rated_product(&self) -> Option<TopProduct> {
        self.stat("top_rated_product").and_then(top_product)
    }
}

fn top_product(value: &Value) -> Option<TopProduct> {
    let product_id = value.get("product_id").filter(|v| is_present(v)).map(display_value)?;
    Some(TopProduct {
        product_id,
        category: value
            .get("category")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        price: value.get("price").and_then(Value::as_f64),
        total_purchases: value.get("total_purchases").and_then(as_u64),
        average_rating: value.get("average_rating").and_then(Value::as_f64),
        rating_count: value.get("rating_count").and_then(as_u64),
    })
}

fn as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Analytics {
        Analytics::new(json!({
            "data_loaded": { "customers": true, "products": false },
            "basic_stats": {
                "total_customers": 120,
                "average_purchases_per_user": 2.5,
                "retention_rate_percentage": 41.7,
                "unique_users": 0,
                "total_purchases": null,
                "rating_distribution": { "5": 10, "1": 2, "3": 4 },
                "top_sold_product": { "product_id": "P9", "total_purchases": 55, "price": 9.99 },
                "top_rated_product": { "average_rating": 4.8 }
            }
        }))
    }

    #[test]
    fn data_loaded_defaults_to_false() {
        let analytics = sample();
        assert!(analytics.data_loaded(Category::Customers));
        assert!(!analytics.data_loaded(Category::Products));
        assert!(!analytics.data_loaded(Category::Interactions));
    }

    #[test]
    fn missing_metrics_render_placeholder() {
        let analytics = sample();
        assert_eq!(analytics.metric_text("average_purchases_per_user"), "2.5");
        assert_eq!(analytics.percent_text("retention_rate_percentage"), "41.7%");
        assert_eq!(analytics.metric_text("unique_users"), NOT_AVAILABLE);
        assert_eq!(analytics.metric_text("total_purchases"), NOT_AVAILABLE);
        assert_eq!(analytics.metric_text("does_not_exist"), NOT_AVAILABLE);

        let empty = Analytics::new(json!({}));
        assert!(!empty.has_content());
        assert_eq!(empty.percent_text("retention_rate_percentage"), NOT_AVAILABLE);
        assert!(empty.rating_distribution().is_empty());
        assert!(empty.top_sold_product().is_none());
    }

    #[test]
    fn rating_distribution_is_sorted() {
        assert_eq!(
            sample().rating_distribution(),
            vec![("1".to_string(), 2), ("3".to_string(), 4), ("5".to_string(), 10)]
        );
    }

    #[test]
    fn rating_bars_scale_against_largest_count() {
        let bars = sample().rating_bars();
        let widths: Vec<(&str, u8)> = bars.iter().map(|b| (b.rating.as_str(), b.percent_of_max)).collect();
        assert_eq!(widths, vec![("1", 20), ("3", 40), ("5", 100)]);
    }

    #[test]
    fn rating_bars_survive_huge_counts() {
        let analytics = Analytics::new(json!({
            "basic_stats": { "rating_distribution": { "4": 1e300, "5": 3 } }
        }));
        let bars = analytics.rating_bars();
        assert_eq!(bars[0].count, u64::MAX);
        assert_eq!(bars[0].percent_of_max, 100);
        assert_eq!(bars[1].percent_of_max, 0);
    }

    #[test]
    fn top_products_require_an_id() {
        let analytics = sample();
        let sold = analytics.top_sold_product().unwrap();
        assert_eq!(sold.product_id, "P9");
        assert_eq!(sold.total_purchases, Some(55));
        assert_eq!(sold.price, Some(9.99));
        assert!(analytics.top_rated_product().is_none());
    }

    #[test]
    fn exposes_backend_error() {
        let analytics = Analytics::new(json!({ "error": "interactions missing user_id" }));
        assert_eq!(analytics.error(), Some("interactions missing user_id"));
    }
}
