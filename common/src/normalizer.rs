//! Turns the heterogeneous success payload into canonical results.
//!
//! Depending on the deployment, recommendations arrive under
//! `recommended_rewards.recommendations`, under a top-level `recommendations`
//! key, or as the payload itself. The candidates are tried in that order and
//! the first non-null object wins. Entries are converted leniently so that a
//! partially populated customer still shows up.

use log::debug;
use serde_json::{Map, Value};

use crate::model::analytics::Analytics;
use crate::model::recommendation::{CustomerRewards, ModelId, NO_EMAIL, RecommendationMap};

type Lookup = fn(&Value) -> Option<&Map<String, Value>>;

/// Candidate locations of the recommendation map, highest precedence first.
const RECOMMENDATION_LOOKUPS: [(&str, Lookup); 3] = [
    ("recommended_rewards.recommendations", nested_recommendations),
    ("recommendations", top_level_recommendations),
    ("payload", payload_as_map),
];

fn object_at<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

fn nested_recommendations(payload: &Value) -> Option<&Map<String, Value>> {
    payload
        .get("recommended_rewards")
        .and_then(|rewards| object_at(rewards, "recommendations"))
}

fn top_level_recommendations(payload: &Value) -> Option<&Map<String, Value>> {
    object_at(payload, "recommendations")
}

/// The payload itself, when it looks like `customer id -> record`.
fn payload_as_map(payload: &Value) -> Option<&Map<String, Value>> {
    payload
        .as_object()
        .filter(|map| map.values().all(Value::is_object))
}

/// Resolves the recommendation map, or an empty map when no candidate exists.
pub fn resolve_recommendations(payload: &Value) -> RecommendationMap {
    for (name, lookup) in RECOMMENDATION_LOOKUPS {
        if let Some(map) = lookup(payload) {
            debug!("recommendations resolved from {} ({} entries)", name, map.len());
            return map
                .iter()
                .filter_map(|(customer_id, record)| {
                    customer_rewards(record).map(|rewards| (customer_id.clone(), rewards))
                })
                .collect();
        }
    }
    debug!("no recommendations in payload");
    RecommendationMap::new()
}

fn customer_rewards(record: &Value) -> Option<CustomerRewards> {
    let record = record.as_object()?;
    let email = record
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| !email.is_empty())
        .unwrap_or(NO_EMAIL)
        .to_string();
    let rewards = record
        .get("rewards")
        .and_then(Value::as_array)
        .map(|rewards| {
            rewards
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(CustomerRewards { email, rewards })
}

/// Picks the part of an upload response the normalizer should look at:
/// `recommended_rewards` when present, otherwise the whole body.
pub fn recommendation_source(body: &Value) -> &Value {
    body.get("recommended_rewards")
        .filter(|v| !v.is_null())
        .unwrap_or(body)
}

/// Model id from `recommended_rewards.model_id`, else a top-level `model_id`.
pub fn resolve_model_id(body: &Value) -> Option<ModelId> {
    body.get("recommended_rewards")
        .and_then(|rewards| rewards.get("model_id"))
        .or_else(|| body.get("model_id"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Analytics pass through unmodified; a missing or null block stays absent.
pub fn resolve_analytics(body: &Value) -> Option<Analytics> {
    body.get("analytics")
        .filter(|v| !v.is_null())
        .cloned()
        .map(Analytics::new)
}
