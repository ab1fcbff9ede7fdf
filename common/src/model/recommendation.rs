use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder the backend uses for customers without an address.
pub const NO_EMAIL: &str = "No Email Provided";

/// Rewards recommended for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRewards {
    pub email: String,
    #[serde(default)]
    pub rewards: Vec<String>,
}

impl CustomerRewards {
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty() && self.email != NO_EMAIL
    }
}

/// Customer id -> rewards. Kept sorted by customer id so that rendering and
/// exports are stable for the same content.
pub type RecommendationMap = BTreeMap<String, CustomerRewards>;

/// Opaque handle naming a trained model, needed to send a campaign later.
pub type ModelId = String;

/// Counters shown above the recommendation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendationSummary {
    pub total_customers: usize,
    pub customers_with_email: usize,
    pub total_rewards: usize,
}

impl RecommendationSummary {
    pub fn of(map: &RecommendationMap) -> Self {
        map.values().fold(Self::default(), |mut summary, customer| {
            summary.total_customers += 1;
            if customer.has_email() {
                summary.customers_with_email += 1;
            }
            summary.total_rewards += customer.rewards.len();
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_customers_emails_and_rewards() {
        let mut map = RecommendationMap::new();
        map.insert(
            "1".into(),
            CustomerRewards {
                email: "a@example.com".into(),
                rewards: vec!["10% off P1 <A>".into(), "5% off P2 <B>".into()],
            },
        );
        map.insert(
            "2".into(),
            CustomerRewards {
                email: NO_EMAIL.into(),
                rewards: vec!["20% off P3 <C>".into()],
            },
        );
        map.insert(
            "3".into(),
            CustomerRewards {
                email: String::new(),
                rewards: vec![],
            },
        );

        assert_eq!(
            RecommendationSummary::of(&map),
            RecommendationSummary {
                total_customers: 3,
                customers_with_email: 1,
                total_rewards: 3,
            }
        );
    }
}
