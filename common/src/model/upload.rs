use serde::{Deserialize, Serialize};

use super::analytics::Analytics;
use super::category::Category;
use super::recommendation::{ModelId, RecommendationMap};

/// Diagnostic metadata about the columns the backend detected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default)]
    pub customers_headers: Option<Vec<String>>,
    #[serde(default)]
    pub products_headers: Option<Vec<String>>,
    #[serde(default)]
    pub interactions_headers: Option<Vec<String>>,
    #[serde(default)]
    pub columns_auto_created: Option<String>,
}

impl DebugInfo {
    pub fn headers(&self, category: Category) -> Option<&[String]> {
        match category {
            Category::Customers => self.customers_headers.as_deref(),
            Category::Products => self.products_headers.as_deref(),
            Category::Interactions => self.interactions_headers.as_deref(),
        }
    }
}

/// Everything a successful upload produced.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSuccess {
    pub message: String,
    pub debug_info: Option<DebugInfo>,
    pub analytics: Option<Analytics>,
    pub recommendations: RecommendationMap,
    pub model_id: Option<ModelId>,
}

/// Lifecycle of the single upload a session can have in flight.
///
/// Results only exist inside `Succeeded`, so starting a new submission drops
/// them together with the state it leaves.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
    Succeeded(UploadSuccess),
    Failed(String),
}

impl UploadState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadState::InFlight)
    }

    pub fn success(&self) -> Option<&UploadSuccess> {
        match self {
            UploadState::Succeeded(success) => Some(success),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UploadState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
