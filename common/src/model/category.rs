use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three dataset roles an operator can submit.
///
/// The lowercase name doubles as the JSON key of the upload body and as the
/// multipart field name, so the backend sees the same identifier under both
/// protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Customers,
    Products,
    Interactions,
}

impl Category {
    /// Every category, in the order the upload form lists them.
    pub const ALL: [Category; 3] = [
        Category::Customers,
        Category::Products,
        Category::Interactions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Customers => "customers",
            Category::Products => "products",
            Category::Interactions => "interactions",
        }
    }

    /// Human-readable label used by the view.
    pub fn label(self) -> &'static str {
        match self {
            Category::Customers => "Customers",
            Category::Products => "Products",
            Category::Interactions => "Interactions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
