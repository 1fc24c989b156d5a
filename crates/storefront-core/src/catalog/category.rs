//! Category reference data.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A category label used to group items and populate filter tabs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display label; items reference categories by this label.
    pub name: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Whether `label` names this category.
    pub fn is_named(&self, label: &str) -> bool {
        self.name == label
    }
}
