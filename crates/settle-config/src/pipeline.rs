//! Pipeline endpoints, join key and categories.

use serde::{Deserialize, Serialize};
use settle_core::{Category, CategoryError, CategorySet, Predicate};

use crate::error::ConfigError;

fn default_primary_url() -> String {
    "https://jsonplaceholder.typicode.com/users".to_string()
}

fn default_secondary_url() -> String {
    "https://jsonplaceholder.typicode.com/todos".to_string()
}

fn default_foreign_key() -> String {
    "userId".to_string()
}

fn default_categories() -> Vec<Category> {
    vec![
        Category::new("completed", Predicate::equals("completed", true)),
        Category::new("pending", Predicate::equals("completed", false)),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Collection of owners (`{ id, name }` records).
    #[serde(default = "default_primary_url")]
    pub primary_url: String,

    /// Collection of owned records carrying `foreign_key`.
    #[serde(default = "default_secondary_url")]
    pub secondary_url: String,

    /// Field in each secondary record that holds the owner id.
    #[serde(default = "default_foreign_key")]
    pub foreign_key: String,

    /// Named predicates counted per owner.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// Abort on the first failed endpoint instead of reporting degraded counts.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            secondary_url: default_secondary_url(),
            foreign_key: default_foreign_key(),
            categories: default_categories(),
            fail_fast: false,
        }
    }
}

impl PipelineConfig {
    /// Check that both endpoints and the join key are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when an endpoint is blank and
    /// [`ConfigError::InvalidValue`] when the foreign key is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_url.trim().is_empty() || self.secondary_url.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "pipeline".to_string(),
            });
        }
        if self.foreign_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.foreign_key".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Build the validated category set.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] for empty, blank or duplicate categories.
    pub fn category_set(&self) -> Result<CategorySet, CategoryError> {
        CategorySet::new(self.categories.clone())
    }
}
