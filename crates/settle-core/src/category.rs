//! Named category predicates over secondary records.
//!
//! A [`CategorySet`] is validated once at construction. Invalid sets are a
//! caller mistake and surface as [`CategoryError`], aborting the aggregation
//! rather than silently producing zero counts.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CategoryError;
use crate::records::SecondaryRecord;

/// Condition a secondary record must satisfy to count toward a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `record[field] == value`. A missing field never matches.
    Equals { field: String, value: Value },
    /// `record[field] != value`. A missing field never matches.
    NotEquals { field: String, value: Value },
    /// The field is present and not `null`.
    Present { field: String },
}

impl Predicate {
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::NotEquals { field, .. } | Self::Present { field } => {
                field
            }
        }
    }

    /// Evaluate against one record.
    #[must_use]
    pub fn matches(&self, record: &SecondaryRecord) -> bool {
        match self {
            Self::Equals { field, value } => record.attribute(field) == Some(value),
            Self::NotEquals { field, value } => {
                record.attribute(field).is_some_and(|found| found != value)
            }
            Self::Present { field } => record.attribute(field).is_some_and(|v| !v.is_null()),
        }
    }
}

/// A named predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    pub name: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

/// A validated, ordered set of uniquely named categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Validate and build a category set.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] when the set is empty, a name is blank or
    /// repeated, or a predicate names no field.
    pub fn new(categories: Vec<Category>) -> Result<Self, CategoryError> {
        if categories.is_empty() {
            return Err(CategoryError::Empty);
        }

        let mut seen = HashSet::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(CategoryError::EmptyName { position });
            }
            if !seen.insert(category.name.as_str()) {
                return Err(CategoryError::DuplicateName {
                    name: category.name.clone(),
                });
            }
            if category.predicate.field().trim().is_empty() {
                return Err(CategoryError::EmptyField {
                    name: category.name.clone(),
                });
            }
        }

        Ok(Self { categories })
    }

    /// The `completed` / `pending` split over a boolean `completed` field.
    #[must_use]
    pub fn completion() -> Self {
        Self {
            categories: vec![
                Category::new("completed", Predicate::equals("completed", true)),
                Category::new("pending", Predicate::equals("completed", false)),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
