//! The content store seam
//!
//! The persistence layer is an external collaborator; this crate only
//! shapes the `locale` filter it passes in. Entities are opaque
//! [`serde_json::Value`] objects.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Opaque store error. The fallback accessor propagates these unchanged,
/// so the caller always sees the store's own error.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Query shape accepted by [`ContentStore`] lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Field equality filters.
    pub filters: Map<String, Value>,
    /// Locale filter; `None` means no locale filtering.
    pub locale: Option<String>,
    /// Relations to populate.
    pub populate: Vec<String>,
    /// Sort expression, store-defined.
    pub sort: Option<String>,
    /// Maximum number of entities to return.
    pub limit: Option<u64>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field equality filter.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Set the locale filter.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Add a relation to populate.
    pub fn populate(mut self, relation: impl Into<String>) -> Self {
        self.populate.push(relation.into());
        self
    }

    /// Set the sort expression.
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Limit the result set size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Interface to the content store.
///
/// Implementations decide how filters, population, and sorting are
/// interpreted; the locale layer treats all of that as opaque.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Find all entities of `content_type` matching the query.
    async fn find_many(&self, content_type: &str, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Find a single entity by id.
    async fn find_one(
        &self,
        content_type: &str,
        id: u64,
        query: &Query,
    ) -> Result<Option<Value>, StoreError>;

    /// Create an entity from the given data.
    async fn create(&self, content_type: &str, data: Value) -> Result<Value, StoreError>;
}
