//! Storage seams used by the handlers.
//!
//! Handlers never talk to the AWS SDKs directly. They receive a
//! [`DocumentStore`] for the three record tables and an [`ImageStore`] for
//! daycare pictures, both built once at cold start and shared across requests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::dynamodb::Table;

/// A schema-less record as it travels through the router.
pub type Document = Map<String, Value>;

/// Key condition for a query: equality on the partition key and an optional
/// strict lower bound on the sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    pub partition_value: String,
    pub sort_after: Option<String>,
}

impl KeyCondition {
    pub fn partition(value: impl Into<String>) -> Self {
        Self {
            partition_value: value.into(),
            sort_after: None,
        }
    }

    /// Only match items whose sort key compares strictly greater than `value`.
    pub fn sort_after(mut self, value: impl Into<String>) -> Self {
        self.sort_after = Some(value.into());
        self
    }
}

/// Key-value/document store holding users, daycares and bookings.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point lookup by full primary key.
    async fn get(&self, table: &Table, key: Document) -> Result<Option<Document>>;

    /// Inserts the document, overwriting any item with the same primary key.
    async fn put(&self, table: &Table, document: Document) -> Result<()>;

    /// Sets a single top-level field, creating the item if it does not exist.
    /// Returns the attributes as they are after the update.
    async fn set_field(
        &self,
        table: &Table,
        key: Document,
        field: &str,
        value: Value,
    ) -> Result<Document>;

    /// Reads every item, restricted to the named fields.
    async fn scan_projected(&self, table: &Table, fields: &[&str]) -> Result<Vec<Document>>;

    /// Reads the items matching a key condition.
    async fn query(&self, table: &Table, condition: &KeyCondition) -> Result<Vec<Document>>;
}

/// Blob store holding daycare images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Lists object keys starting with `prefix`, in the order the store returns them.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}
