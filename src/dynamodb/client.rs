use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    operation::{create_table::CreateTableOutput, query::QueryOutput, scan::ScanOutput},
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType, ReturnValue,
        ScalarAttributeType,
    },
    Client,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info};

use crate::dynamodb::{item::to_attribute, Item, Table};
use crate::store::{Document, DocumentStore, KeyCondition};

/// DynamoDB client wrapper for the operations the router needs.
///
/// # Operations
///
/// - **Get**: Retrieve an item by its primary key
/// - **Put**: Insert an item, replacing any item with the same key
/// - **Update**: `SET` a single attribute, creating the item when missing
/// - **Scan**: Read every item, optionally restricted by a projection
/// - **Query**: Retrieve items by partition key with an optional sort key bound
///
/// Scan and query follow `LastEvaluatedKey` until the result set is exhausted.
///
/// # Error Handling
///
/// Every method returns `anyhow::Result`; SDK errors are propagated unchanged
/// with the table name attached as context.
#[derive(Debug, Clone)]
pub struct DynamoDb {
    client: Client,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Verifies authentication by attempting to list tables.
    pub async fn check_auth(&self) -> Result<()> {
        self.client.list_tables().send().await.map_err(|e| {
            error!("Authentication failed: {}", e);
            anyhow!("Authentication failed")
        })?;
        info!("Authentication successful");
        Ok(())
    }

    // --- Table Operations ---

    /// Creates a table if it doesn't exist.
    pub async fn create_table_if_not_exists(
        &self,
        table: &Table,
    ) -> Result<Option<CreateTableOutput>> {
        if self.table_exists(table.name()).await? {
            info!("Table '{}' exists", table.name());
            return Ok(None);
        }

        let mut attribute_definitions = vec![AttributeDefinition::builder()
            .attribute_name(table.partition_key())
            .attribute_type(ScalarAttributeType::S)
            .build()?];

        let mut key_schema = vec![KeySchemaElement::builder()
            .attribute_name(table.partition_key())
            .key_type(KeyType::Hash)
            .build()?];

        if let Some(sort_key) = table.sort_key() {
            attribute_definitions.push(
                AttributeDefinition::builder()
                    .attribute_name(sort_key)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            );
            key_schema.push(
                KeySchemaElement::builder()
                    .attribute_name(sort_key)
                    .key_type(KeyType::Range)
                    .build()?,
            );
        }

        let output = self
            .client
            .create_table()
            .table_name(table.name())
            .billing_mode(BillingMode::PayPerRequest)
            .set_attribute_definitions(Some(attribute_definitions))
            .set_key_schema(Some(key_schema))
            .send()
            .await?;
        info!("Table '{}' created", table.name());
        Ok(Some(output))
    }

    /// Checks if a table exists, paging through every table in the account.
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let mut start_table_name = None;

        loop {
            let page = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start_table_name)
                .send()
                .await?;

            if page.table_names().iter().any(|name| name == table_name) {
                return Ok(true);
            }

            start_table_name = page.last_evaluated_table_name().map(str::to_string);

            if start_table_name.is_none() {
                return Ok(false);
            }
        }
    }

    // --- Item Operations ---

    /// Puts an item into a DynamoDB table.
    pub async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item.attributes))
            .send()
            .await
            .with_context(|| format!("put_item on '{table_name}'"))?;

        debug!("Item added to '{table_name}'");
        Ok(())
    }

    /// Gets an item from a DynamoDB table.
    pub async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>> {
        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key.attributes))
            .send()
            .await
            .with_context(|| format!("get_item on '{table_name}'"))?;

        Ok(response.item.map(Item::from))
    }

    /// Sets one attribute of an item and returns the updated attributes.
    ///
    /// The attribute name goes through an expression placeholder, so any
    /// caller-supplied name is safe to use.
    pub async fn update_attribute(
        &self,
        table_name: &str,
        key: Item,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<Item> {
        let response = self
            .client
            .update_item()
            .table_name(table_name)
            .set_key(Some(key.attributes))
            .update_expression("SET #attr = :val")
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_values(":val", value)
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .with_context(|| format!("update_item on '{table_name}'"))?;

        debug!("Item updated in '{table_name}'");
        Ok(response.attributes.map(Item::from).unwrap_or_default())
    }

    // --- Query and Scan Operations ---

    /// Scans a table, returning only the projected attributes.
    ///
    /// An empty projection returns whole items.
    pub async fn scan_items(&self, table_name: &str, attributes: &[&str]) -> Result<Vec<Item>> {
        let names: HashMap<String, String> = attributes
            .iter()
            .enumerate()
            .map(|(i, name)| (format!("#p{i}"), name.to_string()))
            .collect();
        let projection = (0..attributes.len())
            .map(|i| format!("#p{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut items = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let mut scan = self.client.scan().table_name(table_name);

            if !attributes.is_empty() {
                scan = scan
                    .projection_expression(projection.clone())
                    .set_expression_attribute_names(Some(names.clone()));
            }

            if let Some(key) = last_evaluated_key {
                scan = scan.set_exclusive_start_key(Some(key));
            }

            let response: ScanOutput = scan
                .send()
                .await
                .with_context(|| format!("scan on '{table_name}'"))?;

            if let Some(new_items) = response.items {
                items.extend(new_items.into_iter().map(Item::from));
            }

            last_evaluated_key = response.last_evaluated_key;

            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(items)
    }

    /// Queries items by partition key, optionally bounding the sort key from below.
    pub async fn query_items(&self, table: &Table, condition: &KeyCondition) -> Result<Vec<Item>> {
        let mut key_condition_expression = String::from("#pk = :pkval");
        let mut expression_attribute_names =
            HashMap::from([("#pk".to_string(), table.partition_key().to_string())]);
        let mut expression_attribute_values = HashMap::from([(
            ":pkval".to_string(),
            AttributeValue::S(condition.partition_value.clone()),
        )]);

        if let Some(after) = &condition.sort_after {
            let sort_key = table
                .sort_key()
                .ok_or_else(|| anyhow!("Table '{}' has no sort key", table.name()))?;
            key_condition_expression.push_str(" AND #sk > :skval");
            expression_attribute_names.insert("#sk".to_string(), sort_key.to_string());
            expression_attribute_values
                .insert(":skval".to_string(), AttributeValue::S(after.clone()));
        }

        let mut items = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let mut query = self
                .client
                .query()
                .table_name(table.name())
                .key_condition_expression(key_condition_expression.clone())
                .set_expression_attribute_names(Some(expression_attribute_names.clone()))
                .set_expression_attribute_values(Some(expression_attribute_values.clone()));

            if let Some(key) = last_evaluated_key {
                query = query.set_exclusive_start_key(Some(key));
            }

            let response: QueryOutput = query
                .send()
                .await
                .with_context(|| format!("query on '{}'", table.name()))?;

            if let Some(new_items) = response.items {
                items.extend(new_items.into_iter().map(Item::from));
            }

            last_evaluated_key = response.last_evaluated_key;

            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl DocumentStore for DynamoDb {
    async fn get(&self, table: &Table, key: Document) -> Result<Option<Document>> {
        let item = self
            .get_item(table.name(), Item::from_document(key))
            .await?;
        Ok(item.map(Item::into_document))
    }

    async fn put(&self, table: &Table, document: Document) -> Result<()> {
        self.put_item(table.name(), Item::from_document(document))
            .await
    }

    async fn set_field(
        &self,
        table: &Table,
        key: Document,
        field: &str,
        value: Value,
    ) -> Result<Document> {
        let updated = self
            .update_attribute(
                table.name(),
                Item::from_document(key),
                field,
                to_attribute(value),
            )
            .await?;
        Ok(updated.into_document())
    }

    async fn scan_projected(&self, table: &Table, fields: &[&str]) -> Result<Vec<Document>> {
        let items = self.scan_items(table.name(), fields).await?;
        Ok(items.into_iter().map(Item::into_document).collect())
    }

    async fn query(&self, table: &Table, condition: &KeyCondition) -> Result<Vec<Document>> {
        let items = self.query_items(table, condition).await?;
        Ok(items.into_iter().map(Item::into_document).collect())
    }
}
