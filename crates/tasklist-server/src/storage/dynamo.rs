//! DynamoDB task store

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::time::Duration;
use tasklist_core::{Result, StoreError, Task, TaskStore};
use tracing::{debug, info};

/// Region the table lives in
pub const REGION: &str = "us-east-1";

const READ_CAPACITY_UNITS: i64 = 5;
const WRITE_CAPACITY_UNITS: i64 = 5;

#[cfg(not(test))]
const TABLE_POLL_INTERVAL: Duration = Duration::from_secs(2);
#[cfg(not(test))]
const TABLE_POLL_ATTEMPTS: u32 = 60;

#[cfg(test)]
const TABLE_POLL_INTERVAL: Duration = Duration::ZERO;
#[cfg(test)]
const TABLE_POLL_ATTEMPTS: u32 = 3;

type Item = HashMap<String, AttributeValue>;

pub struct DynamoTaskStore {
    client: Client,
    table_name: String,
}

impl DynamoTaskStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the default AWS provider chain, pinned to [`REGION`]
    pub async fn connect(table_name: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(REGION))
            .load()
            .await;

        Self::new(Client::new(&sdk_config), table_name)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn create_table(&self) -> Result<()> {
        info!("Creating DynamoDB table {}", self.table_name);

        let key_schema = KeySchemaElement::builder()
            .attribute_name("id")
            .key_type(KeyType::Hash)
            .build()
            .map_err(StoreError::backend)?;
        let attribute = AttributeDefinition::builder()
            .attribute_name("id")
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(StoreError::backend)?;
        let throughput = ProvisionedThroughput::builder()
            .read_capacity_units(READ_CAPACITY_UNITS)
            .write_capacity_units(WRITE_CAPACITY_UNITS)
            .build()
            .map_err(StoreError::backend)?;

        self.client
            .create_table()
            .table_name(&self.table_name)
            .key_schema(key_schema)
            .attribute_definitions(attribute)
            .provisioned_throughput(throughput)
            .send()
            .await
            .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

        self.wait_until_active().await
    }

    async fn wait_until_active(&self) -> Result<()> {
        for attempt in 1..=TABLE_POLL_ATTEMPTS {
            let output = self
                .client
                .describe_table()
                .table_name(&self.table_name)
                .send()
                .await
                .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

            let status = output.table().and_then(|t| t.table_status());
            if status == Some(&TableStatus::Active) {
                info!("Table {} is active", self.table_name);
                return Ok(());
            }

            debug!(
                "Table {} not ready yet (attempt {}/{}, status {:?})",
                self.table_name, attempt, TABLE_POLL_ATTEMPTS, status
            );
            tokio::time::sleep(TABLE_POLL_INTERVAL).await;
        }

        Err(StoreError::TableNotReady(self.table_name.clone()))
    }
}

#[async_trait]
impl TaskStore for DynamoTaskStore {
    async fn ensure_table(&self) -> Result<()> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(_) => {
                debug!("Table {} exists", self.table_name);
                Ok(())
            }
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_resource_not_found_exception())
                    .unwrap_or(false);
                if !missing {
                    return Err(StoreError::backend(aws_sdk_dynamodb::Error::from(err)));
                }
                self.create_table().await
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

            for item in output.items() {
                tasks.push(item_to_task(item)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(tasks)
    }

    async fn get(&self, id: &str) -> Result<Option<Task>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

        output.item().map(item_to_task).transpose()
    }

    async fn put(&self, task: &Task) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(task_to_item(task)))
            .send()
            .await
            .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::backend(aws_sdk_dynamodb::Error::from(e)))?;

        Ok(())
    }
}

fn task_to_item(task: &Task) -> Item {
    let mut item = HashMap::new();
    item.insert("id".to_string(), AttributeValue::S(task.id.clone()));
    item.insert(
        "content".to_string(),
        AttributeValue::S(task.content.clone()),
    );
    item.insert(
        "created_at".to_string(),
        AttributeValue::S(task.created_at.clone()),
    );
    if let Some(complete) = task.complete {
        item.insert(
            "complete".to_string(),
            AttributeValue::N(complete.to_string()),
        );
    }
    item
}

fn item_to_task(item: &Item) -> Result<Task> {
    let id = string_attr(item, "id")?
        .ok_or_else(|| StoreError::Malformed("item has no id".to_string()))?;
    let content = string_attr(item, "content")?.unwrap_or_default();
    let created_at = string_attr(item, "created_at")?.unwrap_or_default();

    let complete = match item.get("complete") {
        None | Some(AttributeValue::Null(_)) => None,
        Some(AttributeValue::N(n)) => Some(n.parse::<i64>().map_err(|_| {
            StoreError::Malformed(format!("task {}: complete is not an integer: {}", id, n))
        })?),
        Some(other) => {
            return Err(StoreError::Malformed(format!(
                "task {}: complete has unexpected type {:?}",
                id, other
            )))
        }
    };

    Ok(Task {
        id,
        content,
        created_at,
        complete,
    })
}

fn string_attr(item: &Item, name: &str) -> Result<Option<String>> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StoreError::Malformed(format!(
            "attribute {} is not a string: {:?}",
            name, other
        ))),
    }
}
