//! Durable record store.
//!
//! The store is the only suspension point in the pipeline. The handler waits
//! for the insert acknowledgment (or failure) before responding, since the
//! caller-visible contract depends on knowing whether persistence succeeded.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::record::PendingRecord;

#[async_trait]
/// Abstract record store to allow unit-testing the pipeline without AWS.
pub trait RecordStore: Send + Sync {
    /// Insert a freshly created record.
    ///
    /// This is a single unconditional insert keyed by the record's id; ids
    /// are generated fresh per invocation, so key collisions are not a
    /// designed failure mode. No read, update, or query operations exist.
    async fn insert(&self, record: &PendingRecord) -> anyhow::Result<()>;
}

/// AWS SDK implementation of [`RecordStore`] backed by one DynamoDB table.
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoRecordStore {
    /// Create a store using standard AWS credential resolution.
    pub async fn new(table: impl Into<String>, region: Option<String>) -> anyhow::Result<Self> {
        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let cfg = loader.load().await;
        Ok(Self {
            client: aws_sdk_dynamodb::Client::new(&cfg),
            table: table.into(),
        })
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn insert(&self, record: &PendingRecord) -> anyhow::Result<()> {
        let mut put = self
            .client
            .put_item()
            .table_name(&self.table)
            .item("request_id", AttributeValue::S(record.request_id.clone()))
            .item(
                "status",
                AttributeValue::S(record.status.as_str().to_string()),
            )
            .item("created_at", AttributeValue::N(record.created_at.to_string()))
            .item(
                "created_at_readable",
                AttributeValue::S(record.created_at_readable.clone()),
            )
            .item(
                "is_enterprise_install",
                AttributeValue::Bool(record.is_enterprise_install),
            );

        let optional = [
            ("api_app_id", &record.api_app_id),
            ("channel_id", &record.channel_id),
            ("channel_name", &record.channel_name),
            ("command", &record.command),
            ("response_url", &record.response_url),
            ("team_domain", &record.team_domain),
            ("team_id", &record.team_id),
            ("text", &record.text),
            ("trigger_id", &record.trigger_id),
            ("user_id", &record.user_id),
            ("user_name", &record.user_name),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                put = put.item(name, AttributeValue::S(value.clone()));
            }
        }

        put.send().await?;
        Ok(())
    }
}
