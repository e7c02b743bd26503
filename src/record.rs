//! Pending work-item records.
//!
//! A [`PendingRecord`] is the unit of durable state: one uniquely identified
//! document per accepted request, created with status `pending` and never
//! mutated by this service. Lifecycle transitions belong to the downstream
//! worker.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Record lifecycle states. This service only ever writes [`Status::Pending`];
/// the remaining states are owned by the downstream worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Processing,
    Done,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Done => "done",
            Status::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Durable record for one accepted slash command.
pub struct PendingRecord {
    /// Freshly generated UUIDv4; primary key, never reused.
    pub request_id: String,
    pub status: Status,
    /// Creation instant as epoch milliseconds.
    pub created_at: i64,
    /// The same instant as RFC 3339. Derived from the identical clock read
    /// as `created_at`, so the two always describe one instant.
    pub created_at_readable: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub is_enterprise_install: bool,
    /// Callback URL for deferred responses to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Free-text command body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Interaction trigger identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl PendingRecord {
    /// Assemble a record from decoded command fields at the given instant.
    ///
    /// The id is generated fresh per call, so two requests with identical
    /// bodies still produce two distinct records. Boolean-like fields arrive
    /// as the literal string `"true"`/other and are normalized here, not in
    /// the decoder.
    pub fn assemble(fields: &HashMap<String, String>, created_at: DateTime<Utc>) -> Self {
        let take = |name: &str| fields.get(name).cloned();
        Self {
            request_id: Uuid::new_v4().to_string(),
            status: Status::Pending,
            created_at: created_at.timestamp_millis(),
            created_at_readable: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            api_app_id: take("api_app_id"),
            channel_id: take("channel_id"),
            channel_name: take("channel_name"),
            command: take("command"),
            is_enterprise_install: fields.get("is_enterprise_install").map(String::as_str)
                == Some("true"),
            response_url: take("response_url"),
            team_domain: take("team_domain"),
            team_id: take("team_id"),
            text: take("text"),
            trigger_id: take("trigger_id"),
            user_id: take("user_id"),
            user_name: take("user_name"),
        }
    }

    /// Synchronous acknowledgment shown to the requester. Pure; echoes the
    /// request id as a correlation token for follow-ups.
    pub fn ack_text(&self) -> String {
        let user = self.user_name.as_deref().unwrap_or("there");
        format!(
            "Hi *{user}*, your request was received and is being worked on. Request id: {}",
            self.request_id
        )
    }
}
