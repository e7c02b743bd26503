//! `slash-intake` is a signed slash-command intake endpoint.
//!
//! It authenticates Slack-style `v0` signed requests, converts each accepted
//! command into a durable `pending` work item, and replies immediately so the
//! calling platform's own request timeout is never exceeded. Processing of the
//! recorded command belongs to a downstream worker; this service never
//! updates a record after creating it.
//!
//! Core modules:
//! - [`config`]: environment configuration
//! - [`verify`]: `v0` HMAC-SHA256 signature verification
//! - [`decode`]: base64 unwrap + form body decoding
//! - [`record`]: pending record assembly and acknowledgment text
//! - [`store`]: durable record store (DynamoDB)
//! - [`handler`]: the per-request pipeline with injected collaborators
//! - [`event`]: API Gateway (v2) event adaptation
//! - [`server`]: axum server wiring

pub mod config;
pub mod decode;
pub mod event;
pub mod handler;
pub mod record;
pub mod server;
pub mod store;
pub mod verify;
