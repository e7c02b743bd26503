//! The per-request intake pipeline.
//!
//! Each invocation runs four stages in strict sequence: decode the payload,
//! verify the signature, persist a pending record, format the acknowledgment.
//! Every stage's input is passed forward explicitly; there is no shared
//! mutable state between invocations. Per invocation the flow is
//! `Received -> {Rejected | Decoded} -> {Persisted | PersistFailed} -> Responded`,
//! with exactly one terminal outcome.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::Serialize;

use crate::decode::{decode_body, parse_form};
use crate::record::PendingRecord;
use crate::store::RecordStore;
use crate::verify::SignatureVerifier;

/// Clock seam so freshness checks and record timestamps are testable with a
/// fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
/// Inbound request as delivered by a trigger adapter.
pub struct IntakeRequest {
    /// Raw payload bytes, possibly base64-wrapped (see the flag).
    pub body: Bytes,
    /// Header names are matched exact-case and all-lowercase.
    pub headers: HashMap<String, String>,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Synchronous reply returned to the caller.
pub struct IntakeResponse {
    pub status: StatusCode,
    /// JSON `{"text": ...}` body. `Content-Type: application/json` is set by
    /// the trigger adapters on every outcome.
    pub body: String,
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

impl IntakeResponse {
    /// Build a `{"text": ...}` response for the given status.
    pub fn text(status: StatusCode, text: &str) -> Self {
        let body = serde_json::to_string(&TextBody { text }).unwrap_or_else(|_| "{}".to_string());
        Self { status, body }
    }
}

impl axum::response::IntoResponse for IntakeResponse {
    fn into_response(self) -> axum::response::Response {
        let mut res = axum::response::Response::new(axum::body::Body::from(self.body));
        *res.status_mut() = self.status;
        res.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        res
    }
}

/// The intake pipeline with its injected collaborators.
pub struct Intake {
    verifier: SignatureVerifier,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl Intake {
    pub fn new(
        verifier: SignatureVerifier,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verifier,
            store,
            clock,
        }
    }

    /// Run the pipeline for one request.
    ///
    /// Zero durable records are created on rejection or decode failure, and
    /// a success response is never produced before the insert is
    /// acknowledged. Failure bodies never echo internal diagnostic detail.
    pub async fn handle(&self, req: IntakeRequest) -> IntakeResponse {
        // The signature is computed over the unwrapped body, so the base64
        // removal has to happen before verification can.
        let body = match decode_body(&req.body, req.is_base64_encoded) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(event = "decode_failed", error = %err, "malformed payload");
                return IntakeResponse::text(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                );
            }
        };

        // One clock read per invocation: the freshness check and the record
        // timestamps all describe the same instant.
        let now = self.clock.now();

        if let Err(reason) = self.verifier.verify(&req.headers, &body, now.timestamp()) {
            tracing::warn!(event = "request_rejected", reason = %reason, "signature verification failed");
            return IntakeResponse::text(StatusCode::UNAUTHORIZED, "Invalid request signature");
        }

        let fields = parse_form(&body);
        let record = PendingRecord::assemble(&fields, now);

        if let Err(err) = self.store.insert(&record).await {
            tracing::error!(
                event = "store_write_failed",
                request_id = %record.request_id,
                error = %err,
                "insert did not succeed"
            );
            return IntakeResponse::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }

        tracing::info!(
            event = "request_recorded",
            request_id = %record.request_id,
            command = record.command.as_deref().unwrap_or_default(),
            "pending record created"
        );
        IntakeResponse::text(StatusCode::OK, &record.ack_text())
    }
}
