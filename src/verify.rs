//! `v0` request signature verification.
//!
//! The counterparty signs `"v0:{timestamp}:{body}"` with HMAC-SHA256 and
//! sends the result as `v0={lowercase_hex}` alongside the signing timestamp.
//! Verification recomputes the signature with the shared secret and compares
//! in constant time, after bounding the replay window.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";
pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";

/// Maximum allowed skew (seconds) between the claimed signing time and local
/// time. A captured request cannot be replayed once outside this window.
pub const REPLAY_WINDOW_SECS: i64 = 300;

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Signature or timestamp header missing (or the timestamp is not a
    /// number). No cryptographic work happens in this case.
    #[error("missing_credentials")]
    MissingCredentials,
    /// Timestamp outside the replay window.
    #[error("stale_timestamp")]
    StaleTimestamp,
    /// Recomputed signature does not match the claimed one.
    #[error("signature_mismatch")]
    SignatureMismatch,
}

#[derive(Clone)]
/// Verifies inbound request signatures against the shared signing secret.
///
/// The secret is injected at construction; there is no "verifier disabled"
/// mode. A deployment without a secret must fail at startup instead (see
/// [`crate::config::Config`]).
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Authenticate a request given its headers, the decoded body, and the
    /// current UNIX time in seconds.
    ///
    /// Returns `Ok(())` only if both the freshness check and the signature
    /// comparison pass.
    pub fn verify(
        &self,
        headers: &HashMap<String, String>,
        body: &str,
        now_unix: i64,
    ) -> Result<(), RejectReason> {
        let signature =
            header_value(headers, SIGNATURE_HEADER).ok_or(RejectReason::MissingCredentials)?;
        let timestamp =
            header_value(headers, TIMESTAMP_HEADER).ok_or(RejectReason::MissingCredentials)?;

        let claimed: i64 = timestamp
            .parse()
            .map_err(|_| RejectReason::MissingCredentials)?;
        if (now_unix - claimed).abs() > REPLAY_WINDOW_SECS {
            return Err(RejectReason::StaleTimestamp);
        }

        let expected = sign(&self.secret, timestamp, body);

        // A length difference is a safe rejection before the constant-time
        // routine: the expected length is public (always 67 bytes), so it
        // leaks nothing about the signature content.
        if expected.len() != signature.len() {
            return Err(RejectReason::SignatureMismatch);
        }
        if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
            Ok(())
        } else {
            Err(RejectReason::SignatureMismatch)
        }
    }
}

/// Compute the `v0=` signature for a timestamp/body pair.
///
/// Exposed so tests (and outbound callers) can produce valid signatures.
pub fn sign(secret: &str, timestamp: &str, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(format!("v0:{timestamp}:{body}").as_bytes());
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

/// Header lookup tolerating exact-case and all-lowercase names; trigger
/// adapters normalize case inconsistently.
fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| headers.get(&name.to_ascii_lowercase()))
        .map(String::as_str)
}
