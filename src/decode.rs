//! Payload decoding: base64 unwrap and form body parsing.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// The payload could not be decoded into a UTF-8 body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode the raw payload into the UTF-8 body the signature was computed
/// over, removing the base64 wrapping first when the trigger flagged it.
///
/// Decoding failure is a hard error, never a silent empty body.
pub fn decode_body(payload: &[u8], is_base64_encoded: bool) -> Result<String, DecodeError> {
    let bytes = if is_base64_encoded {
        STANDARD.decode(payload)?
    } else {
        payload.to_vec()
    };
    Ok(String::from_utf8(bytes)?)
}

/// Parse a URL-encoded form body into a flat field map.
///
/// `+` and percent-escapes are decoded; duplicate keys resolve
/// last-value-wins, matching standard form-decoding semantics. No field is
/// required here; validation belongs to the consumer.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
