//! API Gateway (v2) event adaptation.
//!
//! Lets the same pipeline run behind a Lambda function URL or HTTP API
//! trigger: the event's body, header map, and base64 flag map onto
//! [`IntakeRequest`], and [`IntakeResponse`] maps back onto the event
//! response shape.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use bytes::Bytes;
use std::collections::HashMap;

use crate::handler::{IntakeRequest, IntakeResponse};

impl From<ApiGatewayV2httpRequest> for IntakeRequest {
    fn from(event: ApiGatewayV2httpRequest) -> Self {
        let mut headers = HashMap::new();
        for (name, value) in event.headers.iter() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }

        Self {
            body: event.body.map(Bytes::from).unwrap_or_default(),
            headers,
            is_base64_encoded: event.is_base64_encoded,
        }
    }
}

impl From<IntakeResponse> for ApiGatewayV2httpResponse {
    fn from(resp: IntakeResponse) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        ApiGatewayV2httpResponse {
            status_code: i64::from(resp.status.as_u16()),
            headers,
            multi_value_headers: http::HeaderMap::new(),
            body: Some(Body::Text(resp.body)),
            is_base64_encoded: false,
            cookies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn request_fields_map_onto_the_intake_shape() {
        let mut event = ApiGatewayV2httpRequest {
            body: Some("dGV4dD1kZXBsb3k=".to_string()),
            is_base64_encoded: true,
            ..Default::default()
        };
        event.headers.insert(
            "x-slack-signature",
            http::HeaderValue::from_static("v0=abc"),
        );
        event.headers.insert(
            "x-slack-request-timestamp",
            http::HeaderValue::from_static("1700000000"),
        );

        let req = IntakeRequest::from(event);
        assert_eq!(&req.body[..], b"dGV4dD1kZXBsb3k=");
        assert!(req.is_base64_encoded);
        assert_eq!(req.headers["x-slack-signature"], "v0=abc");
        assert_eq!(req.headers["x-slack-request-timestamp"], "1700000000");
    }

    #[test]
    fn missing_body_becomes_empty_bytes() {
        let event = ApiGatewayV2httpRequest::default();
        let req = IntakeRequest::from(event);
        assert!(req.body.is_empty());
        assert!(!req.is_base64_encoded);
    }

    #[test]
    fn response_maps_onto_the_event_shape() {
        let resp = IntakeResponse::text(StatusCode::UNAUTHORIZED, "Invalid request signature");
        let out = ApiGatewayV2httpResponse::from(resp);

        assert_eq!(out.status_code, 401);
        assert_eq!(
            out.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(!out.is_base64_encoded);
        match out.body {
            Some(Body::Text(body)) => {
                assert_eq!(body, r#"{"text":"Invalid request signature"}"#)
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
