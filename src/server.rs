//! axum server wiring.
//!
//! The server exposes:
//! - `/healthz` and `/readyz`
//! - `POST /slack/command`, the signed slash-command intake endpoint

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::{
    config::Config,
    handler::{Intake, IntakeRequest, IntakeResponse, SystemClock},
    store::DynamoRecordStore,
    verify::SignatureVerifier,
};

/// Form bodies for slash commands are tiny; anything larger is rejected.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    intake: Arc<Intake>,
}

fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/readyz", get(|| async { "ok" }))
        .route("/slack/command", post(handle_command))
        .with_state(state)
}

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let store = Arc::new(DynamoRecordStore::new(cfg.table_name.clone(), cfg.aws_region.clone()).await?);
    let intake = Arc::new(Intake::new(
        SignatureVerifier::new(cfg.signing_secret.clone()),
        store,
        Arc::new(SystemClock),
    ));

    let app = build_app(AppState { intake });

    let listener = tokio::net::TcpListener::bind(cfg.listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_command(
    State(state): State<AppState>,
    req: Request<Body>,
) -> axum::response::Response {
    let (parts, body) = req.into_parts();

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(_) => {
            return IntakeResponse::text(StatusCode::PAYLOAD_TOO_LARGE, "payload too large")
                .into_response()
        }
    };

    let mut headers = HashMap::new();
    for (name, value) in parts.headers.iter() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.as_str().to_string(), v.to_string());
        }
    }

    // Direct HTTP delivery is never base64-wrapped; the flag exists for API
    // Gateway style triggers (see `crate::event`).
    let req = IntakeRequest {
        body,
        headers,
        is_base64_encoded: false,
    };

    state.intake.handle(req).await.into_response()
}
