//! HTTP route handlers.
//!
//! ```text
//! GET  /                  - Liveness check
//! POST /api/orders/upload - Order webhook: relay a paid order to the supplier
//! ```

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use skubridge_sync::orders::WebhookOrder;
use tracing::{error, info};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/api/orders/upload", post(upload_order))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Order webhook handler.
///
/// Shopify identifies the sending store via the `x-shopify-shop-domain`
/// header. Orders that are not yet paid are rejected; Shopify fires the
/// webhook again once payment settles.
async fn upload_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(order): Json<WebhookOrder>,
) -> (StatusCode, Json<Value>) {
    let Some(domain) = headers
        .get("x-shopify-shop-domain")
        .and_then(|value| value.to_str().ok())
    else {
        return reject("missing x-shopify-shop-domain header");
    };

    let Some(service) = state.service_by_domain(domain) else {
        return reject(&format!("no store configured for domain {domain}"));
    };

    if !order.is_paid() {
        return reject("order is not paid");
    }

    match service.relay_order(&order).await {
        Ok(_) => {
            info!(domain, order = %order.name, "order relayed to supplier");
            (StatusCode::OK, Json(json!({ "status": "success" })))
        }
        Err(err) => {
            error!(domain, order = %order.name, error = %err, "order relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": err.to_string() })),
            )
        }
    }
}

fn reject(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "status": "error", "message": message })),
    )
}
