//! `axum` route for the webhook adapter.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use super::{WebhookAdapter, WebhookRequest};
use crate::interaction::domain::InboundHeaders;
use crate::interaction::ports::SignatureVerifier;

/// Mounts `adapter` at `path`.
///
/// Every method is routed to the adapter so it can answer 405 itself.
pub fn interaction_routes<V>(adapter: WebhookAdapter<V>, path: &str) -> Router
where
    V: SignatureVerifier + 'static,
{
    Router::new()
        .route(path, any(handle_webhook::<V>))
        .with_state(adapter)
}

async fn handle_webhook<V>(
    State(adapter): State<WebhookAdapter<V>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    V: SignatureVerifier + 'static,
{
    let inbound: InboundHeaders = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|text| (name.as_str(), text)))
        .collect();
    let raw_body = (!body.is_empty()).then(|| body.to_vec());
    let response = adapter
        .handle(WebhookRequest::new(method.as_str(), inbound, raw_body))
        .await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
        .into_response()
}
