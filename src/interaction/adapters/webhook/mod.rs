//! Platform webhook adapters.
//!
//! [`WebhookAdapter`] applies the HTTP-level gates every platform shares
//! (method, content type, body presence) before calling the router, then
//! maps the outcome to a status code and body. [`interaction_routes`] mounts
//! it on an `axum` router.

mod route;

pub use route::interaction_routes;

use std::sync::Arc;
use tracing::{error, warn};

use crate::interaction::adapters::Ed25519Verifier;
use crate::interaction::domain::InboundHeaders;
use crate::interaction::ports::SignatureVerifier;
use crate::interaction::services::InteractionRouter;

const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A platform request reduced to what the router needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    /// HTTP method.
    pub method: String,
    /// Request headers.
    pub headers: InboundHeaders,
    /// Raw body, `None` when the platform delivered none.
    pub body: Option<Vec<u8>>,
}

impl WebhookRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(method: impl Into<String>, headers: InboundHeaders, body: Option<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            headers,
            body,
        }
    }
}

/// A platform response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `content-type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl WebhookResponse {
    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    fn text(status: u16, reason: &str) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            body: reason.to_owned(),
        }
    }

    fn method_not_allowed() -> Self {
        Self::text(405, "Method Not Allowed")
    }

    fn bad_request() -> Self {
        Self::text(400, "Bad Request")
    }
}

/// Translates platform requests into router calls.
pub struct WebhookAdapter<V = Ed25519Verifier> {
    router: Arc<InteractionRouter<V>>,
}

impl<V> Clone for WebhookAdapter<V> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<V> WebhookAdapter<V>
where
    V: SignatureVerifier,
{
    /// Creates an adapter around `router`.
    #[must_use]
    pub const fn new(router: Arc<InteractionRouter<V>>) -> Self {
        Self { router }
    }

    /// Returns the wrapped router.
    #[must_use]
    pub const fn router(&self) -> &Arc<InteractionRouter<V>> {
        &self.router
    }

    /// Handles one platform request.
    ///
    /// Non-POST requests get 405. A `content-type` other than exactly
    /// `application/json`, or a missing body, gets 400 without reaching
    /// the router. Router failures map through
    /// [`InteractionError::status_code`] with a fixed reason phrase as the
    /// body.
    ///
    /// [`InteractionError::status_code`]: crate::interaction::services::InteractionError::status_code
    pub async fn handle(&self, request: WebhookRequest) -> WebhookResponse {
        if request.method != "POST" {
            return WebhookResponse::method_not_allowed();
        }
        if request.headers.get("content-type") != Some(JSON_CONTENT_TYPE) {
            return WebhookResponse::bad_request();
        }
        let Some(body) = request.body else {
            return WebhookResponse::bad_request();
        };

        match self.router.handle(&body, &request.headers).await {
            Ok(response) => match serde_json::to_string(&response) {
                Ok(json) => WebhookResponse::json(json),
                Err(err) => {
                    error!(error = %err, "failed to serialise interaction response");
                    WebhookResponse::text(500, "Internal Server Error")
                }
            },
            Err(err) => {
                let status = err.status_code();
                if status >= 500 {
                    error!(error = %err, status, "interaction failed");
                } else {
                    warn!(error = %err, status, "interaction rejected");
                }
                WebhookResponse::text(status, err.reason_phrase())
            }
        }
    }
}
