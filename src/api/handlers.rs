//! Axum handlers for the consultation endpoint.
//!
//! Each handler only translates between HTTP and the framework-free
//! [`ConsultationService`]; all decisions happen in the service.

use crate::core::service::ConsultationService;
use crate::domain::model::{HandlerResponse, InboundSubmission, SubmissionResponse};
use crate::domain::ports::{ConfigProvider, EmailRelay};
use crate::utils::error::ConsultationError;
use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

pub type SharedService<R, C> = Arc<ConsultationService<R, C>>;

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Header text with non-UTF-8 bytes replaced; browsers may send Latin-1.
fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}

/// `POST /api/consultation`
pub async fn submit_consultation<R, C>(
    State(service): State<SharedService<R, C>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    R: EmailRelay + 'static,
    C: ConfigProvider + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Unreadable consultation body ({})", rejection.status());
            let err = ConsultationError::UnreadableBody {
                reason: rejection.body_text(),
            };
            return service.reject(&err).into_response();
        }
    };

    let user_agent = header_text(&headers, header::USER_AGENT.as_str());
    let forwarded_for = header_text(&headers, "x-forwarded-for");
    let submission = InboundSubmission {
        user_agent: user_agent.as_deref(),
        forwarded_for: forwarded_for.as_deref(),
        body: &body,
    };
    service.handle(submission).await.into_response()
}

/// Any method other than POST on the consultation route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(SubmissionResponse::rejected("Method not allowed")),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayStatus {
    pub has_key: bool,
    pub key_length: usize,
    pub message: String,
}

/// `GET /api/relay-status`: whether the access key is visible to the server.
pub async fn relay_status<R, C>(State(service): State<SharedService<R, C>>) -> Json<RelayStatus>
where
    R: EmailRelay + 'static,
    C: ConfigProvider + 'static,
{
    let config = service.config();
    let key = config.access_key();
    let message = match key {
        Some(_) => format!("✅ {} is configured", config.access_key_var()),
        None => format!("❌ {} is NOT configured", config.access_key_var()),
    };
    Json(RelayStatus {
        has_key: key.is_some(),
        key_length: key.as_deref().map(str::len).unwrap_or(0),
        message,
    })
}

/// Converts a handler panic into the generic failure body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    let err = ConsultationError::Internal {
        message: format!("handler panicked: {}", detail),
    };
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        err,
        err.category(),
        err.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());

    HandlerResponse {
        status: err.status_code(),
        body: SubmissionResponse::rejected(err.user_friendly_message()),
    }
    .into_response()
}
