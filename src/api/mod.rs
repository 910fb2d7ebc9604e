//! Axum router for the consultation endpoint.

pub mod handlers;

use crate::core::service::ConsultationService;
use crate::domain::ports::{ConfigProvider, EmailRelay};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

pub const CONSULTATION_PATH: &str = "/api/consultation";
pub const RELAY_STATUS_PATH: &str = "/api/relay-status";

/// Largest consultation body read. Every field is capped at 1000 characters
/// after sanitizing, so real submissions stay far below this.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the application router around a shared service.
///
/// `expose_diagnostics` mounts [`RELAY_STATUS_PATH`]; leave it off in
/// production.
pub fn router<R, C>(service: Arc<ConsultationService<R, C>>, expose_diagnostics: bool) -> Router
where
    R: EmailRelay + 'static,
    C: ConfigProvider + 'static,
{
    let mut router = Router::new().route(
        CONSULTATION_PATH,
        post(handlers::submit_consultation::<R, C>).fallback(handlers::method_not_allowed),
    );

    if expose_diagnostics {
        router = router.route(RELAY_STATUS_PATH, get(handlers::relay_status::<R, C>));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .with_state(service)
}
