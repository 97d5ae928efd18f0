use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::HOST},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chirp_config::HostPolicy;
use tracing::warn;

/// Rejects requests whose `Host` is not in `ALLOWED_HOSTS`.
pub async fn require_allowed_host(
    State(policy): State<Arc<HostPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())
        .map(str::to_owned);

    match host {
        Some(host) if policy.allows(&host) => next.run(request).await,
        other => {
            warn!(host = ?other, "rejected request for disallowed host");
            (StatusCode::BAD_REQUEST, "Bad Request (400)").into_response()
        }
    }
}
