use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use contracts::shared::debug_log::AUTH_HEADER;

use crate::routes::AppState;

/// Compare without exiting on the first differing byte
fn token_matches(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Middleware that requires the `X-WP-Nonce` header to carry the configured token
pub async fn require_nonce(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !token_matches(provided, &state.token) {
        tracing::warn!("rejected {} {}: bad nonce", req.method(), req.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}
