use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use coursekit_auth::TokenVerifier;

use crate::app::errors;
use crate::context::SubjectContext;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Authenticate the request from its bearer token.
///
/// On success the verified subject is inserted into request extensions; any
/// failure to resolve an identity is `401 unauthorized`.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(msg) => return Err(errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg)),
    };

    let claims = state.verifier.verify(token, Utc::now()).map_err(|e| {
        tracing::warn!(error = %e, "token verification failed");
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid or expired token",
        )
    })?;

    req.extensions_mut()
        .insert(SubjectContext::new(claims.sub, claims.subject()));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing authorization header")?;

    let header = header
        .to_str()
        .map_err(|_| "malformed authorization header")?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or("expected a bearer token")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }

    Ok(token)
}
