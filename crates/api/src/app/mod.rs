//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store wiring shared by all routes
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (entrypoint for `main.rs` and black-box tests).
pub fn build_app(jwt_secret: String) -> Router {
    let auth_state = middleware::AuthState {
        verifier: Arc::new(coursekit_auth::Hs256TokenVerifier::new(
            jwt_secret.into_bytes(),
        )),
    };

    let services = Arc::new(services::build_services());

    // Protected routes: every request must carry a verifiable identity.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
