use axum::{Router, routing::get};

pub mod content;
pub mod dashboard;
pub mod policy;
pub mod profiles;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/content", content::router())
        .nest("/profiles", profiles::router())
        .nest("/dashboard", dashboard::router())
        .nest("/policy", policy::router())
}
