use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::SubjectContext;

/// GET /health - liveness probe (unauthenticated).
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// GET /whoami - echo the authenticated subject.
pub async fn whoami(Extension(ctx): Extension<SubjectContext>) -> impl IntoResponse {
    let subject = ctx.subject();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "subject_id": ctx.subject_id().to_string(),
            "role": subject.role,
            "is_paid": subject.is_paid,
            "activity_count": subject.activity_count,
        })),
    )
}
