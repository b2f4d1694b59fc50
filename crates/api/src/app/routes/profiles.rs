use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Utc;

use coursekit_auth::{Action, Resource};
use coursekit_content::{Category, CourseProgress, Profile};
use coursekit_core::{ContentId, UserId};

use crate::app::services::AppServices;
use crate::app::routes::content::visibility_resource;
use crate::app::{dto, errors};
use crate::context::SubjectContext;
use crate::gate;

pub fn router() -> Router {
    Router::new()
        .route("/me", put(update_my_profile))
        .route("/me/progress", get(my_progress))
        .route("/me/progress/:content_id", put(record_progress))
        .route("/:user_id", get(get_profile))
}

/// GET /profiles/:user_id - public profile lookup.
pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(&ctx, Action::Read, Resource::Public) {
        return errors::gate_error_to_response(e);
    }

    let user_id: UserId = match user_id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.profiles.get(&user_id) {
        Some(profile) => {
            (StatusCode::OK, Json(serde_json::json!({ "profile": profile }))).into_response()
        }
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "profile not found"),
    }
}

/// PUT /profiles/me - create or update the caller's own profile.
///
/// Ownership is the guard here, not a policy grant: any verified subject may
/// edit their own profile.
pub async fn update_my_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> axum::response::Response {
    let user_id = ctx.user_id();
    let now = Utc::now();

    let profile = match services.profiles.get(&user_id) {
        Some(mut profile) => {
            if let Err(e) = profile.update(
                body.display_name.as_deref(),
                body.bio.as_deref(),
                body.avatar_url.clone(),
                now,
            ) {
                return errors::domain_error_to_response(e);
            }
            profile
        }
        None => {
            let (Some(username), Some(display_name)) =
                (body.username.as_deref(), body.display_name.as_deref())
            else {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "username and display_name are required to create a profile",
                );
            };

            let mut profile = match Profile::new(user_id, username, display_name, now) {
                Ok(profile) => profile,
                Err(e) => return errors::domain_error_to_response(e),
            };

            if let Err(e) = profile.update(None, body.bio.as_deref(), body.avatar_url.clone(), now)
            {
                return errors::domain_error_to_response(e);
            }
            profile
        }
    };

    services.profiles.upsert(profile.clone());

    (StatusCode::OK, Json(serde_json::json!({ "profile": profile }))).into_response()
}

/// GET /profiles/me/progress - the caller's course progress.
pub async fn my_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
) -> axum::response::Response {
    let entries: Vec<serde_json::Value> = services
        .progress
        .list_for_user(&ctx.user_id())
        .into_iter()
        .map(|p| {
            serde_json::json!({
                "content_id": p.content_id.to_string(),
                "completed_sections": p.completed_sections,
                "total_sections": p.total_sections,
                "percent": p.percent(),
                "updated_at": p.updated_at,
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "progress": entries }))).into_response()
}

/// PUT /profiles/me/progress/:content_id - record progress through a course.
pub async fn record_progress(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Path(content_id): Path<String>,
    Json(body): Json<dto::RecordProgressRequest>,
) -> axum::response::Response {
    let content_id: ContentId = match content_id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid content id"),
    };

    let Some(item) = services.content.get(&content_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "content not found");
    };

    if item.category != Category::Course || !item.is_published() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "progress can only be recorded against published courses",
        );
    }

    // Progress requires read access to the course itself.
    if let Err(e) = gate::authorize_request(&ctx, Action::Read, visibility_resource(item.visibility))
    {
        return errors::gate_error_to_response(e);
    }

    let mut progress = match CourseProgress::start(
        ctx.user_id(),
        content_id,
        body.total_sections,
        Utc::now(),
    ) {
        Ok(progress) => progress,
        Err(e) => return errors::domain_error_to_response(e),
    };
    progress.record(body.completed_sections, Utc::now());

    services.progress.upsert(progress);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "content_id": content_id.to_string(),
            "percent": progress.percent(),
            "complete": progress.is_complete(),
        })),
    )
        .into_response()
}
