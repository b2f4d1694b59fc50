use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get,
};

use coursekit_auth::{Action, Resource};
use coursekit_content::Category;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SubjectContext;
use crate::gate;

pub fn router() -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/content", get(list_all_content))
}

/// GET /dashboard - catalog overview for paying members and admins.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(&ctx, Action::Read, Resource::Dashboard) {
        return errors::gate_error_to_response(e);
    }

    let items = services.content.list_all();
    let published = items.iter().filter(|i| i.is_published()).count();

    let count_category = |category: Category| items.iter().filter(|i| i.category == category).count();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "content": {
                "total": items.len(),
                "published": published,
                "drafts": items.len() - published,
                "by_category": {
                    "blog": count_category(Category::Blog),
                    "course": count_category(Category::Course),
                    "notebook": count_category(Category::Notebook),
                },
            },
            "profiles": services.profiles.count(),
        })),
    )
        .into_response()
}

/// GET /dashboard/content - every item including drafts, newest change first.
pub async fn list_all_content(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(&ctx, Action::Read, Resource::Dashboard) {
        return errors::gate_error_to_response(e);
    }

    let items = services.content.list_all();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
