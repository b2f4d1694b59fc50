use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use coursekit_auth::{Action, Resource};
use coursekit_content::{ContentItem, Visibility};
use coursekit_core::ContentId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SubjectContext;
use crate::gate;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_content))
        .route("/public", get(list_public))
        .route("/premium", get(list_premium))
        .route("/:id", get(get_content).delete(delete_content))
        .route("/:id/publish", post(publish_content))
}

/// Policy resource a content item lives under.
pub(crate) fn visibility_resource(visibility: Visibility) -> Resource {
    match visibility {
        Visibility::Public => Resource::Public,
        Visibility::Premium => Resource::Premium,
    }
}

/// GET /content/public - published public items, optionally by category.
pub async fn list_public(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Query(query): Query<dto::ListContentQuery>,
) -> axum::response::Response {
    list_tier(&services, &ctx, Visibility::Public, query).await
}

/// GET /content/premium - published premium items, optionally by category.
pub async fn list_premium(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Query(query): Query<dto::ListContentQuery>,
) -> axum::response::Response {
    list_tier(&services, &ctx, Visibility::Premium, query).await
}

async fn list_tier(
    services: &AppServices,
    ctx: &SubjectContext,
    visibility: Visibility,
    query: dto::ListContentQuery,
) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(ctx, Action::Read, visibility_resource(visibility)) {
        return errors::gate_error_to_response(e);
    }

    let category = match query.category.as_deref().map(errors::parse_category).transpose() {
        Ok(category) => category,
        Err(response) => return response,
    };

    let items = services.content.list_published(visibility, category);
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// GET /content/:id - fetch one item, gated by its own visibility.
pub async fn get_content(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ContentId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid content id"),
    };

    let Some(item) = services.content.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "content not found");
    };

    // Drafts exist only for their author.
    if !item.is_published() && item.author_id != ctx.user_id() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "content not found");
    }

    if let Err(e) = gate::authorize_request(&ctx, Action::Read, visibility_resource(item.visibility))
    {
        return errors::gate_error_to_response(e);
    }

    (StatusCode::OK, Json(serde_json::json!({ "item": item }))).into_response()
}

/// POST /content - author a draft (premium-write capability).
pub async fn create_content(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Json(body): Json<dto::CreateContentRequest>,
) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(&ctx, Action::Write, Resource::Premium) {
        return errors::gate_error_to_response(e);
    }

    let item = match ContentItem::draft(
        ContentId::new(),
        ctx.user_id(),
        &body.title,
        &body.body,
        body.category,
        body.visibility,
        Utc::now(),
    ) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let id = item.id;
    services.content.upsert(item);

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id.to_string() })),
    )
        .into_response()
}

/// POST /content/:id/publish - publish a draft (author, or a manager).
pub async fn publish_content(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ContentId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid content id"),
    };

    if let Err(e) = gate::authorize_request(&ctx, Action::Write, Resource::Premium) {
        return errors::gate_error_to_response(e);
    }

    let Some(mut item) = services.content.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "content not found");
    };

    if item.author_id != ctx.user_id() {
        // Non-authors need the manage grant on the item's tier.
        if let Err(e) =
            gate::authorize_request(&ctx, Action::Manage, visibility_resource(item.visibility))
        {
            return errors::gate_error_to_response(e);
        }
    }

    if let Err(e) = item.publish(Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    services.content.upsert(item.clone());

    (StatusCode::OK, Json(serde_json::json!({ "item": item }))).into_response()
}

/// DELETE /content/:id - remove an item (manage grant, i.e. administrators).
pub async fn delete_content(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<SubjectContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ContentId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid content id"),
    };

    let Some(item) = services.content.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "content not found");
    };

    if let Err(e) =
        gate::authorize_request(&ctx, Action::Manage, visibility_resource(item.visibility))
    {
        return errors::gate_error_to_response(e);
    }

    services.content.remove(&id);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "deleted": id.to_string() })),
    )
        .into_response()
}
