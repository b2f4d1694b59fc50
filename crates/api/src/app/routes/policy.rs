//! Policy audit endpoints for transparent authorization debugging.
//!
//! These expose the evaluator's own output — derived rules, decision
//! explanations, and the role hierarchy — to answer "why was this request
//! denied?" without reading server logs.

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use coursekit_auth::{ALL_ROLES, Action, Resource, derive_rules, explain_permission};

use crate::app::{dto, errors};
use crate::context::SubjectContext;
use crate::gate;

pub fn router() -> Router {
    Router::new()
        .route("/rules", get(my_rules))
        .route("/explain", get(explain_decision))
        .route("/roles", get(list_roles))
}

/// GET /policy/rules - the rule set derived for the current subject.
pub async fn my_rules(Extension(ctx): Extension<SubjectContext>) -> axum::response::Response {
    let rules = derive_rules(ctx.subject());
    (StatusCode::OK, Json(serde_json::json!({ "rules": rules }))).into_response()
}

/// GET /policy/explain?action=X&resource=Y - why the current subject can or
/// cannot perform an operation. Self-inspection, so no grant is required.
pub async fn explain_decision(
    Extension(ctx): Extension<SubjectContext>,
    Query(query): Query<dto::ExplainQuery>,
) -> axum::response::Response {
    let action = match errors::parse_action(&query.action) {
        Ok(action) => action,
        Err(response) => return response,
    };
    let resource = match errors::parse_resource(&query.resource) {
        Ok(resource) => resource,
        Err(response) => return response,
    };

    let explanation = explain_permission(ctx.subject(), action, resource);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "explanation": explanation })),
    )
        .into_response()
}

/// GET /policy/roles - the role hierarchy (dashboard readers only).
pub async fn list_roles(Extension(ctx): Extension<SubjectContext>) -> axum::response::Response {
    if let Err(e) = gate::authorize_request(&ctx, Action::Read, Resource::Dashboard) {
        return errors::gate_error_to_response(e);
    }

    let roles: Vec<serde_json::Value> = ALL_ROLES
        .into_iter()
        .map(|role| {
            serde_json::json!({
                "role": role,
                "inherits": role.inherited(),
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
}
