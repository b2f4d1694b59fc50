use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use coursekit_auth::{Action, Resource};
use coursekit_content::Category;
use coursekit_core::DomainError;

use crate::gate::GateError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn gate_error_to_response(err: GateError) -> axum::response::Response {
    match err {
        GateError::Forbidden { .. } => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn parse_action(s: &str) -> Result<Action, axum::response::Response> {
    match s {
        "read" => Ok(Action::Read),
        "write" => Ok(Action::Write),
        "manage" => Ok(Action::Manage),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_action",
            "action must be one of: read, write, manage",
        )),
    }
}

pub fn parse_resource(s: &str) -> Result<Resource, axum::response::Response> {
    match s {
        "public" => Ok(Resource::Public),
        "premium" => Ok(Resource::Premium),
        "dashboard" => Ok(Resource::Dashboard),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_resource",
            "resource must be one of: public, premium, dashboard",
        )),
    }
}

pub fn parse_category(s: &str) -> Result<Category, axum::response::Response> {
    match s {
        "blog" => Ok(Category::Blog),
        "course" => Ok(Category::Course),
        "notebook" => Ok(Category::Notebook),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_category",
            "category must be one of: blog, course, notebook",
        )),
    }
}
