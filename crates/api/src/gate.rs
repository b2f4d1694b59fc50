//! Permission gate between routes and the pure policy evaluator.
//!
//! Each route declares the (action, resource) pair it requires; the gate
//! derives the subject's rules and answers the check. Status mapping stays
//! in the error helpers so the gate itself carries no HTTP semantics.

use thiserror::Error;

use coursekit_auth::{Action, Resource, derive_rules, has_permission};

use crate::context::SubjectContext;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("{action} on {resource} is not permitted")]
    Forbidden { action: Action, resource: Resource },
}

/// Check the route's declared pair against the authenticated subject.
///
/// Rules are derived fresh per check and discarded; nothing is cached.
pub fn authorize_request(
    ctx: &SubjectContext,
    action: Action,
    resource: Resource,
) -> Result<(), GateError> {
    let rules = derive_rules(ctx.subject());
    if has_permission(&rules, action, resource) {
        Ok(())
    } else {
        tracing::debug!(
            subject = %ctx.subject_id(),
            %action,
            %resource,
            "permission denied"
        );
        Err(GateError::Forbidden { action, resource })
    }
}
