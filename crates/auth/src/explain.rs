//! Permission-decision explanations (audit trail).
//!
//! Answers "why was this request allowed or denied?" with the same semantics
//! as [`has_permission`], plus the evaluated subject state and concrete
//! suggestions on denial.

use serde::Serialize;

use crate::roles::Role;
use crate::rules::{Action, Resource, ResourceSelector, Rule, derive_rules};
use crate::subject::{ACTIVITY_THRESHOLD, Subject};

/// Detailed explanation of a permission decision.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionExplanation {
    /// The action that was requested.
    pub action: Action,

    /// The resource the action was requested on.
    pub resource: Resource,

    /// Whether the permission was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The first rule that permitted the request, if any.
    pub matched_rule: Option<Rule>,

    /// The subject's evaluated state.
    pub subject: SubjectState,

    /// If denied, what was missing.
    pub denial: Option<DenialReason>,
}

/// Evaluated state of the subject being checked.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectState {
    pub role: Role,
    pub is_paid: bool,
    pub activity_count: u32,
    pub is_active: bool,
    pub rules: Vec<Rule>,
}

/// Why a permission was denied, with suggestions for unlocking it.
#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Explain a permission decision for a subject.
///
/// Consistent with [`has_permission`] by construction: `granted` is true iff
/// the check would pass. Pure and infallible, like the evaluator itself.
///
/// [`has_permission`]: crate::rules::has_permission
pub fn explain_permission(
    subject: &Subject,
    action: Action,
    resource: Resource,
) -> PermissionExplanation {
    let rules = derive_rules(subject);
    let matched = rules.iter().find(|rule| rule.permits(action, resource));

    let state = SubjectState {
        role: subject.role,
        is_paid: subject.is_paid,
        activity_count: subject.activity_count,
        is_active: subject.is_active(),
        rules: rules.clone(),
    };

    match matched {
        Some(rule) => {
            let reason = match rule.resource {
                ResourceSelector::Any => {
                    format!("granted by the wildcard rule covering {action} on every resource")
                }
                ResourceSelector::Exact(exact) => {
                    format!("granted by an explicit rule allowing {action} on {exact}")
                }
            };

            PermissionExplanation {
                action,
                resource,
                granted: true,
                reason,
                matched_rule: Some(rule.clone()),
                subject: state,
                denial: None,
            }
        }
        None => PermissionExplanation {
            action,
            resource,
            granted: false,
            reason: format!("no derived rule permits {action} on {resource}"),
            matched_rule: None,
            subject: state,
            denial: Some(DenialReason {
                message: format!("missing a grant for {action} on {resource}"),
                suggestions: suggestions_for(subject, action, resource),
            }),
        },
    }
}

/// Concrete attribute changes that would unlock the denied grant.
fn suggestions_for(subject: &Subject, action: Action, resource: Resource) -> Vec<String> {
    let mut suggestions = Vec::new();

    if action == Action::Manage {
        suggestions.push("only administrators hold the manage grant".to_string());
        return suggestions;
    }

    match (action, resource) {
        (Action::Read, Resource::Premium) => {
            if !subject.is_paid {
                suggestions.push("purchase a subscription (paid accounts read premium content)".to_string());
            }
            if !subject.role.grants(Role::Basic) {
                suggestions.push("sign up for a basic account".to_string());
            } else if !subject.is_active() {
                suggestions.push(format!(
                    "reach an activity count of at least {ACTIVITY_THRESHOLD} (currently {})",
                    subject.activity_count
                ));
            }
        }
        (Action::Write, Resource::Premium) | (_, Resource::Dashboard) => {
            if !subject.is_paid {
                suggestions.push("purchase a subscription (paid accounts unlock this area)".to_string());
            }
            suggestions.push("ask an administrator to upgrade the account role".to_string());
        }
        (Action::Write, Resource::Public) => {
            suggestions.push("public content is read-only; authoring happens through the premium catalog".to_string());
        }
        _ => {}
    }

    suggestions
}
