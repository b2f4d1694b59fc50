//! `coursekit-auth` — pure access-policy boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: rule
//! derivation and permission checks are pure functions over subject
//! attributes, and token verification sits behind a trait so transports
//! inject it instead of reading a process-wide client.

pub mod claims;
pub mod explain;
pub mod roles;
pub mod rules;
pub mod subject;
pub mod token;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use explain::{DenialReason, PermissionExplanation, SubjectState, explain_permission};
pub use roles::{ALL_ROLES, Role};
pub use rules::{Action, Resource, ResourceSelector, Rule, derive_rules, has_permission};
pub use subject::{ACTIVITY_THRESHOLD, Subject, SubjectId};
pub use token::{Hs256TokenVerifier, TokenVerifier, TokenVerifyError};
