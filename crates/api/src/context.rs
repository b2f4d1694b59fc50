use coursekit_auth::{Subject, SubjectId};
use coursekit_core::UserId;

/// Authenticated subject for a request (verified identity + attributes).
///
/// Inserted by the auth middleware; handlers read it from request
/// extensions. Identity comes only from a verified token, never from
/// client-supplied parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectContext {
    subject_id: SubjectId,
    subject: Subject,
}

impl SubjectContext {
    pub fn new(subject_id: SubjectId, subject: Subject) -> Self {
        Self {
            subject_id,
            subject,
        }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The subject's identity as a domain user id.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(*self.subject_id.as_uuid())
    }
}
