use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Number of recorded activities at which a subject counts as active.
pub const ACTIVITY_THRESHOLD: u32 = 3;

/// Identity of an authenticated subject (human user, service account, etc).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(Uuid);

impl SubjectId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for SubjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<SubjectId> for Uuid {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl FromStr for SubjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// The attribute set a permission decision is made from.
///
/// Decoding is deliberately lenient: an unknown role name and absent fields
/// degrade to the guest baseline instead of failing, so a malformed subject
/// can still read public content and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Subject {
    #[serde(deserialize_with = "lenient_role")]
    pub role: Role,
    pub is_paid: bool,
    pub activity_count: u32,
}

impl Subject {
    pub fn is_active(&self) -> bool {
        self.activity_count >= ACTIVITY_THRESHOLD
    }
}

/// Deserialize a role name, degrading unknown or missing values to guest.
pub(crate) fn lenient_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(Role::from_name).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attributes_default_to_guest_baseline() {
        let subject: Subject = serde_json::from_str("{}").unwrap();
        assert_eq!(subject.role, Role::Guest);
        assert!(!subject.is_paid);
        assert_eq!(subject.activity_count, 0);
    }

    #[test]
    fn unknown_role_degrades_to_guest() {
        let subject: Subject =
            serde_json::from_str(r#"{"role":"superuser","is_paid":true}"#).unwrap();
        assert_eq!(subject.role, Role::Guest);
        assert!(subject.is_paid);
    }

    #[test]
    fn activity_threshold_marks_active() {
        let mut subject = Subject::default();
        assert!(!subject.is_active());

        subject.activity_count = ACTIVITY_THRESHOLD - 1;
        assert!(!subject.is_active());

        subject.activity_count = ACTIVITY_THRESHOLD;
        assert!(subject.is_active());
    }
}
