use serde::{Deserialize, Serialize};

/// Coarse-grained subject classification driving permission inheritance.
///
/// Roles form a total hierarchy: every role carries all grants of the roles
/// below it (`Admin` ⊇ `Paid` ⊇ `Basic` ⊇ `Guest`). Keeping this a closed
/// enum makes illegal role values unrepresentable and rule derivation
/// exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Basic,
    Paid,
    Admin,
}

/// Every role, highest in the hierarchy first.
pub const ALL_ROLES: [Role; 4] = [Role::Admin, Role::Paid, Role::Basic, Role::Guest];

impl Role {
    /// Position in the hierarchy; higher ranks inherit lower ones.
    fn rank(self) -> u8 {
        match self {
            Role::Guest => 0,
            Role::Basic => 1,
            Role::Paid => 2,
            Role::Admin => 3,
        }
    }

    /// Reflexive-transitive hierarchy check: does this role carry all grants
    /// of `required`?
    ///
    /// The hierarchy is total, so rank comparison is exact.
    pub fn grants(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Roles strictly below this one in the hierarchy, highest first.
    pub fn inherited(self) -> Vec<Role> {
        ALL_ROLES
            .into_iter()
            .filter(|role| *role != self && self.grants(*role))
            .collect()
    }

    /// Parse a role name; `None` for anything outside the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "guest" => Some(Role::Guest),
            "basic" => Some(Role::Basic),
            "paid" => Some(Role::Paid),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Basic => "basic",
            Role::Paid => "paid",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_is_reflexive() {
        for role in ALL_ROLES {
            assert!(role.grants(role));
        }
    }

    #[test]
    fn admin_grants_every_lower_role() {
        assert!(Role::Admin.grants(Role::Paid));
        assert!(Role::Admin.grants(Role::Basic));
        assert!(Role::Admin.grants(Role::Guest));
    }

    #[test]
    fn guest_grants_nothing_above_itself() {
        assert!(!Role::Guest.grants(Role::Basic));
        assert!(!Role::Guest.grants(Role::Paid));
        assert!(!Role::Guest.grants(Role::Admin));
    }

    #[test]
    fn grants_is_transitive() {
        // admin ⊇ paid and paid ⊇ basic, so admin ⊇ basic.
        assert!(Role::Admin.grants(Role::Paid));
        assert!(Role::Paid.grants(Role::Basic));
        assert!(Role::Admin.grants(Role::Basic));
    }

    #[test]
    fn inherited_lists_strictly_lower_roles() {
        assert_eq!(
            Role::Admin.inherited(),
            vec![Role::Paid, Role::Basic, Role::Guest]
        );
        assert_eq!(Role::Basic.inherited(), vec![Role::Guest]);
        assert!(Role::Guest.inherited().is_empty());
    }

    #[test]
    fn role_names_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("superuser"), None);
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"basic\"").unwrap(),
            Role::Basic
        );
    }
}
