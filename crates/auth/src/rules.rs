//! Rule derivation and permission checks.
//!
//! - No IO
//! - No panics
//! - No retained state (a rule set is derived per check and discarded)

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::subject::Subject;

/// Operation requested on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Manage,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Manage => "manage",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named protected area of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Public,
    Premium,
    Dashboard,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Public => "public",
            Resource::Premium => "premium",
            Resource::Dashboard => "dashboard",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource pattern a rule applies to: one resource, or all of them.
///
/// Serializes to the resource name, with `"*"` for the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceSelector {
    #[serde(rename = "*")]
    Any,
    #[serde(untagged)]
    Exact(Resource),
}

impl ResourceSelector {
    pub fn matches(self, resource: Resource) -> bool {
        match self {
            ResourceSelector::Any => true,
            ResourceSelector::Exact(exact) => exact == resource,
        }
    }
}

impl core::fmt::Display for ResourceSelector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceSelector::Any => f.write_str("*"),
            ResourceSelector::Exact(resource) => core::fmt::Display::fmt(resource, f),
        }
    }
}

/// A derived grant: a set of actions allowed on a resource selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub resource: ResourceSelector,
    pub actions: Vec<Action>,
    pub allow: bool,
}

impl Rule {
    fn grant(resource: ResourceSelector, actions: &[Action]) -> Self {
        Self {
            resource,
            actions: actions.to_vec(),
            allow: true,
        }
    }

    /// Does this rule permit `action` on `resource`?
    ///
    /// `allow` is part of the match: a future deny-rule must not be treated
    /// as a grant.
    pub fn permits(&self, action: Action, resource: Resource) -> bool {
        self.resource.matches(resource) && self.actions.contains(&action) && self.allow
    }
}

/// Derive the ordered rule set for a subject.
///
/// Infallible: any subject gets at least the public-read baseline. The
/// emission order is fixed for determinism; matching is "any rule permits",
/// so order never changes the outcome.
pub fn derive_rules(subject: &Subject) -> Vec<Rule> {
    let mut rules = Vec::with_capacity(5);

    rules.push(Rule::grant(
        ResourceSelector::Exact(Resource::Public),
        &[Action::Read],
    ));

    if subject.is_paid || (subject.role.grants(Role::Basic) && subject.is_active()) {
        rules.push(Rule::grant(
            ResourceSelector::Exact(Resource::Premium),
            &[Action::Read],
        ));
    }

    if subject.is_paid || subject.role.grants(Role::Admin) {
        rules.push(Rule::grant(
            ResourceSelector::Exact(Resource::Premium),
            &[Action::Write],
        ));
        rules.push(Rule::grant(
            ResourceSelector::Exact(Resource::Dashboard),
            &[Action::Read, Action::Write],
        ));
    }

    if subject.role.grants(Role::Admin) {
        rules.push(Rule::grant(ResourceSelector::Any, &[Action::Manage]));
    }

    rules
}

/// Check a requested (action, resource) pair against a derived rule set.
///
/// Absence of a match is a normal `false`, never an error.
pub fn has_permission(rules: &[Rule], action: Action, resource: Resource) -> bool {
    rules.iter().any(|rule| rule.permits(action, resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(role: Role, is_paid: bool, activity_count: u32) -> Subject {
        Subject {
            role,
            is_paid,
            activity_count,
        }
    }

    fn allowed(subject: &Subject, action: Action, resource: Resource) -> bool {
        has_permission(&derive_rules(subject), action, resource)
    }

    #[test]
    fn guest_baseline_is_public_read_only() {
        let guest = Subject::default();

        assert!(allowed(&guest, Action::Read, Resource::Public));

        for action in [Action::Read, Action::Write, Action::Manage] {
            for resource in [Resource::Public, Resource::Premium, Resource::Dashboard] {
                if action == Action::Read && resource == Resource::Public {
                    continue;
                }
                assert!(
                    !allowed(&guest, action, resource),
                    "guest unexpectedly allowed {action} on {resource}"
                );
            }
        }
    }

    #[test]
    fn active_basic_reads_premium_but_no_more() {
        let active = subject(Role::Basic, false, 3);
        assert!(allowed(&active, Action::Read, Resource::Premium));
        assert!(!allowed(&active, Action::Write, Resource::Premium));
        assert!(!allowed(&active, Action::Read, Resource::Dashboard));
    }

    #[test]
    fn inactive_basic_does_not_read_premium() {
        let inactive = subject(Role::Basic, false, 2);
        assert!(!allowed(&inactive, Action::Read, Resource::Premium));
        assert!(allowed(&inactive, Action::Read, Resource::Public));
    }

    #[test]
    fn paid_subject_gets_premium_and_dashboard() {
        let paid = subject(Role::Paid, true, 0);

        assert!(allowed(&paid, Action::Read, Resource::Premium));
        assert!(allowed(&paid, Action::Write, Resource::Premium));
        assert!(allowed(&paid, Action::Read, Resource::Dashboard));
        assert!(allowed(&paid, Action::Write, Resource::Dashboard));

        for resource in [Resource::Public, Resource::Premium, Resource::Dashboard] {
            assert!(!allowed(&paid, Action::Manage, resource));
        }
    }

    #[test]
    fn paid_flag_alone_unlocks_premium_even_for_guests() {
        let paying_guest = subject(Role::Guest, true, 0);
        assert!(allowed(&paying_guest, Action::Read, Resource::Premium));
        assert!(allowed(&paying_guest, Action::Write, Resource::Premium));
        assert!(allowed(&paying_guest, Action::Read, Resource::Dashboard));
    }

    #[test]
    fn admin_holds_every_listed_grant() {
        let admin = subject(Role::Admin, true, 10);

        assert!(allowed(&admin, Action::Read, Resource::Public));
        assert!(allowed(&admin, Action::Read, Resource::Premium));
        assert!(allowed(&admin, Action::Write, Resource::Premium));
        assert!(allowed(&admin, Action::Read, Resource::Dashboard));
        assert!(allowed(&admin, Action::Write, Resource::Dashboard));
        for resource in [Resource::Public, Resource::Premium, Resource::Dashboard] {
            assert!(allowed(&admin, Action::Manage, resource));
        }
    }

    #[test]
    fn unpaid_admin_still_writes_premium_and_manages() {
        let admin = subject(Role::Admin, false, 0);
        assert!(allowed(&admin, Action::Write, Resource::Premium));
        assert!(allowed(&admin, Action::Write, Resource::Dashboard));
        assert!(allowed(&admin, Action::Manage, Resource::Public));
    }

    #[test]
    fn derivation_order_is_fixed() {
        let admin = subject(Role::Admin, true, 10);
        let rules = derive_rules(&admin);

        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0].resource, ResourceSelector::Exact(Resource::Public));
        assert_eq!(rules[1].resource, ResourceSelector::Exact(Resource::Premium));
        assert_eq!(rules[1].actions, vec![Action::Read]);
        assert_eq!(rules[2].resource, ResourceSelector::Exact(Resource::Premium));
        assert_eq!(rules[2].actions, vec![Action::Write]);
        assert_eq!(
            rules[3].resource,
            ResourceSelector::Exact(Resource::Dashboard)
        );
        assert_eq!(rules[3].actions, vec![Action::Read, Action::Write]);
        assert_eq!(rules[4].resource, ResourceSelector::Any);
        assert_eq!(rules[4].actions, vec![Action::Manage]);
    }

    #[test]
    fn deny_rules_are_not_grants() {
        let deny = Rule {
            resource: ResourceSelector::Any,
            actions: vec![Action::Read],
            allow: false,
        };
        assert!(!has_permission(&[deny], Action::Read, Resource::Public));
    }

    #[test]
    fn rules_serialize_to_the_wire_contract() {
        let rule = Rule::grant(ResourceSelector::Any, &[Action::Manage]);
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"resource":"*","actions":["manage"],"allow":true}"#
        );

        let rule = Rule::grant(ResourceSelector::Exact(Resource::Premium), &[Action::Read]);
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"resource":"premium","actions":["read"],"allow":true}"#
        );
    }

    #[test]
    fn selectors_deserialize_from_wire_names() {
        assert_eq!(
            serde_json::from_str::<ResourceSelector>("\"*\"").unwrap(),
            ResourceSelector::Any
        );
        assert_eq!(
            serde_json::from_str::<ResourceSelector>("\"dashboard\"").unwrap(),
            ResourceSelector::Exact(Resource::Dashboard)
        );
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        fn any_role() -> impl Strategy<Value = Role> {
            prop_oneof![
                Just(Role::Guest),
                Just(Role::Basic),
                Just(Role::Paid),
                Just(Role::Admin),
            ]
        }

        fn any_action() -> impl Strategy<Value = Action> {
            prop_oneof![
                Just(Action::Read),
                Just(Action::Write),
                Just(Action::Manage),
            ]
        }

        fn any_resource() -> impl Strategy<Value = Resource> {
            prop_oneof![
                Just(Resource::Public),
                Just(Resource::Premium),
                Just(Resource::Dashboard),
            ]
        }

        fn any_subject() -> impl Strategy<Value = Subject> {
            (any_role(), any::<bool>(), 0u32..10).prop_map(|(role, is_paid, activity_count)| {
                Subject {
                    role,
                    is_paid,
                    activity_count,
                }
            })
        }

        proptest! {
            #[test]
            fn derivation_is_idempotent(subject in any_subject()) {
                prop_assert_eq!(derive_rules(&subject), derive_rules(&subject));
            }

            #[test]
            fn every_rule_derived_is_a_grant(subject in any_subject()) {
                prop_assert!(derive_rules(&subject).iter().all(|rule| rule.allow));
            }

            #[test]
            fn public_read_is_never_lost(subject in any_subject()) {
                prop_assert!(has_permission(
                    &derive_rules(&subject),
                    Action::Read,
                    Resource::Public,
                ));
            }

            #[test]
            fn admins_manage_every_resource(
                is_paid in any::<bool>(),
                activity_count in 0u32..10,
                resource in any_resource(),
            ) {
                let admin = Subject { role: Role::Admin, is_paid, activity_count };
                prop_assert!(has_permission(&derive_rules(&admin), Action::Manage, resource));
            }

            #[test]
            fn only_admins_ever_manage(
                subject in any_subject(),
                resource in any_resource(),
            ) {
                let granted = has_permission(&derive_rules(&subject), Action::Manage, resource);
                prop_assert_eq!(granted, subject.role == Role::Admin);
            }

            #[test]
            fn guests_hold_only_the_public_read_grant(
                action in any_action(),
                resource in any_resource(),
            ) {
                let guest = Subject::default();
                let granted = has_permission(&derive_rules(&guest), action, resource);
                prop_assert_eq!(
                    granted,
                    action == Action::Read && resource == Resource::Public,
                );
            }
        }
    }
}
