// ── Capability checks ──
//
// Every gating site in the console -- navigation filtering, section
// rendering, poll-category selection -- goes through this module, so the
// wildcard and dashboard rules live in exactly one place.

use crate::model::{Capability, Operator};

/// Outcome of a capability check.
///
/// `Unknown` is distinct from `Granted` on purpose: it means "no operator
/// record is loaded yet" (session bootstrap), during which the gate is not
/// enforced. Callers treating `Unknown` as authorized reproduce the
/// deliberate fail-open bootstrap window; see `is_authorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No operator record resolved yet; the gate is not enforced.
    Unknown,
    /// The operator's capability set allows this section.
    Granted,
    /// The operator's capability set denies this section.
    Denied,
}

/// Decide whether `operator` may access `capability`.
///
/// Rules, in order:
/// - no operator record yet -> `Unknown`
/// - `dashboard` -> `Granted` (every authenticated operator sees the
///   landing view)
/// - wildcard grant -> `Granted`
/// - otherwise membership in the operator's section set
pub fn check_access(operator: Option<&Operator>, capability: Capability) -> Access {
    let Some(operator) = operator else {
        return Access::Unknown;
    };

    if capability == Capability::Dashboard
        || operator.permissions.grants_all()
        || operator.permissions.contains(capability)
    {
        Access::Granted
    } else {
        Access::Denied
    }
}

/// Boolean form of [`check_access`]: everything except an explicit denial
/// passes. Total over its inputs, no side effects.
pub fn is_authorized(operator: Option<&Operator>, capability: Capability) -> bool {
    check_access(operator, capability) != Access::Denied
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::model::{OperatorId, OperatorRole, OperatorStats, PermissionSet};

    fn operator(permissions: PermissionSet) -> Operator {
        Operator {
            id: OperatorId::from("op-1"),
            username: "desk".into(),
            full_name: "Front Desk".into(),
            role: OperatorRole::Staff,
            permissions,
            bio: None,
            created_at: None,
            stats: OperatorStats::default(),
        }
    }

    #[test]
    fn wildcard_grants_every_capability() {
        let op = operator(PermissionSet::wildcard());
        for cap in Capability::iter() {
            assert_eq!(check_access(Some(&op), cap), Access::Granted, "{cap}");
        }
    }

    #[test]
    fn without_wildcard_only_dashboard_and_membership_pass() {
        let op = operator(PermissionSet::of([Capability::Rentals, Capability::Users]));
        for cap in Capability::iter() {
            let expected = cap == Capability::Dashboard
                || op.permissions.contains(cap);
            assert_eq!(is_authorized(Some(&op), cap), expected, "{cap}");
        }
    }

    #[test]
    fn empty_set_still_sees_dashboard() {
        let op = operator(PermissionSet::default());
        assert_eq!(check_access(Some(&op), Capability::Dashboard), Access::Granted);
        assert_eq!(check_access(Some(&op), Capability::Finance), Access::Denied);
    }

    #[test]
    fn missing_operator_is_unknown_and_fails_open() {
        for cap in Capability::iter() {
            assert_eq!(check_access(None, cap), Access::Unknown);
            assert!(is_authorized(None, cap));
        }
    }
}
