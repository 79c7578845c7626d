// ── Operator accounts and capabilities ──

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque operator account identifier (backend-assigned UUID string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(String);

impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperatorId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Operator role. Purely informational for display; access is decided by
/// the capability set, not the role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OperatorRole {
    Staff,
    Manager,
    Owner,
}

/// A console section an operator may be granted access to.
///
/// Closed set: adding a section is a coordinated code change, not
/// configuration. `Dashboard` is the always-visible landing view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Capability {
    Dashboard,
    Consoles,
    Rentals,
    Finance,
    Users,
    Settings,
}

/// An operator's granted capability set.
///
/// Wire form is a list of strings; the wildcard `"all"` grants every
/// section and supersedes individual entries. Unknown grant strings from
/// older backend versions are ignored on parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet {
    all: bool,
    sections: BTreeSet<Capability>,
}

impl PermissionSet {
    /// The wildcard set: every check passes.
    pub fn wildcard() -> Self {
        Self {
            all: true,
            sections: BTreeSet::new(),
        }
    }

    /// A set granting exactly the given sections.
    pub fn of(sections: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            all: false,
            sections: sections.into_iter().collect(),
        }
    }

    /// Whether this set carries the wildcard grant.
    pub fn grants_all(&self) -> bool {
        self.all
    }

    /// Whether the given section was explicitly granted (wildcard aside).
    pub fn contains(&self, capability: Capability) -> bool {
        self.sections.contains(&capability)
    }

    /// The explicitly granted sections, in stable order.
    pub fn sections(&self) -> impl Iterator<Item = Capability> + '_ {
        self.sections.iter().copied()
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(grants: Vec<String>) -> Self {
        let mut set = Self::default();
        for grant in &grants {
            if grant.eq_ignore_ascii_case("all") {
                set.all = true;
            } else if let Ok(cap) = grant.parse::<Capability>() {
                set.sections.insert(cap);
            }
            // Unknown grant strings are dropped, not errors.
        }
        set
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        let mut grants = Vec::new();
        if set.all {
            grants.push("all".to_owned());
        }
        grants.extend(set.sections.iter().map(ToString::to_string));
        grants
    }
}

/// Backend-computed activity counters for an operator. The console renders
/// these but never computes them -- the backend increments on each
/// processed review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorStats {
    pub total_processed_requests: u64,
    pub total_processed_kyc: u64,
    /// Actions per ISO date, `"YYYY-MM-DD" -> count`.
    pub daily_actions: BTreeMap<String, u64>,
}

/// An operator account as seen by the console: a read-through copy of the
/// backend record, minus credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: OperatorId,
    pub username: String,
    pub full_name: String,
    pub role: OperatorRole,
    pub permissions: PermissionSet,
    pub bio: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub stats: OperatorStats,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn permission_set_parses_wildcard_and_sections() {
        let set = PermissionSet::from(vec!["all".to_owned(), "rentals".to_owned()]);
        assert!(set.grants_all());
        assert!(set.contains(Capability::Rentals));
    }

    #[test]
    fn permission_set_ignores_unknown_grants() {
        let set = PermissionSet::from(vec!["rentals".to_owned(), "time-travel".to_owned()]);
        assert!(!set.grants_all());
        assert!(set.contains(Capability::Rentals));
        assert_eq!(set.sections().count(), 1);
    }

    #[test]
    fn permission_set_round_trips_through_wire_form() {
        let set = PermissionSet::of([Capability::Finance, Capability::Consoles]);
        let wire: Vec<String> = set.clone().into();
        assert_eq!(wire, vec!["consoles".to_owned(), "finance".to_owned()]);
        assert_eq!(PermissionSet::from(wire), set);
    }

    #[test]
    fn capability_wire_names_are_lowercase() {
        assert_eq!(Capability::Users.to_string(), "users");
        assert_eq!("settings".parse::<Capability>().unwrap(), Capability::Settings);
    }
}
