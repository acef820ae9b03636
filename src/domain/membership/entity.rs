//! Membership entities and the names they are keyed by

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{validate_name, NameValidationError};

macro_rules! directory_name {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new name after validation
            pub fn new(value: impl Into<String>) -> Result<Self, NameValidationError> {
                let value = value.into();
                validate_name($kind, &value)?;
                Ok(Self(value))
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = NameValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = NameValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

directory_name!(
    /// The person being onboarded: a login, an email address or an internal ID
    Identity,
    "identity"
);

directory_name!(
    /// Name of the target organization
    OrgName,
    "organization"
);

directory_name!(
    /// Name (slug) of a team inside an organization
    TeamSlug,
    "team"
);

/// Ordered set of target teams
///
/// Duplicates collapse onto their first occurrence so that a repeated team
/// is processed exactly once, in the position it was first given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSet {
    teams: Vec<TeamSlug>,
}

impl TeamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamSlug> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl FromIterator<TeamSlug> for TeamSet {
    fn from_iter<I: IntoIterator<Item = TeamSlug>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let teams = iter
            .into_iter()
            .filter(|team| seen.insert(team.clone()))
            .collect();

        Self { teams }
    }
}

impl<'a> IntoIterator for &'a TeamSet {
    type Item = &'a TeamSlug;
    type IntoIter = std::slice::Iter<'a, TeamSlug>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}

/// State of a membership as reported by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    Active,
    /// Invitation sent but not yet accepted
    Pending,
    Absent,
    /// Raw state string the directory returned that we do not recognize
    Unknown(String),
}

impl From<&str> for MembershipState {
    fn from(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "" => Self::Absent,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Absent => write!(f, "absent"),
            Self::Unknown(raw) => write!(f, "unknown ({})", raw),
        }
    }
}

/// A membership record returned by a read or mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipInfo {
    pub state: MembershipState,
    pub role: Option<String>,
}

impl MembershipInfo {
    pub fn new(state: MembershipState) -> Self {
        Self { state, role: None }
    }

    pub fn active() -> Self {
        Self::new(MembershipState::Active)
    }

    pub fn pending() -> Self {
        Self::new(MembershipState::Pending)
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// An organization as returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgInfo {
    pub login: String,
}

/// A team as returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInfo {
    pub slug: String,
    pub name: Option<String>,
}
