//! Reconciliation outcomes and the run report they aggregate into

use serde::Serialize;
use thiserror::Error;

use super::entity::{Identity, OrgName, TeamSlug};
use crate::domain::directory::RemoteStatus;

/// The entity a reconciliation step acted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    Organization { org: OrgName },
    Team { org: OrgName, team: TeamSlug },
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Organization { org } => write!(f, "organization {}", org),
            Self::Team { org, team } => write!(f, "team {}/{}", org, team),
        }
    }
}

fn status_label(status: &Option<RemoteStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "no response".to_string(),
    }
}

/// A terminal failure for a single target
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HardFailure {
    #[error("organization {org} does not exist")]
    OrganizationNotFound { org: OrgName },

    #[error("organization {org} is unreachable ({}): {detail}", status_label(.status))]
    OrganizationUnreachable {
        org: OrgName,
        status: Option<RemoteStatus>,
        detail: String,
    },

    #[error("team does not exist: {org}/{team}")]
    TeamNotFound { org: OrgName, team: TeamSlug },

    #[error("{identity} in {target} ({}): {detail}", status_label(.status))]
    Rejected {
        identity: Identity,
        target: Target,
        status: Option<RemoteStatus>,
        detail: String,
    },
}

/// Result of reconciling one organization or team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    /// Membership was already active, nothing was changed
    AlreadySatisfied,
    /// Membership was missing and has been made active
    Applied,
    /// Desired state not confirmed, but processing can continue
    SoftFailure { reason: String },
    HardFailure { failure: HardFailure },
}

impl ReconciliationOutcome {
    pub fn soft(reason: impl Into<String>) -> Self {
        Self::SoftFailure {
            reason: reason.into(),
        }
    }

    pub fn hard(failure: HardFailure) -> Self {
        Self::HardFailure { failure }
    }

    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Self::HardFailure { .. })
    }

    pub fn hard_failure(&self) -> Option<&HardFailure> {
        match self {
            Self::HardFailure { failure } => Some(failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReconciliationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySatisfied => write!(f, "already a member"),
            Self::Applied => write!(f, "added"),
            Self::SoftFailure { reason } => write!(f, "skipped: {}", reason),
            Self::HardFailure { failure } => write!(f, "failed: {}", failure),
        }
    }
}

/// Outcome recorded for one team of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamOutcome {
    pub team: TeamSlug,
    #[serde(flatten)]
    pub outcome: ReconciliationOutcome,
}

/// The single artifact of a run: the org outcome plus one entry per attempted team
///
/// An empty `teams` list after an org hard failure means the teams were
/// never attempted, not that they failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub identity: Identity,
    pub organization: OrgName,
    pub org: ReconciliationOutcome,
    pub teams: Vec<TeamOutcome>,
}

impl RunReport {
    pub fn new(identity: Identity, organization: OrgName, org: ReconciliationOutcome) -> Self {
        Self {
            identity,
            organization,
            org,
            teams: Vec::new(),
        }
    }

    pub fn record_team(&mut self, team: TeamSlug, outcome: ReconciliationOutcome) {
        self.teams.push(TeamOutcome { team, outcome });
    }

    pub fn team(&self, team: &str) -> Option<&ReconciliationOutcome> {
        self.teams
            .iter()
            .find(|entry| entry.team.as_str() == team)
            .map(|entry| &entry.outcome)
    }

    pub fn teams_attempted(&self) -> bool {
        !self.teams.is_empty()
    }

    /// The first hard failure, org first, then teams in processing order
    pub fn first_hard_failure(&self) -> Option<&HardFailure> {
        self.org.hard_failure().or_else(|| {
            self.teams
                .iter()
                .find_map(|entry| entry.outcome.hard_failure())
        })
    }

    pub fn is_success(&self) -> bool {
        self.first_hard_failure().is_none()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} -> {}: {}", self.identity, self.organization, self.org)?;

        if self.org.is_hard_failure() {
            return writeln!(f, "  teams: not attempted");
        }

        for entry in &self.teams {
            writeln!(f, "  team {}: {}", entry.team, entry.outcome)?;
        }

        Ok(())
    }
}
