//! Team membership reconciliation

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{confirm_after_conflict, rejected};
use crate::domain::directory::{
    interpret_lookup, interpret_membership, CallKind, DirectoryClient, Interpretation,
};
use crate::domain::membership::{
    HardFailure, Identity, OrgName, ReconciliationOutcome, Target, TeamSlug,
};

/// Ensures an identity is an active member of a single team
///
/// Every failure is returned as an outcome for that team only; callers keep
/// going with the next team.
pub struct TeamMembershipReconciler<C: DirectoryClient + ?Sized> {
    client: Arc<C>,
}

impl<C: DirectoryClient + ?Sized> TeamMembershipReconciler<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn ensure(
        &self,
        identity: &Identity,
        org: &OrgName,
        team: &TeamSlug,
    ) -> ReconciliationOutcome {
        let target = Target::Team {
            org: org.clone(),
            team: team.clone(),
        };

        let read = self.client.get_team_membership(org, team, identity).await;
        let current = interpret_membership(CallKind::Read, &read);
        debug!(
            identity = %identity,
            org = %org,
            team = %team,
            status = ?read.status,
            interpretation = ?current,
            "Read team membership"
        );

        let outcome = match current {
            Interpretation::Satisfied | Interpretation::Applied => {
                ReconciliationOutcome::AlreadySatisfied
            }
            Interpretation::Conflict(reason) => ReconciliationOutcome::soft(reason),
            Interpretation::Fatal { status, detail } => rejected(identity, target, status, detail),
            Interpretation::NotFound => match self.lookup(identity, org, team).await {
                Some(failure) => ReconciliationOutcome::hard(failure),
                None => self.apply(identity, org, team, target).await,
            },
        };

        match &outcome {
            ReconciliationOutcome::HardFailure { failure } => {
                warn!(
                    identity = %identity,
                    org = %org,
                    team = %team,
                    error = %failure,
                    "Team membership failed"
                );
            }
            other => {
                info!(
                    identity = %identity,
                    org = %org,
                    team = %team,
                    outcome = %other,
                    "Team membership reconciled"
                );
            }
        }

        outcome
    }

    /// A membership read of "not found" is ambiguous; ask for the team itself
    async fn lookup(
        &self,
        identity: &Identity,
        org: &OrgName,
        team: &TeamSlug,
    ) -> Option<HardFailure> {
        let reply = self.client.get_team(org, team).await;

        let (status, detail) = match interpret_lookup(&reply) {
            Interpretation::Satisfied | Interpretation::Applied => return None,
            Interpretation::NotFound => {
                return Some(HardFailure::TeamNotFound {
                    org: org.clone(),
                    team: team.clone(),
                });
            }
            Interpretation::Conflict(detail) => (reply.status, detail),
            Interpretation::Fatal { status, detail } => (status, detail),
        };

        Some(HardFailure::Rejected {
            identity: identity.clone(),
            target: Target::Team {
                org: org.clone(),
                team: team.clone(),
            },
            status,
            detail,
        })
    }

    async fn apply(
        &self,
        identity: &Identity,
        org: &OrgName,
        team: &TeamSlug,
        target: Target,
    ) -> ReconciliationOutcome {
        info!(identity = %identity, org = %org, team = %team, "Adding member to team");

        let reply = self.client.set_team_membership(org, team, identity).await;

        match interpret_membership(CallKind::Mutate, &reply) {
            Interpretation::Applied => ReconciliationOutcome::Applied,
            Interpretation::Satisfied => ReconciliationOutcome::AlreadySatisfied,
            Interpretation::Conflict(reason) => {
                let reread = self.client.get_team_membership(org, team, identity).await;
                confirm_after_conflict(identity, target, reason, &reread)
            }
            Interpretation::NotFound => rejected(
                identity,
                target,
                reply.status,
                "membership still absent after mutation",
            ),
            Interpretation::Fatal { status, detail } => rejected(identity, target, status, detail),
        }
    }
}
