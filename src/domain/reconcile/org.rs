//! Organization membership reconciliation

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{confirm_after_conflict, rejected};
use crate::domain::directory::{
    interpret_lookup, interpret_membership, CallKind, DirectoryClient, Interpretation,
};
use crate::domain::membership::{HardFailure, Identity, OrgName, ReconciliationOutcome, Target};

/// Ensures an identity is an active member of an organization
pub struct OrgMembershipReconciler<C: DirectoryClient + ?Sized> {
    client: Arc<C>,
}

impl<C: DirectoryClient + ?Sized> OrgMembershipReconciler<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Check the current membership and add the identity only when it is absent
    pub async fn ensure(&self, identity: &Identity, org: &OrgName) -> ReconciliationOutcome {
        let read = self.client.get_org_membership(identity, org).await;
        let current = interpret_membership(CallKind::Read, &read);
        debug!(
            identity = %identity,
            org = %org,
            status = ?read.status,
            interpretation = ?current,
            "Read organization membership"
        );

        let outcome = match current {
            Interpretation::Satisfied | Interpretation::Applied => {
                ReconciliationOutcome::AlreadySatisfied
            }
            Interpretation::Conflict(reason) => ReconciliationOutcome::soft(reason),
            Interpretation::Fatal { status, detail } => {
                ReconciliationOutcome::hard(HardFailure::OrganizationUnreachable {
                    org: org.clone(),
                    status,
                    detail,
                })
            }
            Interpretation::NotFound => match self.lookup(org).await {
                Some(failure) => ReconciliationOutcome::hard(failure),
                None => self.apply(identity, org).await,
            },
        };

        match &outcome {
            ReconciliationOutcome::HardFailure { failure } => {
                warn!(
                    identity = %identity,
                    org = %org,
                    error = %failure,
                    "Organization membership failed"
                );
            }
            other => {
                info!(
                    identity = %identity,
                    org = %org,
                    outcome = %other,
                    "Organization membership reconciled"
                );
            }
        }

        outcome
    }

    /// Tell "not a member" apart from "no such organization"
    async fn lookup(&self, org: &OrgName) -> Option<HardFailure> {
        let reply = self.client.get_organization(org).await;

        match interpret_lookup(&reply) {
            Interpretation::Satisfied | Interpretation::Applied => None,
            Interpretation::NotFound => {
                Some(HardFailure::OrganizationNotFound { org: org.clone() })
            }
            Interpretation::Conflict(detail) => Some(HardFailure::OrganizationUnreachable {
                org: org.clone(),
                status: reply.status,
                detail,
            }),
            Interpretation::Fatal { status, detail } => {
                Some(HardFailure::OrganizationUnreachable {
                    org: org.clone(),
                    status,
                    detail,
                })
            }
        }
    }

    async fn apply(&self, identity: &Identity, org: &OrgName) -> ReconciliationOutcome {
        info!(identity = %identity, org = %org, "Adding member to organization");

        let target = Target::Organization { org: org.clone() };
        let reply = self.client.set_org_membership(identity, org).await;

        match interpret_membership(CallKind::Mutate, &reply) {
            Interpretation::Applied => ReconciliationOutcome::Applied,
            Interpretation::Satisfied => ReconciliationOutcome::AlreadySatisfied,
            Interpretation::Conflict(reason) => {
                let reread = self.client.get_org_membership(identity, org).await;
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
