//! Top-level reconciliation: organization first, then every team

use std::sync::Arc;

use tracing::{info, warn};

use super::{OrgMembershipReconciler, TeamMembershipReconciler};
use crate::domain::directory::DirectoryClient;
use crate::domain::membership::{Identity, OrgName, RunReport, TeamSet};

/// Sequences organization and team reconciliation and aggregates a [`RunReport`]
pub struct MembershipReconciler<C: DirectoryClient + ?Sized> {
    org: OrgMembershipReconciler<C>,
    team: TeamMembershipReconciler<C>,
}

impl<C: DirectoryClient + ?Sized> MembershipReconciler<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            org: OrgMembershipReconciler::new(Arc::clone(&client)),
            team: TeamMembershipReconciler::new(client),
        }
    }

    /// Onboard `identity` into `org` and every team of `teams`, in order
    ///
    /// A hard failure on the organization leaves the team section empty.
    /// Team outcomes never influence each other.
    pub async fn run(&self, identity: &Identity, org: &OrgName, teams: &TeamSet) -> RunReport {
        info!(identity = %identity, org = %org, teams = teams.len(), "Starting onboarding");

        let org_outcome = self.org.ensure(identity, org).await;
        let stop = org_outcome.is_hard_failure();
        let mut report = RunReport::new(identity.clone(), org.clone(), org_outcome);

        if stop {
            warn!(identity = %identity, org = %org, "Organization failed, teams not attempted");
            return report;
        }

        for team in teams {
            let outcome = self.team.ensure(identity, org, team).await;
            report.record_team(team.clone(), outcome);
        }

        info!(
            identity = %identity,
            org = %org,
            success = report.is_success(),
            "Onboarding finished"
        );

        report
    }
}
