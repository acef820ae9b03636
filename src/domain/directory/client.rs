//! Directory client trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::reply::DirectoryReply;
use crate::domain::membership::{Identity, MembershipInfo, OrgInfo, OrgName, TeamInfo, TeamSlug};

/// Authenticated handle onto the directory service
///
/// Every call returns a [`DirectoryReply`]; implementations never fail
/// outside of it. Deadlines and retries, if any, belong to the implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Look up an organization
    async fn get_organization(&self, org: &OrgName) -> DirectoryReply<OrgInfo>;

    /// Read the membership of `identity` in `org`
    async fn get_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo>;

    /// Ensure `identity` is an active member of `org`
    async fn set_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo>;

    /// Look up a team inside an organization
    async fn get_team(&self, org: &OrgName, team: &TeamSlug) -> DirectoryReply<TeamInfo>;

    /// Read the membership of `identity` in `team`
    async fn get_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo>;

    /// Ensure `identity` is an active member of `team`
    async fn set_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo>;
}
