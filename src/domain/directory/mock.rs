//! In-memory directory for testing

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::DirectoryClient;
use super::reply::{DirectoryError, DirectoryReply, RemoteStatus};
use crate::domain::membership::{
    Identity, MembershipInfo, MembershipState, OrgInfo, OrgName, TeamInfo, TeamSlug,
};

type TeamKey = (String, String);
type OrgMemberKey = (String, String);
type TeamMemberKey = (String, String, String);

/// A directory held in memory, answering the way the remote service does:
/// a missing membership and a missing parent resource both read as not found.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    orgs: RwLock<HashSet<String>>,
    teams: RwLock<HashSet<TeamKey>>,
    org_members: RwLock<HashMap<OrgMemberKey, MembershipState>>,
    team_members: RwLock<HashMap<TeamMemberKey, MembershipState>>,
    failing_teams: RwLock<HashMap<TeamKey, u16>>,
    org_mutation_state: RwLock<Option<MembershipState>>,
    unreachable: RwLock<bool>,
    mutations: AtomicUsize,
    reads: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(self, org: &str) -> Self {
        self.orgs.write().unwrap().insert(org.to_string());
        self
    }

    pub fn with_team(self, org: &str, team: &str) -> Self {
        self.teams
            .write()
            .unwrap()
            .insert((org.to_string(), team.to_string()));
        self
    }

    pub fn with_org_member(self, org: &str, identity: &str, state: MembershipState) -> Self {
        self.org_members
            .write()
            .unwrap()
            .insert((org.to_string(), identity.to_string()), state);
        self
    }

    pub fn with_team_member(
        self,
        org: &str,
        team: &str,
        identity: &str,
        state: MembershipState,
    ) -> Self {
        self.team_members.write().unwrap().insert(
            (org.to_string(), team.to_string(), identity.to_string()),
            state,
        );
        self
    }

    /// Every call touching this team answers with the given status code
    pub fn with_failing_team(self, org: &str, team: &str, code: u16) -> Self {
        self.failing_teams
            .write()
            .unwrap()
            .insert((org.to_string(), team.to_string()), code);
        self
    }

    /// State the org membership ends up in after a mutation
    pub fn with_org_mutation_state(self, state: MembershipState) -> Self {
        *self.org_mutation_state.write().unwrap() = Some(state);
        self
    }

    /// Every call fails without a response
    pub fn unreachable(self) -> Self {
        *self.unreachable.write().unwrap() = true;
        self
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn org_state(&self, org: &str, identity: &str) -> Option<MembershipState> {
        self.org_members
            .read()
            .unwrap()
            .get(&(org.to_string(), identity.to_string()))
            .cloned()
    }

    pub fn team_state(&self, org: &str, team: &str, identity: &str) -> Option<MembershipState> {
        self.team_members
            .read()
            .unwrap()
            .get(&(org.to_string(), team.to_string(), identity.to_string()))
            .cloned()
    }

    fn is_unreachable(&self) -> bool {
        *self.unreachable.read().unwrap()
    }

    fn has_org(&self, org: &OrgName) -> bool {
        self.orgs.read().unwrap().contains(org.as_str())
    }

    fn has_team(&self, org: &OrgName, team: &TeamSlug) -> bool {
        self.teams
            .read()
            .unwrap()
            .contains(&(org.to_string(), team.to_string()))
    }

    fn team_failure<T>(&self, org: &OrgName, team: &TeamSlug) -> Option<DirectoryReply<T>> {
        self.failing_teams
            .read()
            .unwrap()
            .get(&(org.to_string(), team.to_string()))
            .map(|code| {
                DirectoryReply::failed(
                    RemoteStatus::Other(*code),
                    DirectoryError::Remote(format!("injected failure {}", code)),
                )
            })
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn get_organization(&self, org: &OrgName) -> DirectoryReply<OrgInfo> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        if !self.has_org(org) {
            return DirectoryReply::not_found();
        }

        DirectoryReply::ok(OrgInfo {
            login: org.to_string(),
        })
    }

    async fn get_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        match self.org_state(org.as_str(), identity.as_str()) {
            Some(state) if self.has_org(org) => DirectoryReply::ok(MembershipInfo::new(state)),
            _ => DirectoryReply::not_found(),
        }
    }

    async fn set_org_membership(
        &self,
        identity: &Identity,
        org: &OrgName,
    ) -> DirectoryReply<MembershipInfo> {
        self.mutations.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        if !self.has_org(org) {
            return DirectoryReply::not_found();
        }

        let state = self
            .org_mutation_state
            .read()
            .unwrap()
            .clone()
            .unwrap_or(MembershipState::Active);

        self.org_members
            .write()
            .unwrap()
            .insert((org.to_string(), identity.to_string()), state.clone());

        DirectoryReply::ok(MembershipInfo::new(state).with_role("member"))
    }

    async fn get_team(&self, org: &OrgName, team: &TeamSlug) -> DirectoryReply<TeamInfo> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        if let Some(failure) = self.team_failure(org, team) {
            return failure;
        }

        if !self.has_team(org, team) {
            return DirectoryReply::not_found();
        }

        DirectoryReply::ok(TeamInfo {
            slug: team.to_string(),
            name: None,
        })
    }

    async fn get_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        if let Some(failure) = self.team_failure(org, team) {
            return failure;
        }

        match self.team_state(org.as_str(), team.as_str(), identity.as_str()) {
            Some(state) if self.has_team(org, team) => {
                DirectoryReply::ok(MembershipInfo::new(state))
            }
            _ => DirectoryReply::not_found(),
        }
    }

    async fn set_team_membership(
        &self,
        org: &OrgName,
        team: &TeamSlug,
        identity: &Identity,
    ) -> DirectoryReply<MembershipInfo> {
        self.mutations.fetch_add(1, Ordering::SeqCst);

        if self.is_unreachable() {
            return DirectoryReply::transport("connection refused");
        }

        if let Some(failure) = self.team_failure(org, team) {
            return failure;
        }

        if !self.has_team(org, team) {
            return DirectoryReply::not_found();
        }

        self.team_members.write().unwrap().insert(
            (org.to_string(), team.to_string(), identity.to_string()),
            MembershipState::Active,
        );

        DirectoryReply::ok(MembershipInfo::active().with_role("member"))
    }
}
