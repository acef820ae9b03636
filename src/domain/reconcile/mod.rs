//! Membership reconciliation
//!
//! Compares the desired membership with what the directory reports and
//! issues the minimal mutation to converge them. Organization first, then
//! each team independently.

mod orchestrator;
mod org;
mod team;

pub use orchestrator::MembershipReconciler;
pub use org::OrgMembershipReconciler;
pub use team::TeamMembershipReconciler;

use crate::domain::directory::{
    interpret_membership, CallKind, DirectoryReply, Interpretation, RemoteStatus,
};
use crate::domain::membership::{
    HardFailure, Identity, MembershipInfo, ReconciliationOutcome, Target,
};

fn rejected(
    identity: &Identity,
    target: Target,
    status: Option<RemoteStatus>,
    detail: impl Into<String>,
) -> ReconciliationOutcome {
    ReconciliationOutcome::hard(HardFailure::Rejected {
        identity: identity.clone(),
        target,
        status,
        detail: detail.into(),
    })
}

/// Settle a conflicting add with the membership read back afterwards.
/// The existing state wins when it is active.
fn confirm_after_conflict(
    identity: &Identity,
    target: Target,
    reason: String,
    reread: &DirectoryReply<MembershipInfo>,
) -> ReconciliationOutcome {
    match interpret_membership(CallKind::Read, reread) {
        Interpretation::Satisfied => ReconciliationOutcome::soft(format!(
            "concurrent add already applied ({})",
            reason
        )),
        _ => rejected(
            identity,
            target,
            Some(RemoteStatus::Conflict),
            format!("{}; membership not active afterwards", reason),
        ),
    }
}
