//! Domain layer - Membership model, directory seam and reconciliation logic

pub mod directory;
pub mod error;
pub mod membership;
pub mod reconcile;

pub use directory::{
    interpret, CallKind, DirectoryClient, DirectoryError, DirectoryReply, Interpretation,
    RemoteStatus,
};
pub use error::DomainError;
pub use membership::{
    HardFailure, Identity, MembershipInfo, MembershipState, OrgInfo, OrgName,
    ReconciliationOutcome, RunReport, Target, TeamInfo, TeamOutcome, TeamSet, TeamSlug,
};
pub use reconcile::{MembershipReconciler, OrgMembershipReconciler, TeamMembershipReconciler};
