//! Membership domain module
//!
//! A person belongs to an organization and, inside it, to teams. Names are
//! validated once on the way in; outcomes are collected into a [`RunReport`].

mod entity;
mod outcome;
mod validation;

pub use entity::{
    Identity, MembershipInfo, MembershipState, OrgInfo, OrgName, TeamInfo, TeamSet, TeamSlug,
};
pub use outcome::{HardFailure, ReconciliationOutcome, RunReport, Target, TeamOutcome};
pub use validation::{validate_name, NameValidationError};
