//! Interpretation of directory replies
//!
//! This is the one place where the directory's status signals are turned
//! into meaning. Reconcilers only ever branch on [`Interpretation`].

use super::reply::{DirectoryError, DirectoryReply, RemoteStatus};
use crate::domain::membership::{MembershipInfo, MembershipState};

/// Which kind of call produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Existence check of an organization or team
    Lookup,
    /// Read of the current membership
    Read,
    /// "Ensure active" membership mutation
    Mutate,
}

/// Semantic meaning of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Relationship (or resource, for lookups) already exists as desired
    Satisfied,
    /// A mutation produced an active membership
    Applied,
    /// Relationship does not exist yet; the precondition for a mutation
    NotFound,
    /// Not confirmed, but safe to continue past
    Conflict(String),
    Fatal {
        status: Option<RemoteStatus>,
        detail: String,
    },
}

impl Interpretation {
    fn fatal(status: Option<RemoteStatus>, detail: impl Into<String>) -> Self {
        Self::Fatal {
            status,
            detail: detail.into(),
        }
    }
}

/// Map a call's error, status and (for membership calls) state onto an interpretation
pub fn interpret(
    call: CallKind,
    error: Option<&DirectoryError>,
    status: Option<RemoteStatus>,
    state: Option<&MembershipState>,
) -> Interpretation {
    let Some(status) = status else {
        let detail = error.map_or_else(|| "no response".to_string(), ToString::to_string);
        return Interpretation::fatal(None, detail);
    };

    match (status, call) {
        (RemoteStatus::NotModified, _) => Interpretation::Satisfied,

        (RemoteStatus::NotFound, CallKind::Lookup | CallKind::Read) => Interpretation::NotFound,
        (RemoteStatus::NotFound, CallKind::Mutate) => Interpretation::fatal(
            Some(status),
            describe(error, "target not found while applying membership"),
        ),

        (RemoteStatus::Conflict, CallKind::Mutate) => {
            Interpretation::Conflict(describe(error, "conflicting membership change"))
        }

        (RemoteStatus::Success, _) if error.is_some() => {
            Interpretation::fatal(Some(status), describe(error, "unreadable response"))
        }

        (RemoteStatus::Success, CallKind::Lookup) => Interpretation::Satisfied,

        (RemoteStatus::Success, CallKind::Read) => match state {
            Some(MembershipState::Active) => Interpretation::Satisfied,
            Some(MembershipState::Pending) => {
                Interpretation::Conflict("invitation pending acceptance".to_string())
            }
            Some(MembershipState::Absent) => Interpretation::NotFound,
            Some(MembershipState::Unknown(raw)) => Interpretation::fatal(
                Some(status),
                format!("unrecognized membership state '{}'", raw),
            ),
            None => Interpretation::fatal(Some(status), "response carried no membership"),
        },

        (RemoteStatus::Success, CallKind::Mutate) => match state {
            Some(MembershipState::Active) => Interpretation::Applied,
            Some(state) => Interpretation::fatal(
                Some(status),
                format!("membership is {} after mutation, expected active", state),
            ),
            None => Interpretation::fatal(Some(status), "mutation returned no membership"),
        },

        (RemoteStatus::Conflict | RemoteStatus::Other(_), _) => {
            Interpretation::fatal(Some(status), describe(error, "unexpected status"))
        }
    }
}

/// Interpret a membership reply
pub fn interpret_membership(
    call: CallKind,
    reply: &DirectoryReply<MembershipInfo>,
) -> Interpretation {
    interpret(
        call,
        reply.error.as_ref(),
        reply.status,
        reply.value.as_ref().map(|info| &info.state),
    )
}

/// Interpret a lookup reply; the looked-up value itself carries no state
pub fn interpret_lookup<T>(reply: &DirectoryReply<T>) -> Interpretation {
    interpret(CallKind::Lookup, reply.error.as_ref(), reply.status, None)
}

fn describe(error: Option<&DirectoryError>, fallback: &str) -> String {
    error.map_or_else(|| fallback.to_string(), ToString::to_string)
}
