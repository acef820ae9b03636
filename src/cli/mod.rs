//! CLI module for org-onboard
//!
//! Provides subcommands:
//! - `add-member`: onboard a person into an organization and its teams

pub mod add_member;

use clap::{Parser, Subcommand};

/// org-onboard - Idempotent organization and team onboarding
#[derive(Parser, Debug)]
#[command(name = "org-onboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a member to an organization and a set of its teams
    AddMember(add_member::AddMemberArgs),
}
