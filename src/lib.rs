//! org-onboard
//!
//! Idempotent onboarding of a person into a directory organization and a set
//! of its teams:
//! - Reads current membership before acting and only mutates what is missing
//! - Keeps going past per-team failures and reports every outcome
//! - Ships a GitHub (Enterprise) REST implementation of the directory client

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{MembershipReconciler, RunReport};
