//! Infrastructure layer - External service implementations

pub mod github;
pub mod logging;
