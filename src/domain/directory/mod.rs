//! Directory service domain: the client seam and the reading of its replies

mod client;
mod reply;
mod status;

#[cfg(test)]
pub mod mock;

pub use client::DirectoryClient;
pub use reply::{DirectoryError, DirectoryReply, RemoteStatus};
pub use status::{interpret, interpret_lookup, interpret_membership, CallKind, Interpretation};

#[cfg(test)]
pub use client::MockDirectoryClient;
#[cfg(test)]
pub use mock::InMemoryDirectory;
