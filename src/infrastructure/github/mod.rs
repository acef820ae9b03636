//! GitHub implementation of the directory client

mod client;

pub use client::{api_base_url, GitHubClientConfig, GitHubDirectoryClient};
