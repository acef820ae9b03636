//! add-member command - onboards one identity into an organization and its teams

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};

use crate::config::{AppConfig, DirectoryConfig};
use crate::domain::{Identity, MembershipReconciler, OrgName, RunReport, TeamSet, TeamSlug};
use crate::infrastructure::github::{GitHubClientConfig, GitHubDirectoryClient};
use crate::infrastructure::logging;

/// How the run report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the add-member command
#[derive(Args, Debug, Clone)]
pub struct AddMemberArgs {
    /// URL of the GitHub Enterprise instance
    #[arg(value_name = "URL")]
    pub url: String,

    /// Token to authenticate to the directory
    #[arg(value_name = "TOKEN")]
    pub token: String,

    /// New member's login, email address or LAN ID
    #[arg(value_name = "USER")]
    pub user: Identity,

    /// Organization for the new member
    #[arg(value_name = "ORG")]
    pub org: OrgName,

    /// Teams to add the new member to
    #[arg(value_name = "TEAMS")]
    pub teams: Vec<TeamSlug>,

    /// Timeout in seconds
    #[arg(
        long = "tlsconfig.handshake-timeout",
        env = "GHTOKEN_TIMEOUT",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub handshake_timeout: Option<u64>,

    /// Allow insecure connections
    #[arg(long = "tlsconfig.insecure-skip-verify", env = "GHTOKEN_INSECURE_SKIP_VERIFY")]
    pub insecure_skip_verify: bool,

    /// Proxy URL
    #[arg(long = "tlsconfig.proxy", env = "GHTOKEN_PROXY", value_name = "URL")]
    pub proxy: Option<String>,

    /// Debugging output
    #[arg(long)]
    pub debug: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl AddMemberArgs {
    /// Command line values win over configuration files and `ONBOARD__*` variables
    pub fn client_config(&self, directory: &DirectoryConfig) -> GitHubClientConfig {
        let timeout = self
            .handshake_timeout
            .unwrap_or_else(|| directory.effective_timeout_secs());
        let mut config = GitHubClientConfig::new(&self.url, &self.token)
            .with_timeout(Duration::from_secs(timeout))
            .with_insecure_skip_verify(self.insecure_skip_verify || directory.insecure_skip_verify);

        if let Some(proxy) = self.proxy.as_ref().or(directory.proxy.as_ref()) {
            config = config.with_proxy(proxy.as_str());
        }

        config
    }

    pub fn team_set(&self) -> TeamSet {
        self.teams.iter().cloned().collect()
    }
}

/// Run the add-member command
pub async fn run(args: AddMemberArgs) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if args.debug {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config);

    let client = GitHubDirectoryClient::new(args.client_config(&config.directory))?;
    let reconciler = MembershipReconciler::new(Arc::new(client));

    let report = reconciler
        .run(&args.user, &args.org, &args.team_set())
        .await;

    println!("{}", render(&report, args.output)?);

    match report.first_hard_failure() {
        Some(failure) => {
            eprintln!("error: {}", failure);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });
}

fn render(report: &RunReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string().trim_end().to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
