use std::process::ExitCode;

use clap::Parser;
use org_onboard::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::AddMember(args) => cli::add_member::run(args).await,
    }
}
