// ABOUTME: Main entry point for the ghi application
// ABOUTME: Builds the client from the environment and dispatches subcommands

use std::env;
use std::process::ExitCode;

use clap::Parser;
use ghi_cli::cli::Cli;
use ghi_cli::cli_output::CliOutput;
use ghi_cli::commands::{self, Context};
use ghi_cli::config::Config;
use ghi_sdk::{GhClient, GhError, Repo};
use secrecy::SecretString;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb";
    let out = CliOutput::with_color(use_color);

    match run(cli, use_color).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            out.error(&err.to_string());
            if let Some(gh_err) = err.downcast_ref::<GhError>() {
                if let Some(help) = gh_err.help_text() {
                    out.info(help);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, use_color: bool) -> anyhow::Result<()> {
    let token = env::var("GITHUB_TOKEN").map_err(|_| {
        anyhow::anyhow!(
            "GITHUB_TOKEN environment variable is not set\n\
             Create a token at https://github.com/settings/tokens and export GITHUB_TOKEN"
        )
    })?;

    let config = Config::load()?;

    let auth_token = SecretString::new(token.into_boxed_str());
    let client = match &config.api_url {
        Some(api_url) => GhClient::builder()
            .auth_token(auth_token)
            .base_url(api_url.clone())
            .build()?,
        None => GhClient::builder().auth_token(auth_token).build()?,
    };

    let repo_override = cli
        .repo
        .as_deref()
        .map(|value| value.parse::<Repo>())
        .transpose()?;

    let ctx = Context::new(client, config, repo_override, use_color);
    commands::dispatch(&ctx, cli.command).await
}
