mod client;
mod commands;
mod dispatch;
mod error;
mod render;

use std::process::ExitCode;

use bms_kernel::settings::Settings;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use client::ApiClient;
use commands::Cli;
use error::ClientError;

#[tokio::main]
async fn main() -> ExitCode {
    // Stdout carries command output only; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let ClientError::Server { status_code, .. } = &err {
                tracing::debug!(status_code, "server rejected the command");
            }
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, ClientError> {
    let server_url = match cli.server {
        Some(url) => url,
        None => {
            Settings::load()
                .map_err(ClientError::Settings)?
                .client
                .server_url
        }
    };

    let plan = dispatch::plan(&cli.command)?;
    let response = ApiClient::new(server_url).execute(&plan).await?;
    render::render(response, plan.render)
}
