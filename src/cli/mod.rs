use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::clients::linkedin::LinkedInRemote;
use crate::core::content::pretty;
use crate::domain::NetworkApi;
use crate::infra::config::Config;
use crate::infra::logging::component_span;
use crate::infra::mcp::{serve_stdio, LinkedInSvc};
use crate::tools::catalogue::{RESOURCES, TOOLS};
use crate::tools::dispatcher::Dispatcher;

#[derive(Parser)]
#[command(name = "linkedin-mcp-gateway")]
#[command(about = "LinkedIn MCP Gateway - stdio MCP server for the LinkedIn REST API")]
#[command(version)]
pub struct Cli {
    /// TOML file with an [api] section (base_url, version)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// Test the API connection once and print the result
    Check,
    /// List the tools and resources this server exposes
    Tools,
    /// Validate configuration without contacting the API
    Config,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command.unwrap_or(Commands::Serve), cli.config.as_deref()).await
}

pub async fn run_commands(command: Commands, config_path: Option<&Path>) -> ExitCode {
    match command {
        Commands::Tools => {
            print!("{}", render_catalogue());
            ExitCode::SUCCESS
        }
        Commands::Config => match Config::load(config_path) {
            Ok(cfg) => {
                println!("✅ Configuration is valid");
                println!("  API base URL: {}", cfg.base_url);
                println!("  API version: {}", cfg.api_version);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Check => match remote(config_path) {
            Ok(api) => {
                let status = api.test_connection().await;
                println!("{}", pretty(&status));
                if status.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                eprintln!("❌ {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Serve => match serve(config_path).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "server stopped");
                eprintln!("❌ {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn remote(config_path: Option<&Path>) -> anyhow::Result<LinkedInRemote> {
    let cfg = Config::load(config_path)?;
    tracing::info!(base_url = %cfg.base_url, api_version = %cfg.api_version, "BOOT linkedin-mcp-gateway");
    Ok(LinkedInRemote::from_config(&cfg, component_span("adapter"))?)
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    let api = remote(config_path)?;
    let dispatcher = Dispatcher::new(Arc::new(api), component_span("dispatcher"));
    serve_stdio(LinkedInSvc::new(Arc::new(dispatcher))).await
}

/// Plain-text listing of every advertised tool and resource.
pub fn render_catalogue() -> String {
    let mut out = String::from("Tools:\n");
    for entry in TOOLS.iter().filter(|t| t.listed) {
        out.push_str(&format!("  {} - {}\n", entry.descriptor.name, entry.descriptor.description));
    }
    out.push_str("Resources:\n");
    for entry in RESOURCES {
        out.push_str(&format!("  {} - {}\n", entry.descriptor.uri, entry.descriptor.name));
    }
    out
}
