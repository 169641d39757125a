//! CLI commands.

mod apply;
mod config;
mod health;
mod routes;
mod status;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use vane_console::{Console, GatewayClient, MonitorConfig, ReloaderConfig};

use crate::config::Config as CliConfig;
use crate::output::OutputFormat;

/// vane CLI - author routing rules and converge the proxy onto them.
#[derive(Debug, Parser)]
#[command(name = "vane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Gateway base URL.
    #[arg(long, global = true, env = "VANE_GATEWAY_URL")]
    gateway_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage routes (the desired routing rules).
    Routes(routes::RoutesCommand),

    /// Show which routes differ from what the proxy is enforcing.
    Status(status::StatusCommand),

    /// Reload the proxy so it picks up pending route changes.
    Apply(apply::ApplyCommand),

    /// Show or watch per-route health.
    Health(health::HealthCommand),

    /// Export/import route configuration and manage CLI settings.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let config = CliConfig::load()?;

        let ctx = CommandContext {
            config,
            format,
            gateway_url: self.gateway_url,
        };

        match self.command {
            Commands::Routes(cmd) => cmd.run(ctx).await,
            Commands::Status(cmd) => cmd.run(ctx).await,
            Commands::Apply(cmd) => cmd.run(ctx).await,
            Commands::Health(cmd) => cmd.run(ctx).await,
            Commands::Config(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("vane {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: CliConfig,
    pub format: OutputFormat,
    pub gateway_url: Option<String>,
}

impl CommandContext {
    /// Resolve the gateway URL, preferring the flag over the config file.
    pub fn gateway_url(&self) -> &str {
        self.gateway_url
            .as_deref()
            .unwrap_or(&self.config.gateway_url)
    }

    /// Assemble a console session against the gateway.
    pub fn console(&self) -> Result<Console> {
        let client = GatewayClient::new(self.gateway_url())?;
        Ok(Console::new(client))
    }

    /// Assemble a console with a custom health polling interval.
    pub fn console_with_poll_interval(&self, poll_interval: Duration) -> Result<Console> {
        let client = GatewayClient::new(self.gateway_url())?;
        Ok(Console::with_config(
            client,
            ReloaderConfig::default(),
            MonitorConfig { poll_interval },
        ))
    }
}
