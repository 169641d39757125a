//! Config command: export/import routes and CLI settings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use vane_model::RouteDraft;

use crate::output::print_success;

use super::CommandContext;

/// Config command.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Export the gateway's route configuration as JSON.
    Export(ExportArgs),

    /// Import route definitions from a JSON file.
    Import(ImportArgs),

    /// Persist the gateway URL in the CLI config file.
    SetGateway(SetGatewayArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// JSON file containing an array of route definitions.
    file: PathBuf,
}

#[derive(Debug, Args)]
struct SetGatewayArgs {
    /// Gateway base URL (e.g. http://localhost:8473).
    url: String,
}

impl ConfigCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Export(args) => export_config(ctx, args).await,
            ConfigSubcommand::Import(args) => import_config(ctx, args).await,
            ConfigSubcommand::SetGateway(args) => set_gateway(ctx, args),
        }
    }
}

async fn export_config(ctx: CommandContext, args: ExportArgs) -> Result<()> {
    let console = ctx.console()?;
    let document = console.export_config().await?;
    let contents = serde_json::to_string_pretty(&document)?;

    match args.output {
        Some(path) => {
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write export to {:?}", path))?;
            print_success(&format!("Exported route configuration to {:?}", path));
        }
        None => println!("{contents}"),
    }

    Ok(())
}

async fn import_config(ctx: CommandContext, args: ImportArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {:?}", args.file))?;
    let drafts: Vec<RouteDraft> = serde_json::from_str(&contents)
        .with_context(|| format!("{:?} is not a valid route export", args.file))?;

    let console = ctx.console()?;
    let ack = console.import_routes(&drafts).await?;

    print_success(&ack.message);
    crate::output::print_info("Run `vane apply` to make the imported routes live.");

    Ok(())
}

fn set_gateway(ctx: CommandContext, args: SetGatewayArgs) -> Result<()> {
    let mut config = ctx.config;
    config.gateway_url = args.url;
    config.save()?;

    print_success(&format!("Gateway URL set to {}", config.gateway_url));
    Ok(())
}
