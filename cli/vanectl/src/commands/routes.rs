//! Routes command (desired routing rules).

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use vane_model::{Route, RouteDraft, RouteId};

use crate::output::{print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Routes command.
#[derive(Debug, Args)]
pub struct RoutesCommand {
    #[command(subcommand)]
    command: RoutesSubcommand,
}

#[derive(Debug, Subcommand)]
enum RoutesSubcommand {
    /// List routes with their sync and health state.
    List,

    /// Get a single route.
    Get(GetRouteArgs),

    /// Create a route.
    Create(CreateRouteArgs),

    /// Update a route's fields.
    Update(UpdateRouteArgs),

    /// Delete a route.
    Delete(DeleteRouteArgs),

    /// Flip a route's enabled flag.
    Toggle(ToggleRouteArgs),
}

#[derive(Debug, Args)]
struct GetRouteArgs {
    /// Route ID.
    id: RouteId,
}

#[derive(Debug, Args)]
struct CreateRouteArgs {
    /// Display name.
    #[arg(long)]
    name: String,

    /// Domain to match.
    #[arg(long)]
    domain: String,

    /// Upstream target (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    target: String,

    /// Create the route disabled.
    #[arg(long, default_value_t = false)]
    disabled: bool,
}

#[derive(Debug, Args)]
struct UpdateRouteArgs {
    /// Route ID.
    id: RouteId,

    /// Display name.
    #[arg(long)]
    name: Option<String>,

    /// Domain to match.
    #[arg(long)]
    domain: Option<String>,

    /// Upstream target.
    #[arg(long)]
    target: Option<String>,

    /// Enabled flag.
    #[arg(long)]
    enabled: Option<bool>,
}

#[derive(Debug, Args)]
struct DeleteRouteArgs {
    /// Route ID.
    id: RouteId,
}

#[derive(Debug, Args)]
struct ToggleRouteArgs {
    /// Route ID.
    id: RouteId,
}

#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    #[tabled(rename = "ID")]
    id: i64,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Domain")]
    domain: String,

    #[tabled(rename = "Target")]
    target: String,

    #[tabled(rename = "Enabled")]
    enabled: bool,

    #[tabled(rename = "Sync")]
    sync: String,

    #[tabled(rename = "Health")]
    health: String,
}

impl RoutesCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            RoutesSubcommand::List => list_routes(ctx).await,
            RoutesSubcommand::Get(args) => get_route(ctx, args).await,
            RoutesSubcommand::Create(args) => create_route(ctx, args).await,
            RoutesSubcommand::Update(args) => update_route(ctx, args).await,
            RoutesSubcommand::Delete(args) => delete_route(ctx, args).await,
            RoutesSubcommand::Toggle(args) => toggle_route(ctx, args).await,
        }
    }
}

fn apply_reminder() {
    crate::output::print_info("Run `vane apply` to make the change live.");
}

async fn list_routes(ctx: CommandContext) -> Result<()> {
    let console = ctx.console()?;
    console.refresh_all().await?;
    // Best-effort; the listing still renders without health data.
    console.monitor().poll_once().await;

    let store = console.store();
    let diff = store.diff().await;

    let mut rows = Vec::new();
    for route in store.routes().await {
        let sync = match diff.get(&route.id) {
            Some(kind) => kind.as_str().to_string(),
            None => "in sync".to_string(),
        };
        rows.push(RouteRow {
            id: route.id.value(),
            name: route.name,
            domain: route.domain,
            target: route.target,
            enabled: route.enabled,
            sync,
            health: store.health_indicator(route.id).await.summary().to_string(),
        });
    }

    print_output(&rows, ctx.format);

    if matches!(ctx.format, OutputFormat::Table) && store.has_unapplied_changes().await {
        apply_reminder();
    }

    Ok(())
}

async fn get_route(ctx: CommandContext, args: GetRouteArgs) -> Result<()> {
    let console = ctx.console()?;
    let route: Route = console.client().get_route(args.id).await?;

    print_single(&route, ctx.format);
    Ok(())
}

async fn create_route(ctx: CommandContext, args: CreateRouteArgs) -> Result<()> {
    let console = ctx.console()?;
    let draft = RouteDraft {
        name: args.name,
        domain: args.domain,
        target: args.target,
        enabled: !args.disabled,
    };

    let route = console.create_route(&draft).await?;

    print_success(&format!(
        "Created route '{}' ({}) for {} -> {}",
        route.name, route.id, route.domain, route.target
    ));
    apply_reminder();

    Ok(())
}

async fn update_route(ctx: CommandContext, args: UpdateRouteArgs) -> Result<()> {
    let console = ctx.console()?;

    // The gateway replaces the whole record, so overlay the provided
    // fields onto the current ones.
    let current = console.client().get_route(args.id).await?;
    let mut draft = RouteDraft::from(&current);
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(domain) = args.domain {
        draft.domain = domain;
    }
    if let Some(target) = args.target {
        draft.target = target;
    }
    if let Some(enabled) = args.enabled {
        draft.enabled = enabled;
    }

    let route = console.update_route(args.id, &draft).await?;

    print_success(&format!("Updated route '{}' ({})", route.name, route.id));
    apply_reminder();

    Ok(())
}

async fn delete_route(ctx: CommandContext, args: DeleteRouteArgs) -> Result<()> {
    let console = ctx.console()?;
    console.delete_route(args.id).await?;

    print_success(&format!("Deleted route {}", args.id));
    apply_reminder();

    Ok(())
}

async fn toggle_route(ctx: CommandContext, args: ToggleRouteArgs) -> Result<()> {
    let console = ctx.console()?;
    let route = console.toggle_route(args.id).await?;

    let state = if route.enabled { "enabled" } else { "disabled" };
    print_success(&format!("Route '{}' is now {}", route.name, state));
    apply_reminder();

    Ok(())
}
