//! Health command: one-shot report or periodic watch.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use vane_console::Console;

use crate::output::{print_info, print_output, OutputFormat};

use super::CommandContext;

/// Health command.
#[derive(Debug, Args)]
pub struct HealthCommand {
    /// Keep polling and redraw on every interval until Ctrl-C.
    #[arg(long)]
    watch: bool,

    /// Poll interval in seconds when watching.
    #[arg(long, default_value_t = 30)]
    interval: u64,
}

#[derive(Debug, Serialize, Tabled)]
struct HealthRow {
    #[tabled(rename = "ID")]
    id: i64,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Domain")]
    domain: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Detail")]
    detail: String,
}

impl HealthCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let console = ctx.console_with_poll_interval(Duration::from_secs(self.interval))?;
        console.refresh_routes().await?;

        if !self.watch {
            console.monitor().poll_once().await;
            print_health(&console, ctx.format).await;
            return Ok(());
        }

        console.monitor().start().await;

        loop {
            print_health(&console, ctx.format).await;

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(self.interval)) => {}
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        console.monitor().stop().await;
        println!();
        print_info("Health watch stopped.");

        Ok(())
    }
}

async fn print_health(console: &Console, format: OutputFormat) {
    let store = console.store();

    let mut rows = Vec::new();
    for route in store.routes().await {
        rows.push(HealthRow {
            id: route.id.value(),
            name: route.name,
            domain: route.domain,
            status: store.health_indicator(route.id).await.summary().to_string(),
            detail: store.health_detail(route.id).await,
        });
    }

    print_output(&rows, format);
}
