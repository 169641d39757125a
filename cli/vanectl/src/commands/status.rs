//! Status command: the desired/applied diff.

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use vane_model::RouteId;
use vane_reconcile::ChangeKind;

use crate::output::{print_info, print_output, print_success, OutputFormat};

use super::CommandContext;

/// Status command.
#[derive(Debug, Args)]
pub struct StatusCommand {}

#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "ID")]
    id: i64,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Domain")]
    domain: String,

    #[tabled(rename = "Change")]
    change: String,
}

impl StatusCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let console = ctx.console()?;
        console.refresh_all().await?;

        let store = console.store();
        let diff = store.diff().await;

        // Removed routes only exist in the applied snapshot, so pull
        // display names from both views.
        let desired = store.routes().await;
        let applied = store.applied().await;
        let names: HashMap<RouteId, (String, String)> = applied
            .iter()
            .map(|r| (r.id, (r.name.clone(), r.domain.clone())))
            .chain(
                desired
                    .iter()
                    .map(|r| (r.id, (r.name.clone(), r.domain.clone()))),
            )
            .collect();

        let rows: Vec<StatusRow> = diff
            .iter()
            .map(|(id, kind)| {
                let (name, domain) = names.get(id).cloned().unwrap_or_default();
                StatusRow {
                    id: id.value(),
                    name,
                    domain,
                    change: kind.to_string(),
                }
            })
            .collect();

        match ctx.format {
            OutputFormat::Json => print_output(&rows, ctx.format),
            OutputFormat::Table => {
                if rows.is_empty() {
                    print_success("Desired and applied state are in sync.");
                } else {
                    print_output(&rows, ctx.format);
                    let pending = rows
                        .iter()
                        .filter(|row| row.change != ChangeKind::Removed.to_string())
                        .count();
                    let removals = rows.len() - pending;
                    print_info(&format!(
                        "{} change(s) pending ({} removal(s)). Run `vane apply` to converge.",
                        rows.len(),
                        removals
                    ));
                }
            }
        }

        Ok(())
    }
}
