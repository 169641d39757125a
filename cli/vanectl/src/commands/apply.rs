//! Apply command: trigger the proxy reload.

use anyhow::Result;
use clap::Args;

use crate::output::{print_info, print_success};

use super::CommandContext;

/// Apply command.
#[derive(Debug, Args)]
pub struct ApplyCommand {}

impl ApplyCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let console = ctx.console()?;

        let message = console.reload().await?;
        print_success(&message);

        // The coordinator refreshed both views; report what remains.
        let store = console.store();
        if store.has_unapplied_changes().await {
            print_info(&format!(
                "{} route(s) still out of sync; the gateway may need more time. Re-run `vane status` to check.",
                store.change_set().await.len()
            ));
        }

        Ok(())
    }
}
