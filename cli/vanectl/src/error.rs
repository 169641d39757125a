//! Error handling and display for the CLI.

use colored::Colorize;
use vane_console::{GatewayError, ReloadError};

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(gateway_err) = err.downcast_ref::<GatewayError>() {
        print_gateway_hint(gateway_err);
    } else if let Some(reload_err) = err.downcast_ref::<ReloadError>() {
        match reload_err {
            ReloadError::InProgress => {
                eprintln!(
                    "\n{}",
                    "Hint: Wait for the running reload to finish, then retry.".yellow()
                );
            }
            ReloadError::Gateway(e) => print_gateway_hint(e),
        }
    }
}

fn print_gateway_hint(err: &GatewayError) {
    match err {
        GatewayError::Transport(_) => {
            eprintln!(
                "\n{}",
                "Hint: Check your network connection and the gateway URL.".yellow()
            );
        }
        GatewayError::Rejected { status, .. } if *status == 404 => {
            eprintln!(
                "\n{}",
                "Hint: Run `vane routes list` to see the known routes.".yellow()
            );
        }
        _ => {}
    }
}
