//! Command implementations for the recalls processor CLI
//!
//! Each command is implemented in its own module; this module dispatches
//! based on the parsed arguments.

pub mod check;
pub mod shared;
pub mod update;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the recalls processor
///
/// Dispatches to the appropriate subcommand handler:
/// - `update`: the full data-update pipeline against the recalls backend
/// - `check`: local parse-and-validate report for a CSV export
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    match command {
        Commands::Update(update_args) => update::run_update(update_args).await,
        Commands::Check(check_args) => check::run_check(check_args).await,
    }
}
