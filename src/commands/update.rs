//! Update command implementation
//!
//! The full run, in order:
//! 1. Download the translation (fatal on failure)
//! 2. Install it into the game directory (fatal on failure)
//! 3. Register the language in gameinfo.gi (warning on failure)
//! 4. Print the Steam launch option
//! 5. Start the game unless disabled (warning on failure)

use console::Term;
use tracing::{error, info, warn};

use crate::cli::UpdateArgs;
use crate::commands::Context;
use crate::commands::helpers::display_path;
use crate::commands::install::install_and_patch;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::launch;

/// Run update command
pub fn run(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let request = ctx.download_request(&args.fetch);
    let result = ctx
        .transport_for(&request)
        .and_then(|transport| update_with(ctx, &transport, &args));

    if let Err(e) = &result {
        error!("Update failed: {e}");
    }
    result
}

/// Run the update with an explicit transport
pub fn update_with<T: HttpTransport>(
    ctx: &Context,
    transport: &T,
    args: &UpdateArgs,
) -> Result<()> {
    info!("Deadlock Traditional-Chinese translation updater");
    info!(game_dir = %display_path(&ctx.game_root), "Starting update");

    let artifact = ctx.download_with(transport, &ctx.download_request(&args.fetch))?;
    if artifact.reused {
        info!(path = %display_path(&artifact.path), "Using existing download");
    } else {
        info!(path = %display_path(&artifact.path), bytes = artifact.byte_size, "Downloaded");
    }

    let installed = install_and_patch(ctx, &artifact.path)?;
    info!(files = installed.files.len(), "Translation installed");

    if let Some(option) = launch::current_launch_option() {
        info!("Copy this into the Steam launch options for Deadlock:");
        info!("{option}");
    }

    if ctx.config.auto_launch && !args.no_auto_launch {
        if let Err(e) = launch::launch(&ctx.game_root, &args.game_args) {
            warn!("Could not start the game, please start it manually: {e}");
        }
    }

    Ok(())
}

/// Wait for Enter so a window opened by Steam stays up until the error is read
pub fn pause() {
    let term = Term::stderr();
    if term.write_line("Press Enter to close...").is_ok() {
        let _ = term.read_line();
    }
}
