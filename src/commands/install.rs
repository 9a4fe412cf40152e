//! Install command implementation
//!
//! The installation process:
//! 1. Extract the archive into the download directory (zip only)
//! 2. Copy the extracted tree over the game directory
//! 3. Write the install receipt
//! 4. Register the language in gameinfo.gi (failure only warns)

use std::path::Path;

use tracing::warn;

use crate::cli::InstallArgs;
use crate::commands::Context;
use crate::commands::helpers::display_path;
use crate::error::{Result, fs as fs_error};
use crate::installer::{InstalledFileSet, Installer};

/// Run install command
pub fn run(ctx: &Context, args: InstallArgs) -> Result<()> {
    if !args.archive.exists() {
        return Err(fs_error::not_found(display_path(&args.archive)));
    }

    let installed = install_and_patch(ctx, &args.archive)?;
    println!(
        "Installed {} file(s) into {}",
        installed.files.len(),
        display_path(&ctx.game_root)
    );
    Ok(())
}

/// Install `artifact` into the game directory and patch gameinfo.gi.
///
/// Copy failures are returned; a failed patch is logged and the install still
/// counts as successful.
pub fn install_and_patch(ctx: &Context, artifact: &Path) -> Result<InstalledFileSet> {
    let work_dir = ctx.download_dir();
    let installer = Installer::new(&ctx.game_root, &work_dir, &ctx.config.language);
    let installed = installer.install_files(artifact, ctx.progress().as_mut())?;

    if let Err(e) = installer.patch_gameinfo() {
        warn!("Could not update gameinfo.gi, continuing: {e}");
    }

    Ok(installed)
}
