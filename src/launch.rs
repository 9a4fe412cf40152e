//! Game launching

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::error::{Result, launch};

/// Location of the game executable relative to the game root
pub fn game_executable(game_root: &Path) -> PathBuf {
    game_root
        .join("game")
        .join("bin")
        .join("win64")
        .join("deadlock.exe")
}

/// Start the game with `args` and return without waiting for it
pub fn launch(game_root: &Path, args: &[String]) -> Result<()> {
    let exe = game_executable(game_root);
    if !exe.is_file() {
        return Err(launch::not_found(exe.display().to_string()));
    }

    info!(exe = %exe.display(), ?args, "Launching Deadlock");
    Command::new(&exe)
        .args(args)
        .current_dir(game_root)
        .spawn()
        .map_err(|e| launch::failed(exe.display().to_string(), e))?;

    Ok(())
}

/// Steam launch option that runs this tool before the game
pub fn launch_option_hint(exe: &Path) -> String {
    format!("\"{}\" update -- %command%", exe.display())
}

/// [`launch_option_hint`] for the running executable, if it can be located
pub fn current_launch_option() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    Some(launch_option_hint(&exe))
}
