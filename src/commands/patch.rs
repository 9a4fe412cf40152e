//! Patch command implementation

use crate::commands::Context;
use crate::commands::helpers::display_path;
use crate::error::Result;
use crate::installer::gameinfo::{self, PatchOutcome, gameinfo_path};

/// Run patch command
pub fn run(ctx: &Context) -> Result<()> {
    let path = display_path(&gameinfo_path(&ctx.game_root));
    match gameinfo::apply(&ctx.game_root, &ctx.config.language)? {
        PatchOutcome::Inserted(_) => println!("Added \"{}\" to {path}", ctx.config.language.key),
        PatchOutcome::AlreadyPresent => {
            println!("{path} already lists \"{}\"", ctx.config.language.key);
        }
    }
    Ok(())
}
