//! Download command implementation

use crate::cli::DownloadArgs;
use crate::commands::Context;
use crate::commands::helpers::display_path;
use crate::error::Result;

/// Run download command
pub fn run(ctx: &Context, args: DownloadArgs) -> Result<()> {
    let artifact = ctx.download(&args.fetch)?;
    println!("{}", display_path(&artifact.path));
    Ok(())
}
