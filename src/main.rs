//! deadlock-translator - Deadlock Traditional-Chinese translation updater
//!
//! Finds the community translation linked from a Bahamut forum post, downloads
//! it from the file host, installs it into the game directory and enables the
//! language in gameinfo.gi.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod download;
mod error;
mod filename;
mod hash;
mod http;
mod installer;
mod launch;
mod logging;
mod progress;
mod resolver;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands, UpdateArgs};
use commands::Context;
use commands::helpers::resolve_game_dir;
use config::TranslatorConfig;
use error::Result;

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_else(|| Commands::Update(UpdateArgs::default()));

    match command {
        Commands::Version => return commands::version::run(),
        Commands::Completions(args) => return commands::completions::run(args),
        _ => {}
    }

    let game_root = resolve_game_dir(cli.game_dir)?;
    let config = TranslatorConfig::load(&game_root, cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level).to_string();
    let _guard = logging::init(&game_root, &level)?;

    let ctx = Context::new(game_root, config, cli.quiet);
    match command {
        Commands::Update(args) => commands::update::run(&ctx, args),
        Commands::Download(args) => commands::download::run(&ctx, args),
        Commands::Resolve(args) => commands::resolve::run(&ctx, args),
        Commands::Install(args) => commands::install::run(&ctx, args),
        Commands::Patch => commands::patch::run(&ctx),
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}

/// Whether a failure should wait for Enter once the report is shown.
/// Only `update` (also the default command) runs from a Steam-opened window.
fn pause_on_error(cli: &Cli) -> bool {
    match &cli.command {
        None => true,
        Some(Commands::Update(args)) => !args.no_pause,
        Some(_) => false,
    }
}

fn main() {
    let cli = Cli::parse();
    let pause = pause_on_error(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{:?}", miette::Report::new(e));
        if pause && console::user_attended() {
            commands::update::pause();
        }
        std::process::exit(1);
    }
}
