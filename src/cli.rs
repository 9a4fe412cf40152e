//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deadlock Traditional-Chinese translation updater
///
/// Downloads the community translation linked from the Bahamut forum post,
/// installs it into the game directory and enables it in gameinfo.gi.
#[derive(Parser, Debug)]
#[command(
    name = "deadlock-translator",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Deadlock Traditional-Chinese translation updater",
    long_about = "Downloads the community Traditional-Chinese translation for Deadlock, \
                  copies it into the game directory and registers the language in gameinfo.gi. \
                  Runs `update` when no command is given.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  deadlock-translator\n    \
                  deadlock-translator update --no-auto-launch\n    \
                  deadlock-translator -g \"C:/Steam/steamapps/common/Deadlock\" update\n    \
                  deadlock-translator install downloads/taiwan_translation.zip\n\n\
                  \x1b[1m\x1b[32mSteam launch option:\x1b[0m\n    \
                  \"<path to deadlock-translator.exe>\" update -- %command%"
)]
pub struct Cli {
    /// Deadlock install directory (defaults to current directory)
    #[arg(long, short = 'g', global = true)]
    pub game_dir: Option<PathBuf>,

    /// Configuration file (defaults to deadlock_translator.yaml in the game directory)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (e.g. debug, deadlock_translator=trace)
    #[arg(long, global = true, env = "DEADLOCK_TRANSLATOR_LOG")]
    pub log_level: Option<String>,

    /// Hide progress bars
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, install and enable the translation, then optionally start the game
    Update(UpdateArgs),

    /// Download the translation archive only
    Download(DownloadArgs),

    /// Print the direct-download URL for a forum or file-host link
    Resolve(ResolveArgs),

    /// Install a previously downloaded archive
    Install(InstallArgs),

    /// Register the language in gameinfo.gi
    Patch,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by commands that fetch from the network
#[derive(clap::Args, Debug, Default, Clone)]
pub struct FetchArgs {
    /// Forum post or file-host URL to download from
    #[arg(long)]
    pub forum_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the update command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Update and start the game:\n    deadlock-translator update\n\n\
                  Update without starting the game:\n    deadlock-translator update --no-auto-launch\n\n\
                  Forward arguments to the game:\n    deadlock-translator update -- -novid -high")]
pub struct UpdateArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Do not start the game afterwards
    #[arg(long)]
    pub no_auto_launch: bool,

    /// Do not wait for Enter after a failure
    #[arg(long)]
    pub no_pause: bool,

    /// Arguments passed to the game
    #[arg(last = true, value_name = "GAME_ARGS")]
    pub game_args: Vec<String>,
}

/// Arguments for the download command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Download from the default forum post:\n    deadlock-translator download\n\n\
                  Download from a Drive link:\n    deadlock-translator download --forum-url https://drive.google.com/file/d/<id>/view")]
pub struct DownloadArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Forum post or file-host URL
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Zip archive or single file to install
    pub archive: PathBuf,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    deadlock-translator completions --shell bash > ~/.bash_completion.d/deadlock-translator\n\n\
                  Generate PowerShell completions:\n    deadlock-translator completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
