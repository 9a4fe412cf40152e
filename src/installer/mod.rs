//! Translation installation
//!
//! This module handles:
//! - Extracting the downloaded archive ([`extract`])
//! - Mirroring its contents into the game directory ([`file_ops`])
//! - Registering the language in gameinfo.gi ([`gameinfo`])
//! - Recording what was installed ([`receipt`])

pub mod extract;
pub mod file_ops;
pub mod gameinfo;
pub mod receipt;

use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::config::LanguagePatch;
use crate::error::Result;
use crate::hash;
use crate::progress::ProgressReporter;

pub use file_ops::InstalledFileSet;
pub use gameinfo::PatchOutcome;
pub use receipt::InstallReceipt;

/// Installs downloaded bundles into a game directory
pub struct Installer<'a> {
    /// Game root path
    game_root: &'a Path,
    /// Holds extraction directories and the install receipt
    work_dir: &'a Path,
    language: &'a LanguagePatch,
}

impl<'a> Installer<'a> {
    pub fn new(game_root: &'a Path, work_dir: &'a Path, language: &'a LanguagePatch) -> Self {
        Self {
            game_root,
            work_dir,
            language,
        }
    }

    /// Whether the last receipt in the work dir records `artifact` by digest
    pub fn already_installed(&self, artifact: &Path) -> bool {
        let receipt = match InstallReceipt::load(self.work_dir) {
            Ok(Some(receipt)) => receipt,
            Ok(None) => return false,
            Err(e) => {
                debug!("Ignoring unreadable install receipt: {e}");
                return false;
            }
        };
        hash::hash_file(artifact).is_ok_and(|digest| digest == receipt.archive_hash)
    }

    /// Extract `artifact` (if it is an archive) into the work dir and copy its
    /// contents over the game directory, then write the install receipt.
    pub fn install_files(
        &self,
        artifact: &Path,
        progress: &mut dyn ProgressReporter,
    ) -> Result<InstalledFileSet> {
        let _span = info_span!("install", artifact = %artifact.display()).entered();
        info!("Replacing game files");

        if self.already_installed(artifact) {
            info!("Archive matches the last install, refreshing files");
        }

        let content_root =
            extract::prepare_content_root(artifact, self.work_dir, self.game_root)?;
        let installed = file_ops::copy_tree(&content_root, self.game_root, progress)?;
        info!(files = installed.files.len(), "Files installed");

        match InstallReceipt::build(artifact, &installed).and_then(|r| r.save(self.work_dir)) {
            Ok(path) => info!(path = %path.display(), "Wrote install receipt"),
            Err(e) => warn!("Could not write install receipt: {e}"),
        }

        Ok(installed)
    }

    /// Register the language in gameinfo.gi
    pub fn patch_gameinfo(&self) -> Result<PatchOutcome> {
        gameinfo::apply(self.game_root, self.language)
    }
}
