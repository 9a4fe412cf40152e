//! Install receipt
//!
//! After a successful copy the installer records which archive was installed
//! and which files it wrote, with their digests, in
//! `<download_dir>/install-receipt.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::file_ops::InstalledFileSet;
use crate::error::{Result, fs as fs_error};
use crate::hash;

pub const RECEIPT_FILE: &str = "install-receipt.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    pub archive: String,
    pub archive_hash: String,
    pub files: Vec<ReceiptEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptEntry {
    /// Path relative to the game root, with `/` separators
    pub path: String,
    pub hash: String,
}

impl InstallReceipt {
    /// Build a receipt by hashing the archive and every installed file
    pub fn build(artifact: &Path, installed: &InstalledFileSet) -> Result<Self> {
        let files = installed
            .files
            .iter()
            .map(|relative| -> Result<ReceiptEntry> {
                Ok(ReceiptEntry {
                    path: relative.to_string_lossy().replace('\\', "/"),
                    hash: hash::hash_file(&installed.root.join(relative))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            archive: artifact
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            archive_hash: hash::hash_file(artifact)?,
            files,
        })
    }

    /// Write the receipt into `dir`, replacing any previous one
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(RECEIPT_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e))?;
        Ok(path)
    }

    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(RECEIPT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e))?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
