//! gameinfo.gi language registration
//!
//! Deadlock only offers languages listed in the `SupportedLanguages` block of
//! `game/citadel/gameinfo.gi`. The patch inserts one entry before the block's
//! closing brace, anchored on an entry known to be last in the block.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, info_span};

use crate::config::LanguagePatch;
use crate::error::{Result, fs as fs_error, patch};

/// Location of gameinfo.gi relative to the game root
pub fn gameinfo_path(game_root: &Path) -> PathBuf {
    game_root.join("game").join("citadel").join("gameinfo.gi")
}

/// Result of a successful patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The entry was inserted; carries the new content
    Inserted(String),
    /// The key was already present, nothing to do
    AlreadyPresent,
}

impl LanguagePatch {
    fn quoted_key(&self) -> String {
        format!("\"{}\"", self.key)
    }

    fn entry(&self) -> String {
        format!("\"{}\" \"{}\"", self.key, self.value)
    }

    fn anchor(&self) -> String {
        format!("\"{}\" \"{}\"", self.anchor_key, self.anchor_value)
    }

    fn pattern(&self) -> Option<Regex> {
        let pattern = format!(
            r#"(?s)({block}\s*\{{[^}}]*"{key}"\s*"{value}")(\s*)\}}"#,
            block = regex::escape(&self.block),
            key = regex::escape(&self.anchor_key),
            value = regex::escape(&self.anchor_value),
        );
        Regex::new(&pattern).ok()
    }
}

/// Insert the language entry into gameinfo.gi content.
///
/// Returns `None` when the anchor entry is not inside the block. Inserted
/// line breaks follow the file's own style (CRLF if the file uses it).
pub fn patch_content(content: &str, language: &LanguagePatch) -> Option<PatchOutcome> {
    if content.contains(&language.quoted_key()) {
        return Some(PatchOutcome::AlreadyPresent);
    }

    let pattern = language.pattern()?;
    let caps = pattern.captures(content)?;
    let (whole, head, gap) = (caps.get(0)?, caps.get(1)?, caps.get(2)?);

    let (entry_indent, close_indent) = indentation(head.as_str(), gap.as_str());
    let newline = line_ending(content);

    let mut patched = String::with_capacity(content.len() + 32);
    patched.push_str(&content[..whole.start()]);
    patched.push_str(head.as_str());
    patched.push_str(newline);
    patched.push_str(entry_indent);
    patched.push_str(&language.entry());
    patched.push_str(newline);
    patched.push_str(close_indent);
    patched.push('}');
    patched.push_str(&content[whole.end()..]);

    Some(PatchOutcome::Inserted(patched))
}

fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Indentation for the new entry and the closing brace.
///
/// A multi-line block reuses the anchor line's indentation and the brace's
/// own line; a single-line block gets two tabs and one tab.
fn indentation<'a>(head: &'a str, gap: &'a str) -> (&'a str, &'a str) {
    let Some(line_start) = head.rfind('\n') else {
        return ("\t\t", "\t");
    };
    let anchor_line = &head[line_start + 1..];
    let entry_indent = &anchor_line[..anchor_line.len() - anchor_line.trim_start().len()];

    let close_indent = match gap.rfind('\n') {
        Some(pos) => &gap[pos + 1..],
        None => "\t",
    };

    (entry_indent, close_indent)
}

/// Patch gameinfo.gi under `game_root`.
///
/// A missing file or anchor is an error the caller is expected to treat as a
/// warning.
pub fn apply(game_root: &Path, language: &LanguagePatch) -> Result<PatchOutcome> {
    let path = gameinfo_path(game_root);
    let _span = info_span!("patch", path = %path.display()).entered();

    if !path.is_file() {
        return Err(fs_error::not_found(path.display().to_string()));
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| fs_error::read_failed(path.display().to_string(), e))?;

    match patch_content(&content, language) {
        Some(PatchOutcome::Inserted(patched)) => {
            fs::write(&path, &patched)
                .map_err(|e| fs_error::write_failed(path.display().to_string(), e))?;
            info!(key = %language.key, "Added language to gameinfo.gi");
            Ok(PatchOutcome::Inserted(patched))
        }
        Some(PatchOutcome::AlreadyPresent) => {
            info!(key = %language.key, "gameinfo.gi already lists the language");
            Ok(PatchOutcome::AlreadyPresent)
        }
        None => Err(patch::anchor_not_found(
            path.display().to_string(),
            language.anchor(),
        )),
    }
}
