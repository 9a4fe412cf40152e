//! Progress reporting for downloads and file installation
//!
//! All progress goes through the [`ProgressReporter`] trait so commands can
//! pick visual bars or silence (quiet mode, tests, non-terminal output).

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

pub trait ProgressReporter {
    /// Start a byte transfer; `total` is 0 when the size is unknown
    fn start_transfer(&mut self, name: &str, total: u64);

    /// Record `downloaded` bytes received so far
    fn update_transfer(&mut self, downloaded: u64);

    fn finish_transfer(&mut self);

    /// Start copying `total_files` files
    fn start_files(&mut self, total_files: u64);

    fn update_file(&mut self, file_path: &str);

    fn finish_files(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Percentage of `done` out of `total`, if the total is known
pub fn percentage(done: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(done as f64 / total as f64 * 100.0)
}

/// Progress reporter with indicatif bars
#[derive(Default)]
pub struct InteractiveProgress {
    transfer_pb: Option<ProgressBar>,
    file_pb: Option<ProgressBar>,
}

impl InteractiveProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgress {
    fn start_transfer(&mut self, name: &str, total: u64) {
        let pb = if total > 0 {
            let style = ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            let pb = ProgressBar::new(total);
            pb.set_style(style);
            pb
        } else {
            let style = ProgressStyle::default_spinner()
                .template("{spinner} {bytes} {bytes_per_sec} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb
        };
        pb.set_message(name.to_string());
        self.transfer_pb = Some(pb);
    }

    fn update_transfer(&mut self, downloaded: u64) {
        if let Some(ref pb) = self.transfer_pb {
            pb.set_position(downloaded);
        }
    }

    fn finish_transfer(&mut self) {
        if let Some(pb) = self.transfer_pb.take() {
            pb.finish_and_clear();
        }
    }

    fn start_files(&mut self, total_files: u64) {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);
        self.file_pb = Some(file_pb);
    }

    fn update_file(&mut self, file_path: &str) {
        if let Some(ref file_pb) = self.file_pb {
            // Truncate long paths for display
            let chars: Vec<char> = file_path.chars().collect();
            let display_path = if chars.len() > 50 {
                format!("...{}", chars[chars.len() - 47..].iter().collect::<String>())
            } else {
                file_path.to_string()
            };
            file_pb.set_message(display_path);
            file_pb.inc(1);
        }
    }

    fn finish_files(&mut self) {
        if let Some(file_pb) = self.file_pb.take() {
            file_pb.finish();
        }
    }

    fn abandon(&mut self) {
        if let Some(pb) = self.transfer_pb.take() {
            pb.abandon();
        }
        if let Some(file_pb) = self.file_pb.take() {
            file_pb.abandon();
        }
    }
}

/// Reporter that only logs, for quiet mode and tests
#[derive(Debug, Default)]
pub struct SilentProgress {
    total: u64,
    last_logged: Option<u64>,
}

impl ProgressReporter for SilentProgress {
    fn start_transfer(&mut self, _name: &str, total: u64) {
        self.total = total;
        self.last_logged = None;
    }

    fn update_transfer(&mut self, downloaded: u64) {
        if let Some(pct) = percentage(downloaded, self.total) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = pct as u64;
            if self.last_logged != Some(whole) {
                debug!("Download progress: {pct:.1}%");
                self.last_logged = Some(whole);
            }
        }
    }

    fn finish_transfer(&mut self) {}

    fn start_files(&mut self, _total_files: u64) {}

    fn update_file(&mut self, _file_path: &str) {}

    fn finish_files(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter: bars when attended and not quiet, otherwise silent
pub fn reporter(quiet: bool) -> Box<dyn ProgressReporter> {
    if quiet || !console::user_attended_stderr() {
        Box::new(SilentProgress::default())
    } else {
        Box::new(InteractiveProgress::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(50, 200), Some(25.0));
        assert_eq!(percentage(10, 0), None);
    }

    #[test]
    fn test_silent_progress_tracks_last_logged() {
        let mut progress = SilentProgress::default();
        progress.start_transfer("pack.zip", 1000);
        progress.update_transfer(505);
        assert_eq!(progress.last_logged, Some(50));
        progress.update_transfer(1000);
        assert_eq!(progress.last_logged, Some(100));
    }

    #[test]
    fn test_silent_progress_unknown_total() {
        let mut progress = SilentProgress::default();
        progress.start_transfer("pack.zip", 0);
        progress.update_transfer(4096);
        assert_eq!(progress.last_logged, None);
    }

    #[test]
    fn test_interactive_progress_lifecycle() {
        let mut progress = InteractiveProgress::new();
        progress.start_transfer("pack.zip", 100);
        progress.update_transfer(40);
        progress.finish_transfer();
        progress.start_files(2);
        progress.update_file("game/citadel/resource/localization/citadel_gc_tchinese.txt");
        progress.update_file("short.txt");
        progress.finish_files();
        progress.abandon();
    }
}
