// Wed Oct 21 2026 - Alex

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const FILES_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}";
const CHUNKS_TEMPLATE: &str = "  {spinner:.blue} [{bar:30.white/gray}] {pos}/{len} chunks {msg}";

/// Owns the progress bars for a run. A hidden manager hands out bars that
/// track position without drawing anything.
pub struct ProgressManager {
    multi: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            enabled: true,
        }
    }

    pub fn hidden() -> Self {
        let multi = MultiProgress::new();
        multi.set_draw_target(ProgressDrawTarget::hidden());
        Self {
            multi,
            enabled: false,
        }
    }

    pub fn with_enabled(enabled: bool) -> Self {
        if enabled {
            Self::new()
        } else {
            Self::hidden()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn create_files_progress(&self, total: u64) -> ProgressBar {
        self.create(total, FILES_TEMPLATE, "█▓▒░ ")
    }

    pub fn create_chunk_progress(&self, total: u64, message: &str) -> ProgressBar {
        let pb = self.create(total, CHUNKS_TEMPLATE, "=> ");
        pb.set_message(message.to_string());
        pb
    }

    fn create(&self, total: u64, template: &str, chars: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(chars);

        let pb = ProgressBar::new(total);
        pb.set_style(style);
        self.multi.add(pb)
    }

    /// Prints a line to stdout without tearing any bar currently drawn.
    pub fn println(&self, line: &str) {
        self.multi.suspend(|| println!("{}", line));
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}
