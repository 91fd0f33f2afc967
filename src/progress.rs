//! Progress bar display for pack operations

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the packs of one lifecycle operation
///
/// Drawn to stderr and hidden automatically when stderr is not a terminal.
pub struct ProgressDisplay {
    pack_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total pack count
    pub fn new(total_packs: u64) -> Self {
        let pack_style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pack_pb = ProgressBar::new(total_packs);
        pack_pb.set_style(pack_style);

        Self { pack_pb }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            pack_pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the pack currently being processed
    pub fn update_pack(&self, pack_name: &str, current: usize, total: usize) {
        self.pack_pb
            .set_message(format!("({current}/{total}) {pack_name}"));
    }

    /// Increment pack progress
    pub fn inc_pack(&self) {
        self.pack_pb.inc(1);
    }

    /// Print a user-facing line without tearing the bar
    pub fn println(&self, line: &str) {
        self.pack_pb.suspend(|| println!("{line}"));
    }

    pub fn finish(&self) {
        self.pack_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pack_pb.abandon();
    }
}
