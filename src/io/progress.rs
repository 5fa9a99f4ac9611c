//! Terminal progress for generation runs

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>10} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Handle to one phase bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseId(usize);

/// Stacked progress bars, one per phase of a run
///
/// A run ticks the engine, optionally runs a capture window and writes its
/// outputs; each of those shows as its own bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Adds a bar for a phase of `steps` units
    pub fn start_phase(&mut self, name: &str, steps: u64) -> PhaseId {
        let bar = ProgressBar::new(steps);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.bars.push(self.multi_progress.add(bar));
        PhaseId(self.bars.len() - 1)
    }

    /// Advances a phase by one step
    pub fn advance(&self, phase: PhaseId) {
        if let Some(bar) = self.bars.get(phase.0) {
            bar.inc(1);
        }
    }

    /// Shows a short status next to a phase
    pub fn set_message(&self, phase: PhaseId, message: &str) {
        if let Some(bar) = self.bars.get(phase.0) {
            bar.set_message(message.to_string());
        }
    }

    /// Marks a phase as done, filling its bar
    pub fn complete(&self, phase: PhaseId, message: &str) {
        if let Some(bar) = self.bars.get(phase.0) {
            bar.finish_with_message(format!("✓ {message}"));
        }
    }

    /// Position of a phase
    pub fn position(&self, phase: PhaseId) -> Option<u64> {
        self.bars.get(phase.0).map(ProgressBar::position)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
