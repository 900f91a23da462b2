//! Progress indicator for the per-repository clone loop
//!
//! Uses `linya`, which draws to stderr and stays quiet when stderr is not a terminal.

use linya::{Bar, Progress};

/// Single bar advanced once per repository
pub struct RepoProgress {
  progress: Progress,
  bar: Bar,
}

impl RepoProgress {
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
