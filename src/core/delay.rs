//! Pause that lets the package registry serve freshly published versions

use std::time::Duration;

/// Blocks the current thread
pub trait Sleeper {
  fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
  fn sleep(&self, duration: Duration) {
    std::thread::sleep(duration);
  }
}

/// Fixed wait, split into two announced halves
#[derive(Debug, Clone, Copy)]
pub struct PropagationDelay {
  total: Duration,
}

impl PropagationDelay {
  pub fn new(total: Duration) -> Self {
    Self { total }
  }

  pub fn stages(&self) -> [Duration; 2] {
    let first = self.total / 2;
    [first, self.total - first]
  }

  pub fn wait(&self, sleeper: &dyn Sleeper) {
    let stages = self.stages();
    for (index, stage) in stages.iter().enumerate() {
      tracing::info!(
        "Waiting for registry publish ({}/{}, {}s)",
        index + 1,
        stages.len(),
        stage.as_secs()
      );
      sleeper.sleep(*stage);
    }
  }
}
