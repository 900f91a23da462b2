//! Process exit handling
//!
//! Commands return a [`Failure`]; main.rs hands it to [`terminate`], which prints the
//! diagnostics and exits with the matching code. Tier failures exit with the
//! tier's code (-1 .. -4), everything else with 1 (user) or 2 (system). A sweep that
//! kept going past failures prints all of them in order and exits with the first.

use crate::core::error::{CascadeError, TierFailure, print_error, print_tier_failure};

/// Why a command did not finish successfully
#[derive(Debug)]
pub enum Failure {
  Error(CascadeError),
  Tier(TierFailure),
  /// Several tier failures collected in visiting order
  Sweep { first: TierFailure, rest: Vec<TierFailure> },
}

impl Failure {
  pub fn exit_code(&self) -> i32 {
    match self {
      Failure::Error(error) => error.exit_code().as_i32(),
      Failure::Tier(failure) | Failure::Sweep { first: failure, .. } => failure.exit_code().as_i32(),
    }
  }

  pub fn print(&self) {
    match self {
      Failure::Error(error) => print_error(error),
      Failure::Tier(failure) => print_tier_failure(failure),
      Failure::Sweep { first, rest } => {
        for failure in std::iter::once(first).chain(rest) {
          print_tier_failure(failure);
        }
      }
    }
  }
}

impl From<CascadeError> for Failure {
  fn from(error: CascadeError) -> Self {
    Failure::Error(error)
  }
}

impl From<TierFailure> for Failure {
  fn from(failure: TierFailure) -> Self {
    Failure::Tier(failure)
  }
}

/// Print `failure` and end the process with its exit code
pub fn terminate(failure: Failure) -> ! {
  failure.print();
  std::process::exit(failure.exit_code())
}
