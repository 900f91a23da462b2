//! Validation sweep: run every repository's release script in check mode
//!
//! Uses the same tier order and tier failure boundary as the cascade. The script is
//! invoked without arguments.

use crate::core::context::WorkspaceContext;
use crate::core::error::TierFailure;
use crate::core::registry::Tier;
use crate::core::runner::CommandRunner;

pub struct CheckSweep<'a> {
  runner: &'a dyn CommandRunner,
  workspace: &'a WorkspaceContext,
}

impl<'a> CheckSweep<'a> {
  pub fn new(runner: &'a dyn CommandRunner, workspace: &'a WorkspaceContext) -> Self {
    Self { runner, workspace }
  }

  /// Check every repository in tier order
  ///
  /// Stops at the first failure unless `keep_going`; returns every failure seen.
  pub fn run(&self, keep_going: bool) -> Vec<TierFailure> {
    let script = &self.workspace.config.ecosystem.release_script;
    let mut failures = Vec::new();

    for tier in Tier::ALL {
      tracing::info!("Checking {} tier", tier.label());

      for repository in self.workspace.plan.tier(tier) {
        let repo_path = self.workspace.repo_path(repository);
        let program = repo_path.join(script);
        tracing::info!("Check repository: {}", repository.name);

        if let Err(error) = self.runner.run(&repo_path, &program.to_string_lossy(), &[]) {
          tracing::error!(repository = %repository.name, "Release script failed");
          failures.push(TierFailure {
            tier,
            repository: repository.name.clone(),
            error: error.into(),
          });
          if !keep_going {
            return failures;
          }
        }
      }
    }

    failures
  }
}
