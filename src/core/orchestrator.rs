//! Tier-by-tier cascade of automated dependency updates
//!
//! # Protocol
//!
//! For every repository, in tier order:
//!
//! 1. Look for an open PR from the dependency bot and squash-merge it.
//!    Without one, single and first-level repositories stop here.
//! 2. Propagate tracked versions into the manifest as the tier's role dictates
//!    (in place for distribution, on the integration branch for top-level).
//! 3. If a PR was merged or a dependency rewritten, run the release script.
//! 4. Record the manifest version for the repositories that come after.
//!
//! Once the single and first-level tiers are done, a change anywhere so far makes the
//! run wait for the registry before the top-level tier starts.
//!
//! Each tier is a failure boundary: the first error aborts the tier and the run.
//! Nothing is rolled back.

use crate::core::config::CascadeConfig;
use crate::core::context::{RepositoryOutcome, RunContext};
use crate::core::delay::{PropagationDelay, Sleeper};
use crate::core::error::{CascadeError, CascadeResult, TierFailure};
use crate::core::manifest::{DependencyChange, ManifestUpdater, read_version};
use crate::core::registry::{Propagation, Repository, Tier};
use crate::core::runner::CommandRunner;
use crate::core::vcs::{GitHub, SystemGit};
use std::path::Path;

/// Drives the cascade across all four tiers
pub struct TierOrchestrator<'a> {
  runner: &'a dyn CommandRunner,
  sleeper: &'a dyn Sleeper,
  config: &'a CascadeConfig,
  delay: PropagationDelay,
}

impl<'a> TierOrchestrator<'a> {
  pub fn new(
    runner: &'a dyn CommandRunner,
    sleeper: &'a dyn Sleeper,
    config: &'a CascadeConfig,
    delay: PropagationDelay,
  ) -> Self {
    Self {
      runner,
      sleeper,
      config,
      delay,
    }
  }

  /// Process every tier in order, stopping at the first tier that fails
  pub fn run(&self, ctx: &mut RunContext) -> Result<(), TierFailure> {
    for tier in Tier::ALL {
      if tier == Tier::TopLevel && ctx.needs_wait {
        self.delay.wait(self.sleeper);
        ctx.waited = true;
      }

      self.process_tier(ctx, tier)?;
    }

    Ok(())
  }

  /// Process one tier; returns whether any of its repositories changed
  pub fn process_tier(&self, ctx: &mut RunContext, tier: Tier) -> Result<bool, TierFailure> {
    let plan = ctx.plan.clone();
    let mut tier_changed = false;

    tracing::info!("Processing {} tier", tier.label());

    for repository in plan.tier(tier) {
      match self.process_repository(ctx, repository) {
        Ok(outcome) => {
          tier_changed |= outcome.is_changed();
          ctx.outcomes.push(outcome);
        }
        Err(error) => {
          tracing::error!(repository = %repository.name, "{}", error);
          return Err(TierFailure {
            tier,
            repository: repository.name.clone(),
            error,
          });
        }
      }
    }

    Ok(tier_changed)
  }

  /// Run the update protocol for one repository
  pub fn process_repository(&self, ctx: &mut RunContext, repository: &Repository) -> CascadeResult<RepositoryOutcome> {
    let repo_path = ctx.repo_path(repository);
    let role = repository.tier.role();
    let mut outcome = RepositoryOutcome::new(repository);

    tracing::info!(tier = repository.tier.label(), "Update repository: {}", repository.name);

    let github = GitHub::new(self.runner, &self.config.hosting.program, &repo_path);
    match github.pending_bot_pr(&self.config.hosting.bot)? {
      Some(number) => {
        tracing::info!("Merge PR #{}", number);
        github.merge_squash(number)?;
        outcome.merged_pr = Some(number);
      }
      None if role.continue_without_pr => {
        tracing::info!("No PR to merge, checking internal dependencies");
      }
      None => {
        tracing::info!("No PR to merge");
        self.record_version(ctx, repository, &repo_path, &mut outcome)?;
        return Ok(outcome);
      }
    }

    outcome.changes = self
      .propagate(role.propagation, ctx, repository, &repo_path)
      .map_err(|e| CascadeError::propagation(&repository.name, e))?;

    if outcome.is_changed() {
      self.run_release_script(&repo_path)?;
      outcome.released = true;
    }

    self.record_version(ctx, repository, &repo_path, &mut outcome)?;

    if outcome.is_changed() {
      ctx.needs_wait = true;
    }

    Ok(outcome)
  }

  fn propagate(
    &self,
    propagation: Propagation,
    ctx: &RunContext,
    repository: &Repository,
    repo_path: &Path,
  ) -> CascadeResult<Vec<DependencyChange>> {
    let ecosystem = &self.config.ecosystem;
    let git = SystemGit::new(self.runner, repo_path);
    let updater = ManifestUpdater::new(self.runner, &ecosystem.scope, &ecosystem.commit_message);

    match propagation {
      Propagation::None => Ok(Vec::new()),
      Propagation::InPlace => {
        git.pull()?;
        updater.propagate(repo_path, &repository.manifest, &ctx.versions)
      }
      Propagation::IntegrationBranch => {
        git.checkout(&ecosystem.integration_branch)?;
        git.pull()?;
        let changes = updater.propagate(repo_path, &repository.manifest, &ctx.versions)?;
        git.checkout(&ecosystem.working_branch)?;
        Ok(changes)
      }
    }
  }

  fn run_release_script(&self, repo_path: &Path) -> CascadeResult<()> {
    let script = repo_path.join(&self.config.ecosystem.release_script);
    tracing::info!("Run release script {}", self.config.ecosystem.release_script.display());
    self
      .runner
      .run(repo_path, &script.to_string_lossy(), &["release"])?;
    Ok(())
  }

  fn record_version(
    &self,
    ctx: &mut RunContext,
    repository: &Repository,
    repo_path: &Path,
    outcome: &mut RepositoryOutcome,
  ) -> CascadeResult<()> {
    let version = read_version(&repo_path.join(&repository.manifest))?;
    tracing::info!("{} is at {}", repository.name, version);
    ctx.versions.record(&repository.name, &version);
    outcome.version = Some(version);
    Ok(())
  }
}
