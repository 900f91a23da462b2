//! Shared state for commands and for a single cascade run
//!
//! # Design
//!
//! [`WorkspaceContext`] is built once in main.rs (root, config, tier plan) and passed
//! by reference to every command. [`RunContext`] is the mutable state of one
//! `update` run; it is threaded through the orchestrator explicitly instead of living
//! in globals.
//!
//! ```text
//! main.rs:
//!   WorkspaceContext::build() -> &WorkspaceContext
//!   |
//!   v
//! commands/update.rs:
//!   RunContext::new(&ctx) -> TierOrchestrator::run(&mut run)
//! ```

use crate::core::config::CascadeConfig;
use crate::core::error::{CascadeError, CascadeResult, ResultExt};
use crate::core::manifest::DependencyChange;
use crate::core::registry::{Repository, Tier, TierPlan};
use crate::core::versions::VersionTable;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Root directory, configuration and tier plan, loaded once
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
  /// Directory holding every repository checkout (absolute path)
  pub root: PathBuf,

  pub config: Arc<CascadeConfig>,

  /// Wrapped in Arc so a run can hold it while mutating its own state
  pub plan: Arc<TierPlan>,
}

impl WorkspaceContext {
  /// Resolve the root, load configuration and build the tier plan
  pub fn build(root: &Path, config_path: Option<&Path>) -> CascadeResult<Self> {
    let root = root
      .canonicalize()
      .with_context(|| format!("Cannot resolve root directory {}", root.display()))?;
    if !root.is_dir() {
      return Err(CascadeError::with_help(
        format!("Root {} is not a directory", root.display()),
        "Pass --root pointing at the directory that holds every repository checkout.",
      ));
    }

    let config = CascadeConfig::load(&root, config_path)?;
    let plan = TierPlan::from_config(&config)?;

    Ok(Self {
      root,
      config: Arc::new(config),
      plan: Arc::new(plan),
    })
  }

  /// Checkout location of `repository`
  pub fn repo_path(&self, repository: &Repository) -> PathBuf {
    self.root.join(&repository.name)
  }
}

/// What happened to one repository during a run
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryOutcome {
  pub name: String,
  pub tier: Tier,
  pub merged_pr: Option<u64>,
  pub changes: Vec<DependencyChange>,
  pub released: bool,
  pub version: Option<String>,
}

impl RepositoryOutcome {
  pub fn new(repository: &Repository) -> Self {
    Self {
      name: repository.name.clone(),
      tier: repository.tier,
      merged_pr: None,
      changes: Vec::new(),
      released: false,
      version: None,
    }
  }

  /// A PR was merged or at least one dependency was rewritten
  pub fn is_changed(&self) -> bool {
    self.merged_pr.is_some() || !self.changes.is_empty()
  }
}

/// Mutable state of one cascade run
pub struct RunContext {
  pub root: PathBuf,
  pub plan: Arc<TierPlan>,
  pub versions: VersionTable,
  /// Set as soon as any repository changes; read before the top-level tier
  pub needs_wait: bool,
  pub waited: bool,
  /// Visited repositories, in visitation order
  pub outcomes: Vec<RepositoryOutcome>,
  pub started_at: DateTime<Utc>,
}

impl RunContext {
  pub fn new(workspace: &WorkspaceContext) -> Self {
    Self {
      root: workspace.root.clone(),
      plan: Arc::clone(&workspace.plan),
      versions: VersionTable::new(),
      needs_wait: false,
      waited: false,
      outcomes: Vec::new(),
      started_at: Utc::now(),
    }
  }

  pub fn repo_path(&self, repository: &Repository) -> PathBuf {
    self.root.join(&repository.name)
  }
}
