//! Repository registry: the four ordered tiers and their members
//!
//! Tier order is fixed (single → first-level → top-level → distribution) and every
//! repository belongs to exactly one tier. What a tier does beyond merging PRs is
//! looked up in a small per-tier role table instead of being passed around as flags.

use crate::core::config::CascadeConfig;
use crate::core::error::{CascadeResult, ConfigError};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Default manifest location inside a repository
pub const DEFAULT_MANIFEST: &str = "package.json";

/// Processing tier of a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
  /// Low-level utility packages with no internal dependencies
  Single,
  /// Libraries consuming the single tier
  FirstLevel,
  /// Applications consuming the libraries
  TopLevel,
  /// Packaging of the top-level applications
  Distribution,
}

/// How a tier propagates freshly published versions into its own manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
  /// Nothing to propagate
  None,
  /// Pull the working branch and rewrite the manifest there
  InPlace,
  /// Rewrite the manifest on the integration branch, then return to the working branch
  IntegrationBranch,
}

/// Per-tier behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRole {
  pub propagation: Propagation,
  /// Keep processing a repository that has no pending bot PR
  pub continue_without_pr: bool,
}

impl Tier {
  /// All tiers in processing order
  pub const ALL: [Tier; 4] = [Tier::Single, Tier::FirstLevel, Tier::TopLevel, Tier::Distribution];

  pub fn label(self) -> &'static str {
    match self {
      Tier::Single => "single",
      Tier::FirstLevel => "first-level",
      Tier::TopLevel => "top-level",
      Tier::Distribution => "distribution",
    }
  }

  /// Process exit code when this tier aborts the run
  pub fn exit_code(self) -> i32 {
    match self {
      Tier::Single => -1,
      Tier::FirstLevel => -2,
      Tier::TopLevel => -3,
      Tier::Distribution => -4,
    }
  }

  pub fn role(self) -> TierRole {
    match self {
      Tier::Single | Tier::FirstLevel => TierRole {
        propagation: Propagation::None,
        continue_without_pr: false,
      },
      Tier::TopLevel => TierRole {
        propagation: Propagation::IntegrationBranch,
        continue_without_pr: true,
      },
      Tier::Distribution => TierRole {
        propagation: Propagation::InPlace,
        continue_without_pr: true,
      },
    }
  }
}

/// A repository checkout taking part in the cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
  pub name: String,
  pub tier: Tier,
  /// Manifest path relative to the repository root
  pub manifest: PathBuf,
}

/// All repositories, grouped by tier in processing order
#[derive(Debug, Clone)]
pub struct TierPlan {
  repositories: Vec<Repository>,
}

impl TierPlan {
  /// Build the plan from configuration, rejecting repositories listed twice
  pub fn from_config(config: &CascadeConfig) -> CascadeResult<Self> {
    let mut seen = HashSet::new();
    let mut repositories = Vec::new();

    for tier in Tier::ALL {
      for entry in config.tiers.entries(tier) {
        if !seen.insert(entry.name().to_string()) {
          return Err(
            ConfigError::DuplicateRepository {
              name: entry.name().to_string(),
            }
            .into(),
          );
        }

        repositories.push(Repository {
          name: entry.name().to_string(),
          tier,
          manifest: entry
            .manifest()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST)),
        });
      }
    }

    if repositories.is_empty() {
      return Err(
        ConfigError::Invalid {
          reason: "no repositories configured in any tier".to_string(),
        }
        .into(),
      );
    }

    Ok(Self { repositories })
  }

  /// Repositories of one tier, in declaration order
  pub fn tier(&self, tier: Tier) -> impl Iterator<Item = &Repository> {
    self.repositories.iter().filter(move |r| r.tier == tier)
  }

  /// Every repository in processing order
  pub fn repositories(&self) -> &[Repository] {
    &self.repositories
  }
}
