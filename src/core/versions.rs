//! Process-scoped table of the latest version observed for each repository

use serde::Serialize;
use std::collections::BTreeMap;

/// Repository name → last observed manifest version
///
/// Filled in as repositories are visited and never persisted; a fresh table is
/// created for every run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct VersionTable {
  entries: BTreeMap<String, String>,
}

impl VersionTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record (or overwrite) the version of `repository`
  pub fn record(&mut self, repository: impl Into<String>, version: impl Into<String>) {
    self.entries.insert(repository.into(), version.into());
  }

  pub fn get(&self, repository: &str) -> Option<&str> {
    self.entries.get(repository).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
