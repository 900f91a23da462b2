//! package.json reading and internal dependency propagation
//!
//! Manifests are kept as an ordered JSON document so that rewriting a few version
//! specifiers leaves every other key where it was.

use crate::core::error::{CascadeResult, ManifestError};
use crate::core::runner::CommandRunner;
use crate::core::vcs::SystemGit;
use crate::core::versions::VersionTable;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Manifest section holding dependency specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DependencySection {
  #[serde(rename = "dependencies")]
  Dependencies,
  #[serde(rename = "devDependencies")]
  DevDependencies,
}

impl DependencySection {
  pub const ALL: [DependencySection; 2] = [DependencySection::Dependencies, DependencySection::DevDependencies];

  pub fn key(self) -> &'static str {
    match self {
      DependencySection::Dependencies => "dependencies",
      DependencySection::DevDependencies => "devDependencies",
    }
  }
}

/// One rewritten dependency specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChange {
  pub section: DependencySection,
  pub name: String,
  pub from: String,
  pub to: String,
}

/// A parsed package.json
#[derive(Debug, Clone)]
pub struct Manifest {
  path: PathBuf,
  document: Map<String, Value>,
}

impl Manifest {
  pub fn load(path: &Path) -> CascadeResult<Self> {
    let invalid = |reason: String| ManifestError {
      path: path.to_path_buf(),
      reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| invalid(format!("cannot read: {}", e)))?;
    let document = match serde_json::from_str::<Value>(&content) {
      Ok(Value::Object(map)) => map,
      Ok(_) => return Err(invalid("top level is not an object".to_string()).into()),
      Err(e) => return Err(invalid(format!("cannot parse: {}", e)).into()),
    };

    Ok(Self {
      path: path.to_path_buf(),
      document,
    })
  }

  /// The `version` field
  pub fn version(&self) -> CascadeResult<String> {
    match self.document.get("version") {
      Some(Value::String(version)) => Ok(version.clone()),
      _ => Err(
        ManifestError {
          path: self.path.clone(),
          reason: "missing string field `version`".to_string(),
        }
        .into(),
      ),
    }
  }

  /// Point every `scope`-prefixed dependency at the tracked version of its package
  ///
  /// Specifiers are compared as plain strings: `^1.2.0` and `1.2.0` differ. Entries
  /// whose package has no tracked version are left alone.
  pub fn rewrite_internal_dependencies(&mut self, scope: &str, versions: &VersionTable) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for section in DependencySection::ALL {
      let Some(Value::Object(entries)) = self.document.get_mut(section.key()) else {
        continue;
      };

      for (name, specifier) in entries.iter_mut() {
        let Some(package) = name.strip_prefix(scope) else {
          continue;
        };
        let Some(tracked) = versions.get(package) else {
          tracing::debug!("{} has no tracked version yet, leaving {} as is", package, name);
          continue;
        };

        let current = match &*specifier {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        };
        if current != tracked {
          changes.push(DependencyChange {
            section,
            name: name.clone(),
            from: current,
            to: tracked.to_string(),
          });
          *specifier = Value::String(tracked.to_string());
        }
      }
    }

    changes
  }

  /// Write back with 2-space indentation
  pub fn save(&self) -> CascadeResult<()> {
    let mut content = serde_json::to_string_pretty(&self.document)?;
    content.push('\n');
    std::fs::write(&self.path, content)?;
    Ok(())
  }
}

/// Read the `version` of the manifest at `path`
pub fn read_version(path: &Path) -> CascadeResult<String> {
  Manifest::load(path)?.version()
}

/// Rewrites internal dependencies in a checkout and commits the result
pub struct ManifestUpdater<'a> {
  runner: &'a dyn CommandRunner,
  scope: &'a str,
  commit_message: &'a str,
}

impl<'a> ManifestUpdater<'a> {
  pub fn new(runner: &'a dyn CommandRunner, scope: &'a str, commit_message: &'a str) -> Self {
    Self {
      runner,
      scope,
      commit_message,
    }
  }

  /// Rewrite `repo_path/manifest` against `versions`
  ///
  /// When anything changed the manifest is saved, every change in the checkout is
  /// staged, committed and pushed. Returns the rewritten entries (empty: untouched).
  pub fn propagate(
    &self,
    repo_path: &Path,
    manifest: &Path,
    versions: &VersionTable,
  ) -> CascadeResult<Vec<DependencyChange>> {
    let mut document = Manifest::load(&repo_path.join(manifest))?;
    let changes = document.rewrite_internal_dependencies(self.scope, versions);

    if changes.is_empty() {
      tracing::info!("Internal dependencies already up to date");
      return Ok(changes);
    }

    for change in &changes {
      tracing::info!("{} {}: {} -> {}", change.section.key(), change.name, change.from, change.to);
    }

    document.save()?;

    let git = SystemGit::new(self.runner, repo_path);
    git.add_all()?;
    git.commit_allow_empty(self.commit_message)?;
    git.push()?;

    Ok(changes)
  }
}
