//! Best-effort clone of every repository in the registry
//!
//! Each repository is cloned on the working branch (falling back to the remote's
//! default branch), then checked out and pulled. A failure is recorded and the next
//! repository is attempted.

use crate::core::context::WorkspaceContext;
use crate::core::error::CascadeError;
use crate::core::runner::CommandRunner;
use crate::core::vcs::SystemGit;
use crate::utils::is_local_path;
use std::path::Path;

/// How a repository ended up in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bootstrapped {
  Cloned,
  Updated,
}

/// What the bootstrap did
///
/// A fresh clone is listed under `cloned` only; `updated` holds checkouts that
/// already existed.
#[derive(Debug, Default)]
pub struct BootstrapSummary {
  pub cloned: Vec<String>,
  pub updated: Vec<String>,
  pub failed: Vec<(String, String)>,
}

pub struct Bootstrap<'a> {
  runner: &'a dyn CommandRunner,
  workspace: &'a WorkspaceContext,
}

impl<'a> Bootstrap<'a> {
  pub fn new(runner: &'a dyn CommandRunner, workspace: &'a WorkspaceContext) -> Self {
    Self { runner, workspace }
  }

  /// Clone/update every repository; `on_done` is called after each one
  pub fn run(&self, on_done: &mut dyn FnMut(&str)) -> BootstrapSummary {
    let mut summary = BootstrapSummary::default();

    for repository in self.workspace.plan.repositories() {
      let name = repository.name.as_str();
      match self.bootstrap_one(name) {
        Ok(Bootstrapped::Cloned) => summary.cloned.push(name.to_string()),
        Ok(Bootstrapped::Updated) => summary.updated.push(name.to_string()),
        Err(error) => {
          tracing::warn!(repository = name, "{}", error);
          summary.failed.push((name.to_string(), error.to_string()));
        }
      }
      on_done(name);
    }

    summary
  }

  fn bootstrap_one(&self, name: &str) -> Result<Bootstrapped, CascadeError> {
    let ecosystem = &self.workspace.config.ecosystem;
    let root = &self.workspace.root;
    let repo_path = root.join(name);
    let branch = ecosystem.working_branch.as_str();

    let outcome = if repo_path.exists() {
      tracing::info!("{} already cloned", name);
      Bootstrapped::Updated
    } else {
      let url = clone_url(&ecosystem.remote, name);
      tracing::info!("Clone {}", url);

      if let Err(error) = SystemGit::clone_into(self.runner, root, &url, name, Some(branch)) {
        tracing::warn!("Clone on '{}' failed, trying default branch: {}", branch, error.stderr.trim());
        SystemGit::clone_into(self.runner, root, &url, name, None)?;
      }
      Bootstrapped::Cloned
    };

    let git = SystemGit::new(self.runner, &repo_path);
    if let Err(error) = git.checkout(branch).and_then(|_| git.pull()) {
      tracing::warn!("Could not update '{}' of {}, pulling current branch: {}", branch, name, error);
      git.pull()?;
    }

    Ok(outcome)
  }
}

/// `<remote><name>.git` for URL prefixes, `<remote>/<name>` for local directories
pub fn clone_url(remote: &str, name: &str) -> String {
  if is_local_path(remote) {
    Path::new(remote).join(name).to_string_lossy().to_string()
  } else {
    format!("{}{}.git", remote, name)
  }
}
