//! System git backend
//!
//! Shells out to the `git` binary for every operation the cascade needs. All calls
//! go through a [`CommandRunner`] so they can be scripted in tests.

use crate::core::error::{CascadeResult, ExternalCommandError};
use crate::core::runner::CommandRunner;
use std::path::Path;

/// Git operations scoped to one repository checkout
pub struct SystemGit<'a> {
  runner: &'a dyn CommandRunner,
  /// Repository working directory
  repo_path: &'a Path,
}

impl<'a> SystemGit<'a> {
  pub fn new(runner: &'a dyn CommandRunner, repo_path: &'a Path) -> Self {
    Self { runner, repo_path }
  }

  pub fn checkout(&self, branch: &str) -> CascadeResult<()> {
    self.git(&["checkout", branch])?;
    Ok(())
  }

  pub fn pull(&self) -> CascadeResult<()> {
    self.git(&["pull"])?;
    Ok(())
  }

  /// Stage every change in the working tree
  pub fn add_all(&self) -> CascadeResult<()> {
    self.git(&["add", "."])?;
    Ok(())
  }

  /// Commit staged changes; succeeds even when nothing is staged
  pub fn commit_allow_empty(&self, message: &str) -> CascadeResult<()> {
    self.git(&["commit", "-m", message, "--allow-empty"])?;
    Ok(())
  }

  pub fn push(&self) -> CascadeResult<()> {
    self.git(&["push"])?;
    Ok(())
  }

  /// Clone `url` with submodules into `parent/<directory>`, optionally on `branch`
  pub fn clone_into(
    runner: &dyn CommandRunner,
    parent: &Path,
    url: &str,
    directory: &str,
    branch: Option<&str>,
  ) -> Result<(), ExternalCommandError> {
    let mut args = vec!["clone", "--recurse-submodules", url, directory];
    if let Some(branch) = branch {
      args.extend(["-b", branch]);
    }
    runner.run(parent, "git", &args)?;
    Ok(())
  }

  fn git(&self, args: &[&str]) -> Result<Vec<u8>, ExternalCommandError> {
    self.runner.run(self.repo_path, "git", args)
  }
}
