//! Automated dependency PRs via the GitHub CLI

use crate::core::error::CascadeResult;
use crate::core::runner::CommandRunner;
use std::path::Path;

/// PR-hosting operations for one repository checkout
pub struct GitHub<'a> {
  runner: &'a dyn CommandRunner,
  program: &'a str,
  repo_path: &'a Path,
}

impl<'a> GitHub<'a> {
  pub fn new(runner: &'a dyn CommandRunner, program: &'a str, repo_path: &'a Path) -> Self {
    Self {
      runner,
      program,
      repo_path,
    }
  }

  /// Number of the open PR authored by `bot`, if there is one
  ///
  /// A failing listing is an error; empty or non-numeric output means no PR.
  pub fn pending_bot_pr(&self, bot: &str) -> CascadeResult<Option<u64>> {
    let output = self
      .runner
      .run(self.repo_path, self.program, &["pr", "list", "--app", bot])?;
    Ok(parse_pr_number(&output))
  }

  /// Squash-merge `number` and delete its branch
  pub fn merge_squash(&self, number: u64) -> CascadeResult<()> {
    let number = number.to_string();
    self.runner.run(
      self.repo_path,
      self.program,
      &["pr", "merge", &number, "--squash", "--delete-branch"],
    )?;
    Ok(())
  }
}

/// Leading integer of the listing (`gh pr list` prints `<number>\t<title>\t...` per PR)
fn parse_pr_number(output: &[u8]) -> Option<u64> {
  let text = String::from_utf8_lossy(output);
  let digits: String = text
    .trim_start()
    .chars()
    .take_while(|c| c.is_ascii_digit())
    .collect();
  digits.parse().ok()
}
