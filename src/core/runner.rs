//! External command execution
//!
//! Every git, hosting CLI and release-script invocation goes through a
//! [`CommandRunner`]. The working directory is always passed in explicitly; the
//! process's own current directory is never changed.

use crate::core::error::ExternalCommandError;
use std::path::Path;
use std::process::Command;

/// Runs an external program to completion
pub trait CommandRunner {
  /// Run `program args...` in `cwd`, returning stdout on success
  ///
  /// A non-zero exit status or a spawn failure becomes an [`ExternalCommandError`]
  /// carrying the captured stderr.
  fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>, ExternalCommandError>;
}

/// Render a command line for logs and error messages
pub fn command_line(program: &str, args: &[&str]) -> String {
  let mut line = program.to_string();
  for arg in args {
    line.push(' ');
    line.push_str(arg);
  }
  line
}

/// Blocking subprocess runner backed by `std::process::Command`
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, cwd: &Path, program: &str, args: &[&str]) -> Result<Vec<u8>, ExternalCommandError> {
    let command = command_line(program, args);
    tracing::debug!(cwd = %cwd.display(), "$ {}", command);

    let output = Command::new(program)
      .args(args)
      .current_dir(cwd)
      .output()
      .map_err(|e| ExternalCommandError {
        command: command.clone(),
        stderr: format!("failed to spawn in {}: {}", cwd.display(), e),
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).to_string();
      tracing::debug!(status = ?output.status.code(), "{} failed", command);
      return Err(ExternalCommandError { command, stderr });
    }

    Ok(output.stdout)
  }
}
