//! Error types for dep-cascade with contextual messages and exit codes
//!
//! Every failure in the cascade ends up as a [`CascadeError`]. Errors raised while a
//! tier is being processed are wrapped in a [`TierFailure`] by the tier boundary,
//! which decides the process exit code.

use crate::core::registry::Tier;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for dep-cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User,
  /// System error (I/O, spawning processes)
  System,
  /// A tier aborted the cascade
  Tier(Tier),
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::User => 1,
      ExitCode::System => 2,
      ExitCode::Tier(tier) => tier.exit_code(),
    }
  }
}

/// Main error type for dep-cascade
#[derive(Debug)]
pub enum CascadeError {
  /// Configuration errors
  Config(ConfigError),

  /// An external command exited non-zero or could not be spawned
  Command(ExternalCommandError),

  /// Malformed or unreadable manifest
  Manifest(ManifestError),

  /// Failure during the tier-specific manifest propagation step
  Propagation {
    repository: String,
    source: Box<CascadeError>,
  },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl CascadeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    CascadeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    CascadeError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Wrap an error raised while propagating versions into `repository`
  pub fn propagation(repository: impl Into<String>, source: CascadeError) -> Self {
    CascadeError::Propagation {
      repository: repository.into(),
      source: Box::new(source),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      CascadeError::Message { message, context, help } => CascadeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      CascadeError::Io(err) => CascadeError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      CascadeError::Config(err) => CascadeError::Message {
        message: err.to_string(),
        context: Some(ctx_str),
        help: err.help_message(),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error outside of a tier boundary
  pub fn exit_code(&self) -> ExitCode {
    match self {
      CascadeError::Config(_) => ExitCode::User,
      CascadeError::Command(_) => ExitCode::System,
      CascadeError::Manifest(_) => ExitCode::User,
      CascadeError::Propagation { source, .. } => source.exit_code(),
      CascadeError::Io(_) => ExitCode::System,
      CascadeError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      CascadeError::Config(e) => e.help_message(),
      CascadeError::Command(e) => e.help_message(),
      CascadeError::Propagation { source, .. } => source.help_message(),
      CascadeError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }

  /// The failing external command, if this error (or its cause) came from one
  pub fn command_error(&self) -> Option<&ExternalCommandError> {
    match self {
      CascadeError::Command(e) => Some(e),
      CascadeError::Propagation { source, .. } => source.command_error(),
      _ => None,
    }
  }
}

impl fmt::Display for CascadeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CascadeError::Config(e) => write!(f, "{}", e),
      CascadeError::Command(e) => write!(f, "{}", e),
      CascadeError::Manifest(e) => write!(f, "{}", e),
      CascadeError::Propagation { repository, source } => {
        write!(f, "Dependency propagation failed for '{}': {}", repository, source)
      }
      CascadeError::Io(e) => write!(f, "I/O error: {}", e),
      CascadeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for CascadeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CascadeError::Io(e) => Some(e),
      CascadeError::Propagation { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for CascadeError {
  fn from(err: io::Error) -> Self {
    CascadeError::Io(err)
  }
}

impl From<String> for CascadeError {
  fn from(msg: String) -> Self {
    CascadeError::message(msg)
  }
}

impl From<&str> for CascadeError {
  fn from(msg: &str) -> Self {
    CascadeError::message(msg)
  }
}

impl From<ExternalCommandError> for CascadeError {
  fn from(err: ExternalCommandError) -> Self {
    CascadeError::Command(err)
  }
}

impl From<ConfigError> for CascadeError {
  fn from(err: ConfigError) -> Self {
    CascadeError::Config(err)
  }
}

impl From<ManifestError> for CascadeError {
  fn from(err: ManifestError) -> Self {
    CascadeError::Manifest(err)
  }
}

impl From<toml_edit::de::Error> for CascadeError {
  fn from(err: toml_edit::de::Error) -> Self {
    CascadeError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for CascadeError {
  fn from(err: serde_json::Error) -> Self {
    CascadeError::message(format!("JSON error: {}", err))
  }
}

/// A subprocess that failed, with the diagnostic text it produced
#[derive(Debug, Clone)]
pub struct ExternalCommandError {
  /// Command line as it was run
  pub command: String,
  /// Captured stderr (or the spawn error)
  pub stderr: String,
}

impl ExternalCommandError {
  fn help_message(&self) -> Option<String> {
    if self.command.starts_with("gh ") && (self.stderr.contains("auth login") || self.stderr.contains("GH_TOKEN")) {
      Some("Authenticate the GitHub CLI with `gh auth login` or export GH_TOKEN.".to_string())
    } else if self.stderr.contains("Permission denied (publickey)") {
      Some("Check that your SSH key is loaded and has access to the repository.".to_string())
    } else if self.stderr.contains("No such file or directory") || self.stderr.contains("not found") {
      Some("Make sure the program is installed and every repository is cloned (`dep-cascade clone`).".to_string())
    } else {
      None
    }
  }
}

impl fmt::Display for ExternalCommandError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Command failed: {}", self.command)?;
    let stderr = self.stderr.trim_end();
    if !stderr.is_empty() {
      write!(f, "\n{}", stderr)?;
    }
    Ok(())
  }
}

/// A manifest that could not be read or parsed
#[derive(Debug)]
pub struct ManifestError {
  pub path: PathBuf,
  pub reason: String,
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Invalid manifest {}: {}", self.path.display(), self.reason)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit config path does not exist
  NotFound { path: PathBuf },

  /// A repository is listed more than once
  DuplicateRepository { name: String },

  /// Config parsed but is not usable
  Invalid { reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use cascade.toml from the root, or the built-in ecosystem.".to_string())
      }
      ConfigError::DuplicateRepository { name } => Some(format!(
        "Each repository belongs to exactly one tier. Remove '{}' from all but one tier.",
        name
      )),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::DuplicateRepository { name } => {
        write!(f, "Repository '{}' appears more than once in the tier configuration", name)
      }
      ConfigError::Invalid { reason } => write!(f, "Invalid configuration: {}", reason),
    }
  }
}

/// A tier that aborted the cascade
#[derive(Debug)]
pub struct TierFailure {
  pub tier: Tier,
  pub repository: String,
  pub error: CascadeError,
}

impl TierFailure {
  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Tier(self.tier)
  }
}

impl fmt::Display for TierFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} tier aborted at '{}': {}",
      self.tier.label(),
      self.repository,
      self.error
    )
  }
}

/// Result type alias for dep-cascade
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> CascadeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> CascadeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<CascadeError>,
{
  fn context(self, ctx: impl Into<String>) -> CascadeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> CascadeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &CascadeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Pretty-print a tier failure to stderr
pub fn print_tier_failure(failure: &TierFailure) {
  eprintln!("\n❌ {}\n", failure);

  if let Some(help) = failure.error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
