use crate::core::error::{CascadeResult, ConfigError, ResultExt};
use crate::core::registry::Tier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for dep-cascade
/// Searched in order under the root: cascade.toml, .cascade.toml, .config/cascade.toml
///
/// Every section is optional; missing sections fall back to the built-in ecosystem.
///
/// # Example
///
/// ```toml
/// [ecosystem]
/// scope = "@acme/"
/// propagation_wait_secs = 60
///
/// [tiers]
/// single = ["utils"]
/// first_level = ["lib-a", "lib-b"]
/// top_level = ["app"]
/// distribution = [{ name = "app-docker", manifest = "docker/package.json" }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CascadeConfig {
  #[serde(default)]
  pub ecosystem: EcosystemConfig,
  #[serde(default)]
  pub hosting: HostingConfig,
  #[serde(default)]
  pub tiers: TiersConfig,
}

/// Conventions shared by every repository in the ecosystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemConfig {
  /// Package name prefix marking internal dependencies (e.g. "@airthium/")
  #[serde(default = "default_scope")]
  pub scope: String,

  /// Long-lived branch that receives dependency propagation in the top-level tier
  #[serde(default = "default_integration_branch")]
  pub integration_branch: String,

  /// Day-to-day branch repositories are left on
  #[serde(default = "default_working_branch")]
  pub working_branch: String,

  /// Release script, relative to each repository root
  #[serde(default = "default_release_script")]
  pub release_script: PathBuf,

  /// Message of the propagation commit
  #[serde(default = "default_commit_message")]
  pub commit_message: String,

  /// Total wait for the package registry before the top-level tier
  #[serde(default = "default_propagation_wait_secs")]
  pub propagation_wait_secs: u64,

  /// Clone prefix: `<remote><name>.git`, or a local directory holding the repositories
  #[serde(default = "default_remote")]
  pub remote: String,
}

fn default_scope() -> String {
  "@airthium/".to_string()
}

fn default_integration_branch() -> String {
  "hotfix".to_string()
}

fn default_working_branch() -> String {
  "dev".to_string()
}

fn default_release_script() -> PathBuf {
  PathBuf::from(".github/hotfix.sh")
}

fn default_commit_message() -> String {
  "@airthium dependencies".to_string()
}

fn default_propagation_wait_secs() -> u64 {
  120
}

fn default_remote() -> String {
  "git@github.com:Airthium/".to_string()
}

impl Default for EcosystemConfig {
  fn default() -> Self {
    Self {
      scope: default_scope(),
      integration_branch: default_integration_branch(),
      working_branch: default_working_branch(),
      release_script: default_release_script(),
      commit_message: default_commit_message(),
      propagation_wait_secs: default_propagation_wait_secs(),
      remote: default_remote(),
    }
  }
}

/// PR hosting CLI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingConfig {
  /// Hosting CLI executable (GitHub CLI compatible)
  #[serde(default = "default_hosting_program")]
  pub program: String,

  /// App identity authoring the automated dependency PRs
  #[serde(default = "default_bot")]
  pub bot: String,
}

fn default_hosting_program() -> String {
  "gh".to_string()
}

fn default_bot() -> String {
  "renovate".to_string()
}

impl Default for HostingConfig {
  fn default() -> Self {
    Self {
      program: default_hosting_program(),
      bot: default_bot(),
    }
  }
}

/// Tier membership, in processing order within each tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiersConfig {
  #[serde(default)]
  pub single: Vec<RepositoryEntry>,
  #[serde(default)]
  pub first_level: Vec<RepositoryEntry>,
  #[serde(default)]
  pub top_level: Vec<RepositoryEntry>,
  #[serde(default)]
  pub distribution: Vec<RepositoryEntry>,
}

impl TiersConfig {
  pub fn entries(&self, tier: Tier) -> &[RepositoryEntry] {
    match tier {
      Tier::Single => &self.single,
      Tier::FirstLevel => &self.first_level,
      Tier::TopLevel => &self.top_level,
      Tier::Distribution => &self.distribution,
    }
  }
}

impl Default for TiersConfig {
  fn default() -> Self {
    let names = |list: &[&str]| list.iter().map(|n| RepositoryEntry::Name(n.to_string())).collect();

    Self {
      single: names(&["nodeEUETS"]),
      first_level: names(&[
        "deep-object-diff",
        "extract-json-from-string",
        "pg-format",
        "pg-native",
        "tanatloc-formula-validator",
        "tanatloc-template-parser",
        "typedoc-plugin-airthium",
        "tanatloc-3d",
      ]),
      top_level: names(&["airthium.com", "airthium.com-calculator", "tanatloc"]),
      distribution: vec![
        RepositoryEntry::Detailed {
          name: "tanatloc-docker".to_string(),
          manifest: Some("docker/package.json".to_string()),
        },
        RepositoryEntry::Name("tanatloc-electron".to_string()),
        RepositoryEntry::Name("tanatloc-electron-full".to_string()),
      ],
    }
  }
}

/// A repository in a tier list: either a bare name or a table with a manifest override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
  Name(String),
  Detailed {
    name: String,
    #[serde(default)]
    manifest: Option<String>,
  },
}

impl RepositoryEntry {
  pub fn name(&self) -> &str {
    match self {
      RepositoryEntry::Name(name) => name,
      RepositoryEntry::Detailed { name, .. } => name,
    }
  }

  pub fn manifest(&self) -> Option<&str> {
    match self {
      RepositoryEntry::Name(_) => None,
      RepositoryEntry::Detailed { manifest, .. } => manifest.as_deref(),
    }
  }
}

impl CascadeConfig {
  /// Find config file in search order: cascade.toml, .cascade.toml, .config/cascade.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = [
      root.join("cascade.toml"),
      root.join(".cascade.toml"),
      root.join(".config").join("cascade.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from an explicit path, the root's cascade.toml, or the built-in defaults
  pub fn load(root: &Path, explicit: Option<&Path>) -> CascadeResult<Self> {
    let config_path = match explicit {
      Some(path) if !path.exists() => {
        return Err(ConfigError::NotFound { path: path.to_path_buf() }.into());
      }
      Some(path) => Some(path.to_path_buf()),
      None => Self::find_config_path(root),
    };

    let Some(config_path) = config_path else {
      tracing::debug!("No cascade.toml found under {}, using built-in ecosystem", root.display());
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: CascadeConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    tracing::debug!("Loaded configuration from {}", config_path.display());
    Ok(config)
  }

  /// Validate values that serde cannot
  pub fn validate(&self) -> CascadeResult<()> {
    let invalid = |reason: &str| -> CascadeResult<()> {
      Err(
        ConfigError::Invalid {
          reason: reason.to_string(),
        }
        .into(),
      )
    };

    if self.ecosystem.scope.trim().is_empty() {
      return invalid("ecosystem.scope must not be empty");
    }
    if self.ecosystem.release_script.as_os_str().is_empty() {
      return invalid("ecosystem.release_script must not be empty");
    }
    if self.ecosystem.integration_branch.trim().is_empty() || self.ecosystem.working_branch.trim().is_empty() {
      return invalid("ecosystem branches must not be empty");
    }
    if self.hosting.program.trim().is_empty() {
      return invalid("hosting.program must not be empty");
    }

    Ok(())
  }
}
