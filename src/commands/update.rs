use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::context::{RepositoryOutcome, RunContext, WorkspaceContext};
use crate::core::delay::{PropagationDelay, ThreadSleeper};
use crate::core::error::{CascadeResult, ResultExt, TierFailure};
use crate::core::exit::Failure;
use crate::core::orchestrator::TierOrchestrator;
use crate::core::registry::Tier;
use crate::core::runner::SystemRunner;
use crate::core::versions::VersionTable;

/// Where a run stopped
#[derive(Debug, Serialize)]
pub struct FailureSummary {
  pub tier: Tier,
  pub repository: String,
  pub exit_code: i32,
  pub message: String,
  /// Failing external command, when there was one
  pub command: Option<String>,
}

impl From<&TierFailure> for FailureSummary {
  fn from(failure: &TierFailure) -> Self {
    Self {
      tier: failure.tier,
      repository: failure.repository.clone(),
      exit_code: failure.exit_code().as_i32(),
      message: failure.error.to_string(),
      command: failure.error.command_error().map(|e| e.command.clone()),
    }
  }
}

/// Machine-readable record of one `update` run
#[derive(Debug, Serialize)]
pub struct RunReport {
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  /// Whether the registry wait ran before the top-level tier
  pub waited: bool,
  pub versions: VersionTable,
  /// Visited repositories in visitation order
  pub outcomes: Vec<RepositoryOutcome>,
  pub failure: Option<FailureSummary>,
}

impl RunReport {
  pub fn from_run(run: RunContext, failure: Option<&TierFailure>) -> Self {
    Self {
      started_at: run.started_at,
      finished_at: Utc::now(),
      waited: run.waited,
      versions: run.versions,
      outcomes: run.outcomes,
      failure: failure.map(FailureSummary::from),
    }
  }

  pub fn write(&self, path: &Path) -> CascadeResult<()> {
    let json = serde_json::to_string_pretty(self)?;
    fs::write(path, json + "\n").with_context(|| format!("Failed to write run report to {}", path.display()))?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
  }
}

/// Run the update command
///
/// `wait_secs` overrides the configured registry wait.
pub fn run_update(ctx: &WorkspaceContext, wait_secs: Option<u64>, report_path: Option<&Path>) -> Result<(), Failure> {
  let runner = SystemRunner;
  let sleeper = ThreadSleeper;
  let wait = wait_secs.unwrap_or(ctx.config.ecosystem.propagation_wait_secs);
  let delay = PropagationDelay::new(Duration::from_secs(wait));

  let orchestrator = TierOrchestrator::new(&runner, &sleeper, &ctx.config, delay);
  let mut run = RunContext::new(ctx);
  let result = orchestrator.run(&mut run);

  let report = RunReport::from_run(run, result.as_ref().err());

  if let Some(path) = report_path
    && let Err(error) = report.write(path)
  {
    // A tier failure decides the exit code over a report write failure
    if result.is_ok() {
      return Err(error.into());
    }
    tracing::error!("{}", error);
  }

  print_summary(&report);
  result.map_err(Failure::from)
}

fn print_summary(report: &RunReport) {
  println!("\n📦 Cascade summary");
  println!("════════════════════════════════════════");

  for outcome in &report.outcomes {
    let icon = if outcome.is_changed() { "🚀" } else { "·" };
    let version = outcome.version.as_deref().unwrap_or("?");
    println!("  {} {:<28} {}", icon, outcome.name, version);

    if let Some(number) = outcome.merged_pr {
      println!("      merged PR #{}", number);
    }
    for change in &outcome.changes {
      println!("      {} {} → {}", change.name, change.from, change.to);
    }
  }

  if report.versions.is_empty() {
    println!("  No versions recorded");
  }
  if report.waited {
    println!("\n⏳ Waited for registry publish before the top-level tier");
  }

  let changed = report.outcomes.iter().filter(|o| o.is_changed()).count();
  match &report.failure {
    None => println!("\n✅ Cascade complete: {} of {} repositories changed", changed, report.outcomes.len()),
    Some(failure) => println!(
      "\n❌ Cascade stopped in the {} tier at '{}'",
      failure.tier.label(),
      failure.repository
    ),
  }
}
