use serde::Serialize;

use crate::core::context::WorkspaceContext;
use crate::core::error::CascadeResult;
use crate::core::registry::{Repository, Tier};

/// One tier of the plan, as printed by `plan --json`
#[derive(Debug, Serialize)]
pub struct TierView<'a> {
  pub tier: Tier,
  pub exit_code: i32,
  pub repositories: Vec<&'a Repository>,
}

/// Tiers in processing order with their repositories
pub fn tier_views(ctx: &WorkspaceContext) -> Vec<TierView<'_>> {
  Tier::ALL
    .iter()
    .map(|tier| TierView {
      tier: *tier,
      exit_code: tier.exit_code(),
      repositories: ctx.plan.tier(*tier).collect(),
    })
    .collect()
}

/// Run the plan command
pub fn run_plan(ctx: &WorkspaceContext, json: bool) -> CascadeResult<()> {
  let views = tier_views(ctx);

  if json {
    println!("{}", serde_json::to_string_pretty(&views)?);
    return Ok(());
  }

  println!("🗺️  Cascade plan for {}", ctx.root.display());
  println!("════════════════════════════════════════");
  for view in &views {
    println!("\n{} tier (exit code {})", view.tier.label(), view.exit_code);
    if view.repositories.is_empty() {
      println!("  (none)");
    }
    for repository in &view.repositories {
      println!("  📦 {:<28} {}", repository.name, repository.manifest.display());
    }
  }
  println!();

  Ok(())
}
