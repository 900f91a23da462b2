use crate::core::bootstrap::Bootstrap;
use crate::core::context::WorkspaceContext;
use crate::core::error::CascadeResult;
use crate::core::runner::SystemRunner;
use crate::ui::progress::RepoProgress;

/// Run the clone command
///
/// Best-effort: failures are listed but do not change the exit status.
pub fn run_clone(ctx: &WorkspaceContext) -> CascadeResult<()> {
  let runner = SystemRunner;
  let total = ctx.plan.repositories().len();

  println!("📥 Cloning {} repositories into {}", total, ctx.root.display());

  let mut progress = RepoProgress::new(total, "Repositories");
  let summary = Bootstrap::new(&runner, ctx).run(&mut |_| progress.inc());

  println!();
  println!("   Cloned:  {}", summary.cloned.len());
  println!("   Updated: {}", summary.updated.len());

  if summary.failed.is_empty() {
    println!("\n✅ All repositories ready");
  } else {
    println!("\n⚠️  {} repositories failed:", summary.failed.len());
    for (name, reason) in &summary.failed {
      println!("   ❌ {}: {}", name, reason.lines().next().unwrap_or_default());
    }
  }

  Ok(())
}
