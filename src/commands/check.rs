use crate::core::check::CheckSweep;
use crate::core::context::WorkspaceContext;
use crate::core::exit::Failure;
use crate::core::runner::SystemRunner;

/// Run the check command
///
/// Every failure is reported in visiting order; the exit code is the first failing tier's.
pub fn run_check(ctx: &WorkspaceContext, keep_going: bool) -> Result<(), Failure> {
  let runner = SystemRunner;
  let total = ctx.plan.repositories().len();

  println!("🔍 Checking {} repositories", total);

  let mut failures = CheckSweep::new(&runner, ctx).run(keep_going).into_iter();
  let Some(first) = failures.next() else {
    println!("\n✅ All release scripts passed");
    return Ok(());
  };

  let rest: Vec<_> = failures.collect();
  if rest.is_empty() {
    return Err(first.into());
  }

  Err(Failure::Sweep { first, rest })
}
