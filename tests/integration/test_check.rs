//! Tests for `dep-cascade check`
#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

const TIERS: &str = r#"single = ["util"]
first_level = ["lib-a", "lib-b"]
top_level = ["app-top"]"#;

#[test]
fn test_every_script_runs_without_arguments() -> Result<()> {
  let eco = Ecosystem::new()?;
  for name in ["util", "lib-a", "lib-b", "app-top"] {
    eco.add_repository(name, "1.0.0", &[], PASSING_SCRIPT)?;
  }
  eco.write_config(TIERS)?;

  let output = eco.run(&["check"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  // Trailing space: the script echoes its (empty) argument list
  assert_eq!(eco.calls()?, vec!["util ", "lib-a ", "lib-b ", "app-top "]);

  Ok(())
}

#[test]
fn test_failure_stops_the_sweep() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.0.0", &[], FAILING_SCRIPT)?;
  eco.add_repository("lib-b", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("app-top", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.write_config(TIERS)?;

  let output = eco.run(&["check"])?;
  assert_eq!(exit_code(&output), Some(254));
  assert_eq!(eco.calls()?, vec!["util ", "lib-a "]);

  Ok(())
}

#[test]
fn test_keep_going_reports_first_failing_tier() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.0.0", &[], FAILING_SCRIPT)?;
  eco.add_repository("lib-b", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("app-top", "1.0.0", &[], FAILING_SCRIPT)?;
  eco.write_config(TIERS)?;

  let output = eco.run(&["check", "--keep-going"])?;
  assert_eq!(exit_code(&output), Some(254));
  assert_eq!(eco.calls()?.len(), 4);

  let err = stderr(&output);
  let lib_a = err.find("first-level tier aborted at 'lib-a'");
  let app_top = err.find("top-level tier aborted at 'app-top'");
  assert!(lib_a.is_some() && app_top.is_some(), "stderr: {}", err);
  assert!(lib_a < app_top, "failures out of order: {}", err);

  Ok(())
}

#[test]
fn test_help_describes_keep_going() -> Result<()> {
  let eco = Ecosystem::new()?;

  let output = eco.run(&["check", "--help"])?;
  assert_eq!(exit_code(&output), Some(0));
  assert!(stdout(&output).contains("finish the sweep instead of stopping at the first failure"));

  Ok(())
}
