//! End-to-end tests for `dep-cascade update`
#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

const TIERS: &str = r#"single = ["util"]
first_level = ["lib-a"]
top_level = ["app-top"]
distribution = ["app-dist"]"#;

/// util and lib-a at fresh versions; app-top and app-dist still depend on older ones
fn ecosystem() -> Result<Ecosystem> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "2.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.2.0", &[("@scope/util", "2.0.0")], PASSING_SCRIPT)?;
  eco.add_repository(
    "app-top",
    "3.0.0",
    &[("@scope/lib-a", "1.1.0"), ("left-pad", "1.3.0")],
    PASSING_SCRIPT,
  )?;
  eco.add_repository("app-dist", "3.0.0", &[("@scope/app-top", "3.0.0")], PASSING_SCRIPT)?;
  eco.write_config(TIERS)?;
  Ok(eco)
}

#[test]
fn test_merged_pr_cascades_into_top_level() -> Result<()> {
  let eco = ecosystem()?;
  eco.open_pr("lib-a", 7)?;

  let report = eco.root.join("report.json");
  let output = eco.run(&["update", "--wait-secs", "0", "--report", report.to_str().unwrap()])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  // Merged and released in the first-level tier
  let calls = eco.calls()?;
  assert_eq!(calls[0], "lib-a merge 7 --squash");
  assert_eq!(calls[1], "lib-a release");
  assert!(calls.contains(&"app-top release".to_string()));
  assert!(!calls.iter().any(|c| c.starts_with("util")));
  // app-dist already pins app-top 3.0.0
  assert!(!calls.iter().any(|c| c.starts_with("app-dist")));

  // Propagated on the integration branch and pushed
  let manifest = eco.origin_manifest("app-top", "hotfix")?;
  assert_eq!(manifest["dependencies"]["@scope/lib-a"], "1.2.0");
  assert_eq!(manifest["dependencies"]["left-pad"], "1.3.0");
  assert_eq!(eco.origin_head_subject("app-top", "hotfix")?, "@scope dependencies");
  assert_eq!(eco.origin_head_subject("app-top", "dev")?, "Initial commit");

  // The working copy is back on the working branch
  let head = git(&eco.root.join("app-top"), &["rev-parse", "--abbrev-ref", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "dev");

  let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report)?)?;
  assert_eq!(report["waited"], true);
  assert_eq!(report["versions"]["lib-a"], "1.2.0");
  assert_eq!(report["outcomes"][1]["merged_pr"], 7);
  assert_eq!(report["outcomes"][2]["changes"][0]["from"], "1.1.0");
  assert!(report["failure"].is_null());

  Ok(())
}

#[test]
fn test_nothing_pending_changes_nothing() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "2.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.2.0", &[("@scope/util", "2.0.0")], PASSING_SCRIPT)?;
  eco.add_repository("app-top", "3.0.0", &[("@scope/lib-a", "1.2.0")], PASSING_SCRIPT)?;
  eco.add_repository("app-dist", "3.0.0", &[("@scope/app-top", "3.0.0")], PASSING_SCRIPT)?;
  eco.write_config(TIERS)?;

  let output = eco.run(&["update", "--wait-secs", "0"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  assert!(eco.calls()?.is_empty());
  assert_eq!(eco.origin_head_subject("app-top", "hotfix")?, "Initial commit");
  assert_eq!(eco.origin_head_subject("app-dist", "dev")?, "Initial commit");
  assert!(stdout(&output).contains("0 of 4 repositories changed"));

  Ok(())
}

#[test]
fn test_first_level_failure_stops_the_cascade() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "2.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.2.0", &[], FAILING_SCRIPT)?;
  eco.add_repository("app-top", "3.0.0", &[("@scope/lib-a", "1.1.0")], PASSING_SCRIPT)?;
  eco.add_repository("app-dist", "3.0.0", &[], PASSING_SCRIPT)?;
  eco.write_config(TIERS)?;
  eco.open_pr("lib-a", 3)?;

  let output = eco.run(&["update", "--wait-secs", "0"])?;

  // -2 as seen by the shell
  assert_eq!(exit_code(&output), Some(254));
  assert!(stderr(&output).contains("first-level tier aborted at 'lib-a'"));
  assert!(stderr(&output).contains("lint failed"));

  // Nothing after lib-a was touched
  let calls = eco.calls()?;
  assert_eq!(calls, vec!["lib-a merge 3 --squash", "lib-a release"]);
  assert_eq!(eco.origin_head_subject("app-top", "hotfix")?, "Initial commit");

  Ok(())
}

#[test]
fn test_distribution_propagates_in_place() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.add_repository("util", "2.0.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("lib-a", "1.2.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("app-top", "3.1.0", &[], PASSING_SCRIPT)?;
  eco.add_repository("app-dist", "3.0.0", &[("@scope/app-top", "^3.0.0")], PASSING_SCRIPT)?;
  eco.write_config(TIERS)?;

  let output = eco.run(&["update", "--wait-secs", "0"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  let manifest = eco.origin_manifest("app-dist", "dev")?;
  assert_eq!(manifest["dependencies"]["@scope/app-top"], "3.1.0");
  assert_eq!(eco.calls()?, vec!["app-dist release"]);

  Ok(())
}
