//! Tests for `dep-cascade clone`
#![cfg(unix)]

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_clone_is_best_effort() -> Result<()> {
  let eco = Ecosystem::new()?;

  // Origins only: create, then drop the checkouts made by the helper
  eco.add_repository("lib-a", "1.0.0", &[], PASSING_SCRIPT)?;
  std::fs::remove_dir_all(eco.root.join("lib-a"))?;
  eco.add_origin_without_dev("util")?;
  eco.write_config(
    r#"single = ["util"]
first_level = ["lib-a", "ghost"]"#,
  )?;

  let output = eco.run(&["clone"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  // Default branch fallback for util
  let head = git(&eco.root.join("util"), &["rev-parse", "--abbrev-ref", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "main");

  let head = git(&eco.root.join("lib-a"), &["rev-parse", "--abbrev-ref", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "dev");
  assert!(eco.root.join("lib-a/package.json").exists());

  assert!(!eco.root.join("ghost").exists());
  let text = stdout(&output);
  assert!(text.contains("Cloned:  2"));
  assert!(text.contains("Updated: 0"));
  assert!(text.contains("1 repositories failed"));
  assert!(text.contains("ghost"));

  Ok(())
}

#[test]
fn test_existing_checkout_is_updated() -> Result<()> {
  let eco = Ecosystem::new()?;
  let repo = eco.add_repository("lib-a", "1.0.0", &[], PASSING_SCRIPT)?;
  eco.write_config(r#"first_level = ["lib-a"]"#)?;

  // New commit on the origin, pushed from a second clone
  let other = eco.origins.join("lib-a-other");
  git(&eco.origins, &["clone", "-b", "dev", "lib-a", "lib-a-other"])?;
  git(&other, &["config", "user.name", "Test User"])?;
  git(&other, &["config", "user.email", "test@example.com"])?;
  write_manifest(&other.join("package.json"), "lib-a", "1.1.0", &[])?;
  git(&other, &["commit", "-am", "Release 1.1.0"])?;
  git(&other, &["push", "origin", "dev"])?;

  let output = eco.run(&["clone"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  let manifest: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(repo.join("package.json"))?)?;
  assert_eq!(manifest["version"], "1.1.0");
  assert!(stdout(&output).contains("Cloned:  0"));
  assert!(stdout(&output).contains("Updated: 1"));

  Ok(())
}
