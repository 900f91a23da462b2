//! Tests for `dep-cascade plan` and configuration loading

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_plan_json_follows_tier_order() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.write_config(
    r#"single = ["util"]
first_level = ["lib-a", "lib-b"]
top_level = ["app-top"]
distribution = [{ name = "app-docker", manifest = "docker/package.json" }]"#,
  )?;

  let output = eco.run(&["plan", "--json"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  let plan: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let tiers: Vec<&str> = plan
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["tier"].as_str().unwrap())
    .collect();
  assert_eq!(tiers, vec!["single", "first-level", "top-level", "distribution"]);
  assert_eq!(plan[1]["repositories"][1]["name"], "lib-b");
  assert_eq!(plan[3]["repositories"][0]["manifest"], "docker/package.json");
  assert_eq!(plan[2]["exit_code"], -3);

  Ok(())
}

#[test]
fn test_plan_without_config_uses_builtin_ecosystem() -> Result<()> {
  let eco = Ecosystem::new()?;

  let output = eco.run(&["plan"])?;
  assert_eq!(exit_code(&output), Some(0), "stderr: {}", stderr(&output));

  let text = stdout(&output);
  assert!(text.contains("nodeEUETS"));
  assert!(text.contains("tanatloc-docker"));
  assert!(text.contains("docker/package.json"));

  Ok(())
}

#[test]
fn test_duplicate_repository_is_rejected() -> Result<()> {
  let eco = Ecosystem::new()?;
  eco.write_config(
    r#"first_level = ["lib-a"]
top_level = ["lib-a"]"#,
  )?;

  let output = eco.run(&["plan"])?;
  assert_eq!(exit_code(&output), Some(1));
  assert!(stderr(&output).contains("more than once"));

  Ok(())
}

#[test]
fn test_missing_explicit_config_is_a_user_error() -> Result<()> {
  let eco = Ecosystem::new()?;
  let missing = eco.root.join("nope.toml");

  let output = eco.run(&["--config", missing.to_str().unwrap(), "plan"])?;
  assert_eq!(exit_code(&output), Some(1));
  assert!(stderr(&output).contains("Config file not found"));

  Ok(())
}
