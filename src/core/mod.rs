//! Core engine for dep-cascade
//!
//! This module contains the building blocks behind every command:
//!
//! - **bootstrap**: Clone and update every repository of the ecosystem
//! - **check**: Release-script validation sweep in tier order
//! - **config**: Cascade configuration (cascade.toml) parsing and validation
//! - **context**: Workspace context shared by commands, plus per-run state
//! - **delay**: Registry propagation wait
//! - **error**: Error types with contextual help messages and exit codes
//! - **exit**: Mapping of failures to process exit codes
//! - **manifest**: package.json loading and internal dependency rewriting
//! - **orchestrator**: The tiered update cascade
//! - **registry**: Tiers, their roles, and the ordered repository plan
//! - **runner**: External command execution
//! - **versions**: Versions observed during a run
//! - **vcs**: git and GitHub CLI operations

pub mod bootstrap;
pub mod check;
pub mod config;
pub mod context;
pub mod delay;
pub mod error;
pub mod exit;
pub mod manifest;
pub mod orchestrator;
pub mod registry;
pub mod runner;
pub mod vcs;
pub mod versions;
