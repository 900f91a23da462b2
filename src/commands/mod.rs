//! CLI commands for dep-cascade
//!
//! - **update**: Run the tiered dependency cascade
//! - **check**: Run every release script in validation mode
//! - **clone**: Clone and update every repository of the ecosystem
//! - **plan**: Show the tier plan
//!
//! All commands accept `&WorkspaceContext` to avoid reloading configuration.

pub mod check;
pub mod clone;
pub mod plan;
pub mod update;

pub use check::run_check;
pub use clone::run_clone;
pub use plan::run_plan;
pub use update::run_update;
