//! Integration tests for dep-cascade
//!
//! Every test builds real git repositories with bare origins in a temp dir and runs
//! the compiled binary against them.

mod test_check;
mod test_clone;
mod test_plan;
mod test_update;
