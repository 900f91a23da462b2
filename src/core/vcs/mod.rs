//! Typed wrappers over the git and PR-hosting command lines

pub mod github;
pub mod system_git;

pub use github::GitHub;
pub use system_git::SystemGit;
