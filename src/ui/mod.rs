//! Terminal output: log subscriber and progress bars

pub mod logging;
pub mod progress;
