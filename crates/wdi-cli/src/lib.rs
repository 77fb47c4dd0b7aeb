//! CLI library components for the world-indicator explorer.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod ticker;
