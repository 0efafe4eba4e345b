//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Analysis commands (analyze, risk, predict, baseline, secure)
//!   and the shared expense-file loader
//! - `serve` - Web server command

pub mod analysis;
pub mod serve;

// Re-export command functions for main.rs
pub use analysis::*;
pub use serve::*;
