//! drawline-migrate: rewrites `drawLine()` E2E snippets to `drawLineAndOpenModal()`
//!
//! The library exposes the migration and rewriter for integration and
//! property-based tests. The binary is at src/main.rs.

pub mod cli;
pub mod config;
pub mod diff_formatter;
pub mod error_helpers;
pub mod logger;
pub mod migration;
pub mod rewriter;

// Re-export commonly used types for convenience
pub use config::Config;
pub use diff_formatter::DiffFormatter;
pub use migration::{DEFAULT_TARGET, MatchedCall, Migration, RewriteOutcome};
pub use rewriter::{ChangeType, FileDiff, LineChange, Rewriter};
