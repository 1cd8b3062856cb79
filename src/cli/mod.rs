//! CLI command handlers for tileforms.
//!
//! This module provides headless, scriptable access to the tile forms
//! functionality for automation and testing.

pub mod check_id;
pub mod common;
pub mod config;
pub mod edit;
pub mod list;
pub mod project;
pub mod validate;

// Re-export types used by main.rs and tests
pub use check_id::CheckIdArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use edit::EditArgs;
pub use list::ListArgs;
pub use project::ProjectArgs;
pub use validate::ValidateArgs;
