//! # Command-Line Interface
//!
//! The interactive session and its output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `shell` (default) | Project menu, with a task menu per project |
//! | `limits` | Print the effective limits |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Menus, prompts and human-readable views
//! - `json` - No menus or prompts; one JSON document per result line
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! taskboard --verbose
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the session.

mod app;
mod output;
mod render;
mod session;
mod task_menu;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use session::Session;
