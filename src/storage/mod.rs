//! # Storage Layer
//!
//! Session state and configuration for taskboard.
//!
//! | Data | Where | Lifetime |
//! |------|-------|----------|
//! | Projects and tasks | [`Store`], in memory | One session |
//! | Limits | `config.toml`, `.env`, environment | Read once at startup |
//!
//! ## Key Types
//!
//! - [`Store`] - Owns every project (and through them every task)
//! - [`Config`] - Effective limits and display settings
//! - [`Limits`] / [`EntityLimits`] - Numeric limits handed to the domain

mod config;
mod memory;

pub use config::{Config, ConfigError, DisplayConfig, EntityLimits, Limits};
pub use memory::Store;
