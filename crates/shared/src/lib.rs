//! Shared types, errors, and configuration for Fiscora.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with a stable machine-readable taxonomy
//! - Configuration management (database, retention-rate table)
//! - Strict decimal parsing and formatting for monetary amounts

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
