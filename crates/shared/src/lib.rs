//! Shared types, errors, and configuration for Ledgerline.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe snapshot references
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber bootstrap

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AggregationConfig, AppConfig, ClosingConfig, LoggingConfig};
pub use error::{AppError, AppResult};
