//! ocrflow Core Library
//!
//! This crate provides the domain models, configuration, and telemetry setup
//! shared across all ocrflow components.

pub mod config;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use telemetry::{init_telemetry, shutdown_telemetry};
