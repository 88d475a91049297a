//! # Ledgergas Common
//!
//! Shared types, errors, and configuration for deterministic gas accounting.
//!
//! ## Core Types
//!
//! - [`Gas`]: unit of bounded resource consumption
//! - [`GasCategory`]: closed set of operation tags; per-byte reads and writes are scalable
//! - [`GasInfo`]: gas wanted/used report for a finished unit of work
//!
//! ## Errors
//!
//! - [`GasError`]: out-of-gas, overflow, and configuration failures
//! - [`ConfigError`]: invalid construction parameters
//!
//! ## Configuration
//!
//! - [`GasConfig`]: limits, pricing parameters, and store cost tables

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{GasConfig, KvGasConfig, PricingConfig};
pub use error::{ConfigError, GasError, Result};
pub use types::{
    category::{GasCategory, DESCRIPTOR_SET_VERSION},
    gas_info::GasInfo,
    Gas,
};

/// Ledgergas version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
