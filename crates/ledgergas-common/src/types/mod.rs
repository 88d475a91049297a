//! Core data types for gas accounting

pub mod category;
pub mod gas_info;

/// Unit used to measure gas
pub type Gas = u64;
