//! Error types for gas accounting
//!
//! Provides the unified gas error and the configuration error variants

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Gas;

/// Result type alias using GasError
pub type Result<T> = std::result::Result<T, GasError>;

/// Unified error type for gas metering operations
///
/// Both `OutOfGas` and `Overflow` are fatal for the enclosing unit of work.
/// The transaction layer catches them once and discards the unit's state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GasError {
    #[error("out of gas in location: {descriptor}; limit: {limit}, consumed: {consumed}, requested: {requested}")]
    OutOfGas {
        descriptor: String,
        limit: Gas,
        consumed: Gas,
        requested: Gas,
    },

    #[error("gas overflow in location: {descriptor}; consumed: {consumed}, requested: {requested}")]
    Overflow {
        descriptor: String,
        consumed: Gas,
        requested: Gas,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GasError {
    /// True for the ceiling breach, the one condition callers translate
    /// into a failed-transaction result rather than a node error.
    pub fn is_out_of_gas(&self) -> bool {
        matches!(self, GasError::OutOfGas { .. })
    }

    /// Descriptor of the consumption call that raised the error, if any.
    pub fn descriptor(&self) -> Option<&str> {
        match self {
            GasError::OutOfGas { descriptor, .. } | GasError::Overflow { descriptor, .. } => {
                Some(descriptor)
            }
            GasError::Config(_) => None,
        }
    }
}

/// Construction-time configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid pricing base {base}: a logarithmic schedule needs a finite base > 1")]
    InvalidBase { base: String },

    #[error("Gas limit must be positive")]
    ZeroLimit,

    #[error("Invalid value for {key}: {value}")]
    Env { key: String, value: String },

    #[error("Failed to parse gas config: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn invalid_base(base: Decimal) -> Self {
        ConfigError::InvalidBase {
            base: base.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
