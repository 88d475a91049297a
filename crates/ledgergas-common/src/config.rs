//! Gas configuration
//!
//! Defaults can be overridden from `LEDGERGAS_*` environment variables
//! (optionally through a `.env` file) or loaded from JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::error::ConfigError;
use crate::types::Gas;

pub const ENV_BLOCK_GAS_LIMIT: &str = "LEDGERGAS_BLOCK_GAS_LIMIT";
pub const ENV_TX_GAS_LIMIT: &str = "LEDGERGAS_TX_GAS_LIMIT";
pub const ENV_PRICING_ENABLED: &str = "LEDGERGAS_PRICING_ENABLED";
pub const ENV_PRICING_BASE: &str = "LEDGERGAS_PRICING_BASE";
pub const ENV_PRICING_SHIFT: &str = "LEDGERGAS_PRICING_SHIFT";

/// Default per-transaction ceiling
pub const DEFAULT_TX_GAS_LIMIT: Gas = 200_000;

/// Gas configuration for a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    /// Block-wide ceiling; `None` runs blocks under an infinite meter
    pub block_gas_limit: Option<Gas>,
    /// Per-transaction ceiling
    pub tx_gas_limit: Gas,
    /// Sub-linear pricing of per-byte store access
    pub pricing: PricingConfig,
    /// Persistent store cost table
    pub kv: KvGasConfig,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            block_gas_limit: None,
            tx_gas_limit: DEFAULT_TX_GAS_LIMIT,
            pricing: PricingConfig::default(),
            kv: KvGasConfig::kv(),
        }
    }
}

impl GasConfig {
    /// Load configuration from `.env` and the process environment
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup(ENV_BLOCK_GAS_LIMIT) {
            let val = val.trim();
            cfg.block_gas_limit = if val.is_empty() || val.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_env(ENV_BLOCK_GAS_LIMIT, val)?)
            };
        }
        if let Some(val) = lookup(ENV_TX_GAS_LIMIT) {
            cfg.tx_gas_limit = parse_env(ENV_TX_GAS_LIMIT, &val)?;
        }
        if let Some(val) = lookup(ENV_PRICING_ENABLED) {
            cfg.pricing.enabled = parse_env(ENV_PRICING_ENABLED, &val)?;
        }
        if let Some(val) = lookup(ENV_PRICING_BASE) {
            cfg.pricing.base = parse_env(ENV_PRICING_BASE, &val)?;
        }
        if let Some(val) = lookup(ENV_PRICING_SHIFT) {
            cfg.pricing.shift = parse_env(ENV_PRICING_SHIFT, &val)?;
        }

        cfg.validate()?;
        debug!(
            tx_gas_limit = cfg.tx_gas_limit,
            block_gas_limit = ?cfg.block_gas_limit,
            pricing_enabled = cfg.pricing.enabled,
            "Loaded gas config"
        );
        Ok(cfg)
    }

    /// Parse a JSON config; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject parameters that cannot build a working meter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tx_gas_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if self.block_gas_limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }
        if self.pricing.enabled && self.pricing.base <= Decimal::ONE {
            return Err(ConfigError::invalid_base(self.pricing.base));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parameters of the logarithmic per-byte pricing schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Apply the schedule; when false every category is identity-priced
    pub enabled: bool,
    /// Logarithm base, must be > 1 when enabled
    pub base: Decimal,
    /// Amounts at or below this are charged unchanged
    pub shift: Gas,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base: Decimal::new(102, 2),
            shift: 285,
        }
    }
}

/// Store access cost table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvGasConfig {
    pub has_cost: Gas,
    pub delete_cost: Gas,
    pub read_cost_flat: Gas,
    pub read_cost_per_byte: Gas,
    pub write_cost_flat: Gas,
    pub write_cost_per_byte: Gas,
    pub iter_next_cost_flat: Gas,
}

impl KvGasConfig {
    /// Costs for the persistent store
    pub const fn kv() -> Self {
        Self {
            has_cost: 1000,
            delete_cost: 1000,
            read_cost_flat: 1000,
            read_cost_per_byte: 3,
            write_cost_flat: 2000,
            write_cost_per_byte: 30,
            iter_next_cost_flat: 30,
        }
    }

    /// Costs for the transient store, one tenth of the persistent ones
    pub const fn transient() -> Self {
        Self {
            has_cost: 100,
            delete_cost: 100,
            read_cost_flat: 100,
            read_cost_per_byte: 0,
            write_cost_flat: 200,
            write_cost_per_byte: 3,
            iter_next_cost_flat: 3,
        }
    }
}

impl Default for KvGasConfig {
    fn default() -> Self {
        Self::kv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = GasConfig::default();
        assert_eq!(cfg.tx_gas_limit, DEFAULT_TX_GAS_LIMIT);
        assert!(cfg.block_gas_limit.is_none());
        assert!(!cfg.pricing.enabled);
        assert_eq!(cfg.kv, KvGasConfig::kv());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let cfg = GasConfig::from_lookup(lookup_from(&[
            (ENV_BLOCK_GAS_LIMIT, "10000000"),
            (ENV_TX_GAS_LIMIT, "500000"),
            (ENV_PRICING_ENABLED, "true"),
            (ENV_PRICING_BASE, "1.05"),
            (ENV_PRICING_SHIFT, "100"),
        ]))
        .unwrap();

        assert_eq!(cfg.block_gas_limit, Some(10_000_000));
        assert_eq!(cfg.tx_gas_limit, 500_000);
        assert!(cfg.pricing.enabled);
        assert_eq!(cfg.pricing.base, dec!(1.05));
        assert_eq!(cfg.pricing.shift, 100);
    }

    #[test]
    fn test_block_limit_none() {
        let cfg = GasConfig::from_lookup(lookup_from(&[(ENV_BLOCK_GAS_LIMIT, "none")])).unwrap();
        assert!(cfg.block_gas_limit.is_none());
    }

    #[test]
    fn test_unparseable_env_is_error() {
        let err = GasConfig::from_lookup(lookup_from(&[(ENV_TX_GAS_LIMIT, "lots")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Env {
                key: ENV_TX_GAS_LIMIT.to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_enabled_pricing_rejects_degenerate_base() {
        let err = GasConfig::from_lookup(lookup_from(&[
            (ENV_PRICING_ENABLED, "true"),
            (ENV_PRICING_BASE, "1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBase { .. }));
    }

    #[test]
    fn test_disabled_pricing_accepts_any_base() {
        let mut cfg = GasConfig::default();
        cfg.pricing.base = dec!(-0.1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut cfg = GasConfig::default();
        cfg.tx_gas_limit = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLimit));
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = GasConfig::from_json(
            r#"{"tx_gas_limit": 1000, "pricing": {"enabled": true, "base": "10", "shift": 0}}"#,
        )
        .unwrap();
        assert_eq!(cfg.tx_gas_limit, 1000);
        assert_eq!(cfg.pricing.base, dec!(10));
        assert_eq!(cfg.kv, KvGasConfig::kv());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            GasConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_transient_costs_are_cheaper() {
        let kv = KvGasConfig::kv();
        let transient = KvGasConfig::transient();
        assert!(transient.write_cost_flat < kv.write_cost_flat);
        assert!(transient.read_cost_flat < kv.read_cost_flat);
    }
}
