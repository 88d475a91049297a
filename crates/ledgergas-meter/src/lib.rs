//! # Ledgergas Meter
//!
//! Deterministic gas metering for state transitions.
//!
//! ## Control Flow
//!
//! ```text
//! caller -> PricedGasMeter::consume_gas(amount, category)
//!        -> cost = PricingSchedule::cost(amount, category)
//!        -> BasicGasMeter::consume_gas(cost, category)
//! ```
//!
//! Exhaustion is returned as [`GasError::OutOfGas`]; the transaction layer
//! catches it once and rejects the whole unit of work.

pub mod kv;
pub mod metering;
pub mod pricing;

pub use kv::StoreGas;
pub use metering::{BasicGasMeter, GasMeter, InfiniteGasMeter, SharedGasMeter};
pub use pricing::{PricedGasMeter, PricingSchedule};

pub use ledgergas_common::{Gas, GasCategory, GasConfig, GasError, GasInfo, Result};

use tracing::debug;

/// Meter for one transaction, priced per the config
pub fn new_tx_meter(config: &GasConfig) -> Result<PricedGasMeter> {
    PricedGasMeter::from_config(config)
}

/// Block-wide meter shared by every transaction in the block
///
/// Without a configured block limit the block runs under an infinite meter.
pub fn new_block_meter(config: &GasConfig) -> Result<SharedGasMeter<Box<dyn GasMeter>>> {
    config.validate()?;
    let meter: Box<dyn GasMeter> = match config.block_gas_limit {
        Some(limit) => Box::new(BasicGasMeter::new(limit)),
        None => Box::new(InfiniteGasMeter::new()),
    };
    debug!(block_gas_limit = ?config.block_gas_limit, "Created block gas meter");
    Ok(SharedGasMeter::new(meter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_meter_infinite_by_default() {
        let meter = new_block_meter(&GasConfig::default()).unwrap();
        meter.consume_gas(Gas::MAX / 2, &GasCategory::TxSize).unwrap();
        assert!(!meter.is_out_of_gas());
        assert_eq!(meter.limit(), Gas::MAX);
    }

    #[test]
    fn test_block_meter_bounded() {
        let mut config = GasConfig::default();
        config.block_gas_limit = Some(1000);
        let meter = new_block_meter(&config).unwrap();
        assert_eq!(meter.limit(), 1000);
        assert!(meter.consume_gas(1001, &GasCategory::unlabeled()).is_err());
        assert!(meter.is_past_limit());
    }

    #[test]
    fn test_tx_meter_defaults_to_identity() {
        let mut meter = new_tx_meter(&GasConfig::default()).unwrap();
        meter.consume_gas(5000, &GasCategory::WritePerByte).unwrap();
        assert_eq!(meter.gas_consumed(), 5000);
        assert!(meter.schedule().is_identity());
    }
}
