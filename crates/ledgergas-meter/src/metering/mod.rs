//! Metering module
//!
//! Provides the gas meter contract and its implementations:
//! - BasicGasMeter: bounded meter with a fixed ceiling
//! - InfiniteGasMeter: unbounded meter for genesis and block hooks
//! - SharedGasMeter: lock-protected meter shared across execution paths

pub mod basic;
pub mod infinite;
pub mod shared;

pub use basic::BasicGasMeter;
pub use infinite::InfiniteGasMeter;
pub use shared::SharedGasMeter;

use ledgergas_common::{Gas, GasCategory, GasInfo, Result};

/// Cumulative gas accounting for one unit of work
///
/// A meter is created per transaction (or per block), consulted before every
/// state mutation, and dropped when the unit of work ends. It is never reset.
pub trait GasMeter: Send {
    /// Record `amount` under `category`
    ///
    /// Returns `GasError::OutOfGas` once the cumulative total exceeds the
    /// limit. The total is still recorded on that call.
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()>;

    /// Raw cumulative total, may exceed the limit
    fn gas_consumed(&self) -> Gas;

    /// Cumulative total saturated at the limit
    fn gas_consumed_to_limit(&self) -> Gas;

    /// Configured ceiling
    fn limit(&self) -> Gas;

    /// Strictly over the limit
    fn is_past_limit(&self) -> bool;

    /// At or over the limit
    fn is_out_of_gas(&self) -> bool;

    /// Wanted/used report for this unit of work
    fn info(&self) -> GasInfo {
        GasInfo::new(self.limit(), self.gas_consumed_to_limit())
    }
}

impl<M: GasMeter + ?Sized> GasMeter for Box<M> {
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()> {
        (**self).consume_gas(amount, category)
    }

    fn gas_consumed(&self) -> Gas {
        (**self).gas_consumed()
    }

    fn gas_consumed_to_limit(&self) -> Gas {
        (**self).gas_consumed_to_limit()
    }

    fn limit(&self) -> Gas {
        (**self).limit()
    }

    fn is_past_limit(&self) -> bool {
        (**self).is_past_limit()
    }

    fn is_out_of_gas(&self) -> bool {
        (**self).is_out_of_gas()
    }
}
