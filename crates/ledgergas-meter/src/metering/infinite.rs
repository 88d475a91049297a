//! Unbounded gas meter for work that runs outside any transaction ceiling

use ledgergas_common::{Gas, GasCategory, GasError, Result};
use tracing::trace;

use super::GasMeter;

/// Gas meter with no ceiling; only `u64` overflow is an error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfiniteGasMeter {
    consumed: Gas,
}

impl InfiniteGasMeter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()> {
        self.consumed = self
            .consumed
            .checked_add(amount)
            .ok_or_else(|| GasError::Overflow {
                descriptor: category.descriptor().to_string(),
                consumed: self.consumed,
                requested: amount,
            })?;
        trace!(amount, consumed = self.consumed, category = %category, "Consumed gas");
        Ok(())
    }

    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    fn gas_consumed_to_limit(&self) -> Gas {
        self.consumed
    }

    fn limit(&self) -> Gas {
        Gas::MAX
    }

    fn is_past_limit(&self) -> bool {
        false
    }

    fn is_out_of_gas(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_out_of_gas() {
        let mut meter = InfiniteGasMeter::new();
        meter.consume_gas(1_000_000_000, &GasCategory::WriteFlat).unwrap();
        meter.consume_gas(Gas::MAX - 1_000_000_000, &GasCategory::Has).unwrap();

        assert_eq!(meter.gas_consumed(), Gas::MAX);
        assert_eq!(meter.gas_consumed_to_limit(), Gas::MAX);
        assert!(!meter.is_out_of_gas());
        assert!(!meter.is_past_limit());
    }

    #[test]
    fn test_overflow() {
        let mut meter = InfiniteGasMeter::new();
        meter.consume_gas(Gas::MAX, &GasCategory::unlabeled()).unwrap();
        let err = meter.consume_gas(1, &GasCategory::Delete).unwrap_err();
        assert_eq!(err.descriptor(), Some("Delete"));
        assert_eq!(meter.gas_consumed(), Gas::MAX);
    }
}
