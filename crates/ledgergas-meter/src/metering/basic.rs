//! Bounded gas meter
//!
//! Tracks cumulative consumption against a fixed ceiling. Two states:
//! - Active: consumed <= limit
//! - Exhausted: consumed > limit, entered on the call that first crosses
//!   the ceiling and never left

use ledgergas_common::{Gas, GasCategory, GasError, Result};
use tracing::{trace, warn};

use super::GasMeter;

/// Gas meter with a fixed ceiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicGasMeter {
    limit: Gas,
    consumed: Gas,
}

impl BasicGasMeter {
    /// Create a meter for one unit of work
    pub fn new(limit: Gas) -> Self {
        Self { limit, consumed: 0 }
    }

    /// Gas left before the ceiling, zero once at or past it
    #[inline]
    pub fn remaining(&self) -> Gas {
        self.limit.saturating_sub(self.consumed)
    }
}

impl GasMeter for BasicGasMeter {
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let consumed = self
            .consumed
            .checked_add(amount)
            .ok_or_else(|| GasError::Overflow {
                descriptor: category.descriptor().to_string(),
                consumed: self.consumed,
                requested: amount,
            })?;

        let was_past = self.is_past_limit();
        self.consumed = consumed;
        trace!(
            amount,
            consumed,
            limit = self.limit,
            category = %category,
            "Consumed gas"
        );

        if consumed > self.limit {
            if !was_past {
                warn!(
                    limit = self.limit,
                    consumed,
                    category = %category,
                    "Gas meter exhausted"
                );
            }
            return Err(GasError::OutOfGas {
                descriptor: category.descriptor().to_string(),
                limit: self.limit,
                consumed,
                requested: amount,
            });
        }

        Ok(())
    }

    #[inline]
    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    #[inline]
    fn gas_consumed_to_limit(&self) -> Gas {
        self.consumed.min(self.limit)
    }

    #[inline]
    fn limit(&self) -> Gas {
        self.limit
    }

    #[inline]
    fn is_past_limit(&self) -> bool {
        self.consumed > self.limit
    }

    #[inline]
    fn is_out_of_gas(&self) -> bool {
        self.consumed >= self.limit
    }
}

impl std::fmt::Display for BasicGasMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BasicGasMeter(limit={}, consumed={})",
            self.limit, self.consumed
        )
    }
}
