//! Priced gas meter
//!
//! Applies a [`PricingSchedule`] to each request, then forwards the charged
//! cost to the owned meter. Failures come from that meter, except that a
//! nonzero request priced to zero is still rejected once it is exhausted.

use ledgergas_common::{Gas, GasCategory, GasConfig, GasError, Result};
use rust_decimal::Decimal;
use tracing::trace;

use super::PricingSchedule;
use crate::metering::{BasicGasMeter, GasMeter};

/// Meter that charges scalable categories through the logarithmic schedule
#[derive(Debug, Clone)]
pub struct PricedGasMeter<M = BasicGasMeter> {
    inner: M,
    schedule: PricingSchedule,
}

impl PricedGasMeter<BasicGasMeter> {
    /// Bounded meter with the lenient schedule (base <= 1 is identity)
    pub fn new(limit: Gas, base: Decimal, shift: Gas) -> Self {
        Self::with_schedule(BasicGasMeter::new(limit), PricingSchedule::new(base, shift))
    }

    /// Per-transaction meter from a node config
    pub fn from_config(config: &GasConfig) -> Result<Self> {
        config.validate()?;
        let schedule = PricingSchedule::from_config(&config.pricing)?;
        Ok(Self::with_schedule(
            BasicGasMeter::new(config.tx_gas_limit),
            schedule,
        ))
    }
}

impl<M: GasMeter> PricedGasMeter<M> {
    pub fn with_schedule(inner: M, schedule: PricingSchedule) -> Self {
        Self { inner, schedule }
    }

    pub fn schedule(&self) -> &PricingSchedule {
        &self.schedule
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn into_inner(self) -> M {
        self.inner
    }
}

impl<M: GasMeter> GasMeter for PricedGasMeter<M> {
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()> {
        let cost = self.schedule.cost(amount, category);
        if cost != amount {
            trace!(amount, cost, category = %category, "Priced gas");
        }
        // Real work that prices to zero must not slip past an exhausted meter
        if cost == 0 && amount != 0 && self.inner.is_past_limit() {
            return Err(GasError::OutOfGas {
                descriptor: category.descriptor().to_string(),
                limit: self.inner.limit(),
                consumed: self.inner.gas_consumed(),
                requested: cost,
            });
        }
        self.inner.consume_gas(cost, category)
    }

    fn gas_consumed(&self) -> Gas {
        self.inner.gas_consumed()
    }

    fn gas_consumed_to_limit(&self) -> Gas {
        self.inner.gas_consumed_to_limit()
    }

    fn limit(&self) -> Gas {
        self.inner.limit()
    }

    fn is_past_limit(&self) -> bool {
        self.inner.is_past_limit()
    }

    fn is_out_of_gas(&self) -> bool {
        self.inner.is_out_of_gas()
    }
}
