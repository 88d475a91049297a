//! Lock-protected meter shared between execution paths
//!
//! A block meter is consulted by every transaction in the block. Callers that
//! run those paths concurrently share one `SharedGasMeter`; every call goes
//! through the mutex so consumption stays serialized.

use std::sync::Arc;

use ledgergas_common::{Gas, GasCategory, GasInfo, Result};
use parking_lot::Mutex;

use super::GasMeter;

/// Cloneable handle to a meter behind a mutex
#[derive(Debug)]
pub struct SharedGasMeter<M> {
    inner: Arc<Mutex<M>>,
}

impl<M> Clone for SharedGasMeter<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: GasMeter> SharedGasMeter<M> {
    pub fn new(meter: M) -> Self {
        Self {
            inner: Arc::new(Mutex::new(meter)),
        }
    }

    /// Consume through the lock
    pub fn consume_gas(&self, amount: Gas, category: &GasCategory) -> Result<()> {
        self.inner.lock().consume_gas(amount, category)
    }

    pub fn gas_consumed(&self) -> Gas {
        self.inner.lock().gas_consumed()
    }

    pub fn gas_consumed_to_limit(&self) -> Gas {
        self.inner.lock().gas_consumed_to_limit()
    }

    pub fn limit(&self) -> Gas {
        self.inner.lock().limit()
    }

    pub fn is_past_limit(&self) -> bool {
        self.inner.lock().is_past_limit()
    }

    pub fn is_out_of_gas(&self) -> bool {
        self.inner.lock().is_out_of_gas()
    }

    pub fn info(&self) -> GasInfo {
        self.inner.lock().info()
    }

    /// Run several reads/writes under a single lock acquisition
    pub fn with_meter<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<M: GasMeter> GasMeter for SharedGasMeter<M> {
    fn consume_gas(&mut self, amount: Gas, category: &GasCategory) -> Result<()> {
        SharedGasMeter::consume_gas(self, amount, category)
    }

    fn gas_consumed(&self) -> Gas {
        SharedGasMeter::gas_consumed(self)
    }

    fn gas_consumed_to_limit(&self) -> Gas {
        SharedGasMeter::gas_consumed_to_limit(self)
    }

    fn limit(&self) -> Gas {
        SharedGasMeter::limit(self)
    }

    fn is_past_limit(&self) -> bool {
        SharedGasMeter::is_past_limit(self)
    }

    fn is_out_of_gas(&self) -> bool {
        SharedGasMeter::is_out_of_gas(self)
    }
}
