//! GasInfo - gas report for a finished unit of work

use serde::{Deserialize, Serialize};

use super::Gas;

/// Gas wanted vs. used, as reported back to the submitter of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasInfo {
    /// Ceiling the unit of work ran under
    pub gas_wanted: Gas,
    /// Consumption saturated at the ceiling
    pub gas_used: Gas,
}

impl GasInfo {
    pub fn new(gas_wanted: Gas, gas_used: Gas) -> Self {
        Self {
            gas_wanted,
            gas_used,
        }
    }

    /// Unused part of the ceiling, the basis for refunds
    #[inline]
    pub fn remaining(&self) -> Gas {
        self.gas_wanted.saturating_sub(self.gas_used)
    }
}

impl std::fmt::Display for GasInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GasInfo(wanted={}, used={})", self.gas_wanted, self.gas_used)
    }
}
