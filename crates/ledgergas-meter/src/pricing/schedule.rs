//! Logarithmic pricing schedule for per-byte store access
//!
//! ```text
//! cost(a) = a                                   if category not scalable
//! cost(a) = a                                   if a <= shift or base <= 1
//! cost(a) = min(a, max(shift, floor(log_base(a))))   otherwise
//! ```
//!
//! Pinned vectors: base 10, shift 0: 100 -> 2; base 1.02, shift 285:
//! 285 -> 285, 286 -> 285, 288 -> 285, 289 -> 286.
//!
//! The logarithm is evaluated in `Decimal` software arithmetic and the
//! integer result is corrected against exact powers of the base, so every
//! node computes the same cost regardless of platform float behaviour.

use ledgergas_common::{ConfigError, Gas, GasCategory, PricingConfig};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

/// Cost transform keyed by gas category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingSchedule {
    base: Decimal,
    shift: Gas,
    /// ln(base); `None` prices every category at identity
    ln_base: Option<Decimal>,
}

impl PricingSchedule {
    /// Lenient constructor: a base <= 1 degrades to identity pricing
    pub fn new(base: Decimal, shift: Gas) -> Self {
        let ln_base = if base > Decimal::ONE {
            base.checked_ln().filter(|ln| *ln > Decimal::ZERO)
        } else {
            None
        };
        Self {
            base,
            shift,
            ln_base,
        }
    }

    /// Strict constructor for callers that explicitly asked for a discount
    pub fn logarithmic(base: Decimal, shift: Gas) -> Result<Self, ConfigError> {
        let schedule = Self::new(base, shift);
        if schedule.ln_base.is_none() {
            return Err(ConfigError::invalid_base(base));
        }
        Ok(schedule)
    }

    /// Build from a float base; NaN and infinities degrade to identity
    pub fn from_f64(base: f64, shift: Gas) -> Self {
        match Decimal::from_f64(base) {
            Some(base) => Self::new(base, shift),
            None => Self::identity(),
        }
    }

    /// Schedule that charges every category 1:1
    pub fn identity() -> Self {
        Self {
            base: Decimal::ONE,
            shift: 0,
            ln_base: None,
        }
    }

    /// Schedule described by a validated config section
    pub fn from_config(config: &PricingConfig) -> Result<Self, ConfigError> {
        if config.enabled {
            Self::logarithmic(config.base, config.shift)
        } else {
            Ok(Self::identity())
        }
    }

    pub fn base(&self) -> Decimal {
        self.base
    }

    pub fn shift(&self) -> Gas {
        self.shift
    }

    /// Whether any category is discounted
    pub fn is_identity(&self) -> bool {
        self.ln_base.is_none()
    }

    /// Charged cost for `amount` raw units in `category`
    pub fn cost(&self, amount: Gas, category: &GasCategory) -> Gas {
        if !category.is_scalable() || amount <= self.shift {
            return amount;
        }
        let Some(ln_base) = self.ln_base else {
            return amount;
        };

        let log = self.floor_log(amount, ln_base);
        log.max(self.shift).min(amount)
    }

    /// Largest k with base^k <= amount, for amount >= 1
    fn floor_log(&self, amount: Gas, ln_base: Decimal) -> Gas {
        let value = Decimal::from(amount);
        let ln_value = value.checked_ln().unwrap_or(Decimal::ZERO);
        if ln_value <= Decimal::ZERO {
            return 0;
        }
        // A ratio beyond u64 means the log exceeds any amount
        let Some(estimate) = ln_value
            .checked_div(ln_base)
            .and_then(|ratio| ratio.floor().to_u64())
        else {
            return Gas::MAX;
        };

        // ln is approximate; settle boundary cases with exact powers
        if estimate > 0 && !self.pow_at_most(estimate, value) {
            estimate - 1
        } else if self.pow_at_most(estimate.saturating_add(1), value) {
            estimate + 1
        } else {
            estimate
        }
    }

    fn pow_at_most(&self, exp: Gas, value: Decimal) -> bool {
        self.base
            .checked_powu(exp)
            .map_or(false, |power| power <= value)
    }
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self::identity()
    }
}
