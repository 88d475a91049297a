//! Store access charging
//!
//! Storage layers call these before touching the store. Flat costs go out
//! under the flat categories and byte costs under the per-byte categories, so
//! a [`PricedGasMeter`](crate::PricedGasMeter) discounts large reads and writes.

use ledgergas_common::{Gas, GasCategory, GasError, KvGasConfig, Result};

use crate::metering::GasMeter;

/// Charging operations over a store cost table
pub trait StoreGas {
    /// Existence check
    fn charge_has<M: GasMeter + ?Sized>(&self, meter: &mut M) -> Result<()>;

    /// Key removal
    fn charge_delete<M: GasMeter + ?Sized>(&self, meter: &mut M) -> Result<()>;

    /// Point read returning `key_len + value_len` bytes
    fn charge_read<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()>;

    /// Write of a key/value pair
    fn charge_write<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()>;

    /// One iterator step landing on a key/value pair
    fn charge_iter_next<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()>;
}

impl StoreGas for KvGasConfig {
    fn charge_has<M: GasMeter + ?Sized>(&self, meter: &mut M) -> Result<()> {
        meter.consume_gas(self.has_cost, &GasCategory::Has)
    }

    fn charge_delete<M: GasMeter + ?Sized>(&self, meter: &mut M) -> Result<()> {
        meter.consume_gas(self.delete_cost, &GasCategory::Delete)
    }

    fn charge_read<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()> {
        meter.consume_gas(self.read_cost_flat, &GasCategory::ReadFlat)?;
        let category = GasCategory::ReadPerByte;
        let bytes = byte_len(key_len)
            .checked_add(byte_len(value_len))
            .ok_or_else(|| GasError::Overflow {
                descriptor: category.descriptor().to_string(),
                consumed: meter.gas_consumed(),
                requested: Gas::MAX,
            })?;
        consume_per_byte(meter, self.read_cost_per_byte, bytes, category)
    }

    fn charge_write<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()> {
        meter.consume_gas(self.write_cost_flat, &GasCategory::WriteFlat)?;
        consume_per_byte(
            meter,
            self.write_cost_per_byte,
            byte_len(key_len),
            GasCategory::WritePerByte,
        )?;
        consume_per_byte(
            meter,
            self.write_cost_per_byte,
            byte_len(value_len),
            GasCategory::WritePerByte,
        )
    }

    fn charge_iter_next<M: GasMeter + ?Sized>(
        &self,
        meter: &mut M,
        key_len: usize,
        value_len: usize,
    ) -> Result<()> {
        consume_per_byte(
            meter,
            self.read_cost_per_byte,
            byte_len(key_len),
            GasCategory::ReadPerByte,
        )?;
        consume_per_byte(
            meter,
            self.read_cost_per_byte,
            byte_len(value_len),
            GasCategory::ReadPerByte,
        )?;
        meter.consume_gas(self.iter_next_cost_flat, &GasCategory::IterNextFlat)
    }
}

#[inline]
fn byte_len(len: usize) -> Gas {
    Gas::try_from(len).unwrap_or(Gas::MAX)
}

fn consume_per_byte<M: GasMeter + ?Sized>(
    meter: &mut M,
    cost_per_byte: Gas,
    bytes: Gas,
    category: GasCategory,
) -> Result<()> {
    let amount = cost_per_byte
        .checked_mul(bytes)
        .ok_or_else(|| GasError::Overflow {
            descriptor: category.descriptor().to_string(),
            consumed: meter.gas_consumed(),
            requested: cost_per_byte.saturating_mul(bytes),
        })?;
    meter.consume_gas(amount, &category)
}
