//! Unit-of-work tests: a transaction runs against a cached store and its
//! writes are committed only when the meter never ran out.

use std::collections::BTreeMap;

use ledgergas_common::KvGasConfig;
use ledgergas_meter::{
    new_block_meter, new_tx_meter, BasicGasMeter, GasCategory, GasConfig, GasError, GasInfo,
    GasMeter, StoreGas,
};
use rust_decimal_macros::dec;

type Store = BTreeMap<Vec<u8>, Vec<u8>>;

/// Writes buffered for one transaction
struct TxCache<'a, M: GasMeter> {
    parent: &'a Store,
    writes: Store,
    meter: M,
    costs: KvGasConfig,
}

impl<'a, M: GasMeter> TxCache<'a, M> {
    fn new(parent: &'a Store, meter: M) -> Self {
        Self {
            parent,
            writes: Store::new(),
            meter,
            costs: KvGasConfig::kv(),
        }
    }

    fn get(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, GasError> {
        let value = self
            .writes
            .get(key)
            .or_else(|| self.parent.get(key))
            .cloned();
        let value_len = value.as_ref().map_or(0, Vec::len);
        self.costs.charge_read(&mut self.meter, key.len(), value_len)?;
        Ok(value)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), GasError> {
        self.costs.charge_write(&mut self.meter, key.len(), value.len())?;
        self.writes.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

/// Run `tx`, committing into `store` on success; out-of-gas discards every write
fn run_tx<M, F>(store: &mut Store, meter: M, tx: F) -> (Result<(), GasError>, GasInfo)
where
    M: GasMeter,
    F: FnOnce(&mut TxCache<'_, M>) -> Result<(), GasError>,
{
    let mut cache = TxCache::new(store, meter);
    let result = tx(&mut cache);
    let info = cache.meter.info();
    let writes = std::mem::take(&mut cache.writes);
    drop(cache);

    if result.is_ok() {
        store.extend(writes);
    }
    (result, info)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_successful_tx_commits() {
    init_tracing();
    let mut store = Store::new();

    let (result, info) = run_tx(&mut store, BasicGasMeter::new(100_000), |tx| {
        tx.set(b"alice", b"100")?;
        tx.set(b"bob", b"50")?;
        Ok(())
    });

    assert!(result.is_ok());
    assert_eq!(store.get(b"alice".as_slice()), Some(&b"100".to_vec()));
    // two writes: flat + 30 per byte of key and value
    assert_eq!(info.gas_used, 2 * 2000 + 30 * (5 + 3) + 30 * (3 + 2));
    assert_eq!(info.gas_wanted, 100_000);
}

#[test]
fn test_out_of_gas_discards_all_writes() {
    init_tracing();
    let mut store = Store::new();
    store.insert(b"alice".to_vec(), b"100".to_vec());

    let (result, info) = run_tx(&mut store, BasicGasMeter::new(3000), |tx| {
        tx.set(b"alice", b"0")?;
        tx.set(b"bob", b"100")?;
        Ok(())
    });

    let err = result.unwrap_err();
    assert!(err.is_out_of_gas());
    assert_eq!(err.descriptor(), Some("WriteFlat"));
    assert_eq!(info.gas_used, 3000);
    assert_eq!(store.get(b"alice".as_slice()), Some(&b"100".to_vec()));
    assert!(store.get(b"bob".as_slice()).is_none());
}

#[test]
fn test_priced_tx_meter_discounts_large_values() {
    init_tracing();
    let mut config = GasConfig::default();
    config.pricing.enabled = true;
    config.pricing.base = dec!(1.02);
    config.pricing.shift = 285;

    let mut store = Store::new();
    let big = vec![7u8; 4096];

    let (result, info) = run_tx(&mut store, new_tx_meter(&config).unwrap(), |tx| {
        tx.set(b"blob", &big)?;
        let read = tx.get(b"blob")?;
        assert_eq!(read.map(|v| v.len()), Some(4096));
        Ok(())
    });

    assert!(result.is_ok());
    let linear = 2000 + 30 * 4 + 30 * 4096 + 1000 + 3 * (4 + 4096);
    assert!(info.gas_used < linear);
}

#[test]
fn test_block_meter_shared_by_txs() {
    init_tracing();
    let mut config = GasConfig::default();
    config.block_gas_limit = Some(10_000);
    let block_meter = new_block_meter(&config).unwrap();

    let mut store = Store::new();
    for i in 0..5u8 {
        let (result, info) = run_tx(&mut store, BasicGasMeter::new(5000), |tx| {
            tx.set(&[i], &[i])
        });
        assert!(result.is_ok());

        let charge = block_meter.consume_gas(info.gas_used, &GasCategory::other("DeliverTx"));
        if i < 4 {
            assert!(charge.is_ok(), "tx #{i}");
        } else {
            assert!(charge.unwrap_err().is_out_of_gas());
        }
    }

    assert!(block_meter.is_past_limit());
    assert_eq!(block_meter.gas_consumed_to_limit(), 10_000);
}
