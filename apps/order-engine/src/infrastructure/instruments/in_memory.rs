//! In-memory instrument table.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::application::ports::{InstrumentInfo, InstrumentsPort, TransportError};
use crate::domain::order_execution::value_objects::InstrumentType;

/// [`InstrumentsPort`] over a fixed table, keyed by symbol and type.
///
/// Useful for offline validation and tests.
#[derive(Debug, Default)]
pub struct InMemoryInstruments {
    instruments: RwLock<HashMap<(String, InstrumentType), InstrumentInfo>>,
}

impl InMemoryInstruments {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an instrument.
    pub fn insert(&self, info: InstrumentInfo) {
        self.write_table()
            .insert((info.symbol.clone(), info.instrument_type), info);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, info: InstrumentInfo) -> Self {
        self.insert(info);
        self
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    /// Table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write is a single map insert, so a poisoned table is still whole.
    fn read_table(&self) -> RwLockReadGuard<'_, HashMap<(String, InstrumentType), InstrumentInfo>> {
        self.instruments.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Instrument table lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, HashMap<(String, InstrumentType), InstrumentInfo>> {
        self.instruments.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Instrument table lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

#[async_trait]
impl InstrumentsPort for InMemoryInstruments {
    async fn lookup(
        &self,
        symbol: &str,
        instrument_type: InstrumentType,
    ) -> Result<Option<InstrumentInfo>, TransportError> {
        Ok(self
            .read_table()
            .get(&(symbol.to_string(), instrument_type))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_by_symbol_and_type() {
        let instruments = InMemoryInstruments::new()
            .with(InstrumentInfo::active("AAPL", InstrumentType::Equity));

        assert_eq!(instruments.len(), 1);
        assert!(
            instruments
                .lookup("AAPL", InstrumentType::Equity)
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            instruments
                .lookup("AAPL", InstrumentType::Future)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn insert_replaces() {
        let instruments = InMemoryInstruments::new();
        assert!(instruments.is_empty());
        instruments.insert(InstrumentInfo::active("XYZ", InstrumentType::Equity));
        instruments.insert(InstrumentInfo::active("XYZ", InstrumentType::Equity).inactive());

        let info = instruments
            .lookup("XYZ", InstrumentType::Equity)
            .await
            .unwrap()
            .unwrap();
        assert!(!info.active);
        assert_eq!(instruments.len(), 1);
    }

    #[tokio::test]
    async fn insert_survives_poisoned_lock() {
        let instruments = std::sync::Arc::new(InMemoryInstruments::new());
        let writer = std::sync::Arc::clone(&instruments);
        let crashed = std::thread::spawn(move || {
            let _guard = writer.instruments.write().unwrap();
            panic!("writer crashed while holding the table");
        })
        .join();
        assert!(crashed.is_err());
        assert!(instruments.instruments.is_poisoned());

        instruments.insert(InstrumentInfo::active("MSFT", InstrumentType::Equity));

        assert_eq!(instruments.len(), 1);
        assert!(
            instruments
                .lookup("MSFT", InstrumentType::Equity)
                .await
                .unwrap()
                .is_some()
        );
    }
}
