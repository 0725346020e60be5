//! Instrument lookup against the broker's `/instruments` endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::application::ports::{
    InstrumentInfo, InstrumentsPort, QueryParams, TransportError, TransportPort,
};
use crate::domain::order_execution::value_objects::InstrumentType;
use crate::domain::order_validation::{TickSchedule, TickSize};

/// Instrument record as returned by the broker. Fields differ a little per
/// instrument type, so everything beyond the symbol is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct InstrumentRecord {
    symbol: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    is_fractional_quantity_eligible: bool,
    #[serde(default)]
    underlying_symbol: Option<String>,
    #[serde(default)]
    tick_sizes: Vec<TickSize>,
    #[serde(default)]
    option_tick_sizes: Vec<TickSize>,
    #[serde(default)]
    tick_size: Option<Decimal>,
}

const fn default_active() -> bool {
    true
}

impl InstrumentRecord {
    fn own_schedule(&self) -> TickSchedule {
        if !self.tick_sizes.is_empty() {
            return TickSchedule::new(self.tick_sizes.clone());
        }
        match self.tick_size {
            Some(value) => TickSchedule::new(vec![TickSize {
                threshold: None,
                value,
            }]),
            None => TickSchedule::penny(),
        }
    }
}

/// [`InstrumentsPort`] backed by the broker REST API.
///
/// Equity options carry no tick sizes of their own; the schedule comes from
/// the underlying equity's `option-tick-sizes`.
#[derive(Debug)]
pub struct BrokerInstruments<T: TransportPort> {
    transport: Arc<T>,
}

impl<T: TransportPort> BrokerInstruments<T> {
    /// Create a new lookup over `transport`.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    async fn fetch(
        &self,
        collection: &str,
        symbol: &str,
    ) -> Result<Option<InstrumentRecord>, TransportError> {
        let path = instrument_path(collection, symbol)?;
        match self.transport.get(&path, &QueryParams::new()).await {
            Ok(body) => decode_record(body).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn option_schedule(&self, underlying: Option<&str>) -> TickSchedule {
        let Some(underlying) = underlying else {
            return TickSchedule::penny();
        };
        match self.fetch("equities", underlying).await {
            Ok(Some(record)) if !record.option_tick_sizes.is_empty() => {
                TickSchedule::new(record.option_tick_sizes)
            }
            Ok(_) => TickSchedule::penny(),
            Err(e) => {
                tracing::warn!(
                    underlying = %underlying,
                    error = %e,
                    "Option tick sizes unavailable, using penny increments"
                );
                TickSchedule::penny()
            }
        }
    }
}

#[async_trait]
impl<T: TransportPort> InstrumentsPort for BrokerInstruments<T> {
    async fn lookup(
        &self,
        symbol: &str,
        instrument_type: InstrumentType,
    ) -> Result<Option<InstrumentInfo>, TransportError> {
        let Some(record) = self.fetch(collection_for(instrument_type), symbol).await? else {
            tracing::debug!(symbol = %symbol, instrument_type = %instrument_type, "Unknown instrument");
            return Ok(None);
        };

        let tick_schedule = match instrument_type {
            InstrumentType::EquityOption => {
                self.option_schedule(record.underlying_symbol.as_deref())
                    .await
            }
            _ => record.own_schedule(),
        };

        Ok(Some(InstrumentInfo {
            symbol: record.symbol,
            instrument_type,
            active: record.active,
            fractional_eligible: record.is_fractional_quantity_eligible,
            tick_schedule,
        }))
    }
}

const fn collection_for(instrument_type: InstrumentType) -> &'static str {
    match instrument_type {
        InstrumentType::Equity => "equities",
        InstrumentType::EquityOption => "equity-options",
        InstrumentType::Future => "futures",
        InstrumentType::FutureOption => "future-options",
    }
}

/// `/instruments/{collection}/{symbol}` with the symbol percent-encoded as a
/// single path segment. OCC symbols contain spaces and futures start with `/`.
fn instrument_path(collection: &str, symbol: &str) -> Result<String, TransportError> {
    let mut url = Url::parse("https://instruments.invalid/")
        .map_err(|e| TransportError::Network(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| TransportError::Network("cannot build instrument path".to_string()))?
        .clear()
        .extend(["instruments", collection, symbol]);
    Ok(url.path().to_string())
}

fn decode_record(body: Value) -> Result<InstrumentRecord, TransportError> {
    let data = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(data).map_err(|e| TransportError::Decode(e.to_string()))
}
