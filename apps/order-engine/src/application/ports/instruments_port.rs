//! Instruments Port (Driven Port)
//!
//! Symbol resolution and tick-size schedules.

use async_trait::async_trait;

use super::TransportError;
use crate::domain::order_execution::value_objects::InstrumentType;
use crate::domain::order_validation::TickSchedule;

/// What the validator needs to know about an instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentInfo {
    /// Symbol as the broker knows it.
    pub symbol: String,
    /// Instrument type.
    pub instrument_type: InstrumentType,
    /// Instrument is open for trading.
    pub active: bool,
    /// Fractional quantities accepted.
    pub fractional_eligible: bool,
    /// Price increments.
    pub tick_schedule: TickSchedule,
}

impl InstrumentInfo {
    /// Active, whole-quantity instrument on a penny grid.
    #[must_use]
    pub fn active(symbol: impl Into<String>, instrument_type: InstrumentType) -> Self {
        Self {
            symbol: symbol.into(),
            instrument_type,
            active: true,
            fractional_eligible: false,
            tick_schedule: TickSchedule::penny(),
        }
    }

    /// Replace the tick schedule.
    #[must_use]
    pub fn with_tick_schedule(mut self, schedule: TickSchedule) -> Self {
        self.tick_schedule = schedule;
        self
    }

    /// Allow fractional quantities.
    #[must_use]
    pub fn with_fractional(mut self) -> Self {
        self.fractional_eligible = true;
        self
    }

    /// Mark the instrument inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Instrument lookup.
#[async_trait]
pub trait InstrumentsPort: Send + Sync {
    /// Resolve `symbol`. `Ok(None)` means the broker does not know it.
    async fn lookup(
        &self,
        symbol: &str,
        instrument_type: InstrumentType,
    ) -> Result<Option<InstrumentInfo>, TransportError>;
}
