//! Option descriptors consumed by the strategy builder.
//!
//! Any type that can answer the [`OptionDescriptor`] questions can be turned
//! into strategy legs, so callers can pass their own chain/quote types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::order_execution::value_objects::InstrumentType;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy).
    #[serde(rename = "C", alias = "Call")]
    Call,
    /// Put option (right to sell).
    #[serde(rename = "P", alias = "Put")]
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// What the strategy builder needs to know about an option.
pub trait OptionDescriptor {
    /// Tradable option symbol.
    fn symbol(&self) -> &str;

    /// Symbol of the underlying instrument.
    fn underlying_symbol(&self) -> &str;

    /// Strike price.
    fn strike_price(&self) -> Decimal;

    /// Expiration date.
    fn expiration_date(&self) -> NaiveDate;

    /// Call or put.
    fn option_type(&self) -> OptionType;

    /// Whether the contract has already expired.
    fn is_expired(&self) -> bool;

    /// Instrument type of the contract.
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::EquityOption
    }

    /// Current mark price, when the caller has one.
    fn mark(&self) -> Option<Decimal> {
        None
    }
}

/// Plain option contract implementing [`OptionDescriptor`].
///
/// Deserializes from the broker's equity-option instrument payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionContract {
    symbol: String,
    underlying_symbol: String,
    strike_price: Decimal,
    expiration_date: NaiveDate,
    option_type: OptionType,
    #[serde(default)]
    expired: bool,
    #[serde(default = "default_instrument_type")]
    instrument_type: InstrumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mark: Option<Decimal>,
}

const fn default_instrument_type() -> InstrumentType {
    InstrumentType::EquityOption
}

impl OptionContract {
    /// Create a new equity option contract.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        underlying_symbol: impl Into<String>,
        strike_price: Decimal,
        expiration_date: NaiveDate,
        option_type: OptionType,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying_symbol: underlying_symbol.into(),
            strike_price,
            expiration_date,
            option_type,
            expired: false,
            instrument_type: InstrumentType::EquityOption,
            mark: None,
        }
    }

    /// Create a call with a generated OCC symbol.
    #[must_use]
    pub fn call(underlying: &str, strike_price: Decimal, expiration_date: NaiveDate) -> Self {
        let symbol = occ_symbol(underlying, expiration_date, OptionType::Call, strike_price);
        Self::new(symbol, underlying, strike_price, expiration_date, OptionType::Call)
    }

    /// Create a put with a generated OCC symbol.
    #[must_use]
    pub fn put(underlying: &str, strike_price: Decimal, expiration_date: NaiveDate) -> Self {
        let symbol = occ_symbol(underlying, expiration_date, OptionType::Put, strike_price);
        Self::new(symbol, underlying, strike_price, expiration_date, OptionType::Put)
    }

    /// Mark the contract as expired.
    #[must_use]
    pub const fn with_expired(mut self, expired: bool) -> Self {
        self.expired = expired;
        self
    }

    /// Attach a mark price.
    #[must_use]
    pub const fn with_mark(mut self, mark: Decimal) -> Self {
        self.mark = Some(mark);
        self
    }

    /// Change the instrument type (future options).
    #[must_use]
    pub const fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = instrument_type;
        self
    }
}

impl OptionDescriptor for OptionContract {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn underlying_symbol(&self) -> &str {
        &self.underlying_symbol
    }

    fn strike_price(&self) -> Decimal {
        self.strike_price
    }

    fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn is_expired(&self) -> bool {
        self.expired
    }

    fn instrument_type(&self) -> InstrumentType {
        self.instrument_type
    }

    fn mark(&self) -> Option<Decimal> {
        self.mark
    }
}

/// OCC option symbol: root padded to six characters, `YYMMDD`, `C`/`P`,
/// strike in thousandths padded to eight digits.
#[must_use]
pub fn occ_symbol(
    underlying: &str,
    expiration_date: NaiveDate,
    option_type: OptionType,
    strike_price: Decimal,
) -> String {
    let right = match option_type {
        OptionType::Call => 'C',
        OptionType::Put => 'P',
    };
    let strike = (strike_price * Decimal::ONE_THOUSAND).trunc().normalize().to_string();
    format!(
        "{underlying:<6}{}{right}{strike:0>8}",
        expiration_date.format("%y%m%d")
    )
}
