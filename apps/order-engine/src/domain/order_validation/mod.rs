//! Order Validation Domain
//!
//! Pure building blocks of the validation pipeline: quantity bounds,
//! tick-size rounding, account permission rules and the regular-session
//! calendar. The pipeline itself lives in the application layer because
//! symbol lookup and the dry run need I/O.

mod checks;
mod market_hours;
mod report;
mod tick_size;
mod trading_status;

pub use checks::{QuantityLimits, check_permissions, check_quantity};
pub use market_hours::{MarketHours, eastern_offset_hours};
pub use report::{
    ValidationIssue, ValidationMode, ValidationReport, ValidationStep, ValidationWarning,
};
pub use tick_size::{TickSchedule, TickSize};
pub use trading_status::{AccountContext, OptionsLevel, TradingStatus};
