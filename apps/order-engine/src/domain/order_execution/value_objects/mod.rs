//! Order Execution Value Objects
//!
//! Closed enumerations for every string-valued order field.

mod instrument_type;
mod order_action;
mod order_status;
mod order_type;
mod position_effect;
mod price_effect;
mod time_in_force;

pub use instrument_type::InstrumentType;
pub use order_action::OrderAction;
pub use order_status::{OrderPhase, OrderStatus};
pub use order_type::OrderType;
pub use position_effect::PositionEffect;
pub use price_effect::PriceEffect;
pub use time_in_force::TimeInForce;
