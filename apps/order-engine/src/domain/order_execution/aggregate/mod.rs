//! Order Aggregates
//!
//! Candidate orders (built locally) and live orders (reported by the broker).

mod live_order;
mod order;
mod order_leg;

pub use live_order::{Fill, LiveLeg, LiveOrder};
pub use order::{AdvancedInstructions, Order, OrderBuilder};
pub use order_leg::OrderLeg;
