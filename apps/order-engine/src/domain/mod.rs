//! Domain Layer
//!
//! Pure order-engine logic with no I/O. Everything in here is synchronous and
//! deterministic so it can be exercised without a broker.

pub mod buying_power;
pub mod option_strategy;
pub mod order_execution;
pub mod order_validation;
pub mod shared;
