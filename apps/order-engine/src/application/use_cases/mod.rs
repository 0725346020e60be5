//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod order_service;

pub use order_service::OrderService;
