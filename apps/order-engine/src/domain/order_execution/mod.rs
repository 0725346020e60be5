//! Order Execution Bounded Context
//!
//! Order construction and the broker order lifecycle.
//!
//! # Key Concepts
//!
//! - **Order**: immutable candidate order built with [`OrderBuilder`]
//! - **LiveOrder**: immutable snapshot of a submitted order
//! - **OrderStateMachine**: legal status transitions and cancel/replace gating

pub mod aggregate;
pub mod services;
pub mod value_objects;

pub use aggregate::{AdvancedInstructions, Fill, LiveLeg, LiveOrder, Order, OrderBuilder, OrderLeg};
pub use services::OrderStateMachine;
pub use value_objects::{
    InstrumentType, OrderAction, OrderPhase, OrderStatus, OrderType, PositionEffect, PriceEffect,
    TimeInForce,
};
