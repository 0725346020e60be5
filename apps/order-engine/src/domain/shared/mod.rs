//! Shared Kernel
//!
//! Identifiers used across bounded contexts.

mod identifiers;

pub use identifiers::{AccountNumber, OrderId};
