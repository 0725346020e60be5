//! Application Services
//!
//! Orchestration over ports: the validation pipeline and the order
//! lifecycle.

mod lifecycle_errors;
mod order_lifecycle;
mod order_validator;

pub use lifecycle_errors::{LifecycleOperation, translate_lifecycle_error};
pub use order_lifecycle::OrderLifecycleManager;
pub use order_validator::{OrderValidator, ValidatorSettings};
