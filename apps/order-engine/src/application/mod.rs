//! Application Layer
//!
//! The application layer orchestrates domain logic over ports.
//! It defines:
//!
//! - **Ports**: Interfaces to the brokerage, instruments and clock
//! - **Services**: The validation pipeline and the order lifecycle
//! - **Use Cases**: The account-facing order surface
//! - **DTOs**: Wire payloads and response decoding

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use services::*;
pub use use_cases::*;
