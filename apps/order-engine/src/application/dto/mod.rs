//! Data Transfer Objects (DTOs)
//!
//! Wire payloads and response decoding for the brokerage API.

mod order_filters;
mod order_payload;
mod order_response;

pub use order_filters::{DEFAULT_PER_PAGE, MAX_PER_PAGE, OrderFilters, Pagination};
pub use order_payload::{LegPayload, OrderPayload};
pub use order_response::{
    BrokerMessage, FeeCalculation, OrderResponse, decode_data, decode_items,
};
