//! Infrastructure Layer
//!
//! Adapters implementing the application ports: the HTTP transport, instrument
//! lookups and the system clock.

pub mod clock;
pub mod http;
pub mod instruments;

pub use clock::SystemClock;
pub use http::HttpTransport;
pub use instruments::{BrokerInstruments, InMemoryInstruments};
