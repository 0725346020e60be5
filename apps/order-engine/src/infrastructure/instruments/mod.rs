//! Instrument lookup adapters.

mod broker_instruments;
mod in_memory;

pub use broker_instruments::BrokerInstruments;
pub use in_memory::InMemoryInstruments;
