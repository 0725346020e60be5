//! Application Ports (Driven)
//!
//! Interfaces to the systems the order engine depends on:
//! - **Transport**: authenticated JSON access to the brokerage API
//! - **Instruments**: symbol resolution and tick schedules
//! - **Clock**: current time for the market-hours check
//! - **Dry run**: buying-power preview of an order

mod clock_port;
mod dry_run_port;
mod instruments_port;
mod transport_port;

pub use clock_port::ClockPort;
pub use dry_run_port::DryRunPort;
pub use instruments_port::{InstrumentInfo, InstrumentsPort};
pub use transport_port::{QueryParams, TransportError, TransportPort};
