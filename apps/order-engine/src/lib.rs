// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Order Engine - Rust Core Library
//!
//! Client-side order construction, validation and lifecycle management for a
//! brokerage REST API.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic, no I/O
//!   - `order_execution`: Order and leg model, live orders, status state machine
//!   - `option_strategy`: OCC symbols, strategy factories, structural rules
//!   - `order_validation`: Quantity, tick, permission and market-hours checks
//!   - `buying_power`: Buying-power effect and threshold evaluation
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`TransportPort`, `InstrumentsPort`, `ClockPort`)
//!   - `services`: `OrderValidator` pipeline, `OrderLifecycleManager`
//!   - `use_cases`: `OrderService` (place, cancel, replace, query)
//!   - `dto`: Wire payloads, filters and response decoding
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: Authenticated HTTP transport with retries
//!   - `instruments`: Broker and in-memory instrument lookups
//!   - `clock`: System clock
//!
//! Configuration and logging setup live beside the layers in `config` and
//! `telemetry`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Error taxonomy shared by every layer.
pub mod error;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::buying_power::{BuyingPowerEffect, BuyingPowerEvaluator};
pub use domain::option_strategy::{
    OptionContract, OptionDescriptor, OptionType, StrategyBuilder, StrategyDirection, StrategyType,
    occ_symbol,
};
pub use domain::order_execution::{
    AdvancedInstructions, LiveOrder, Order, OrderBuilder, OrderLeg, OrderStateMachine,
    value_objects::{
        InstrumentType, OrderAction, OrderStatus, OrderType, PositionEffect, PriceEffect,
        TimeInForce,
    },
};
pub use domain::order_validation::{
    AccountContext, OptionsLevel, TradingStatus, ValidationMode, ValidationReport,
    ValidationWarning,
};
pub use domain::shared::{AccountNumber, OrderId};

// Application re-exports
pub use application::dto::{OrderFilters, OrderResponse, Pagination};
pub use application::ports::{
    ClockPort, DryRunPort, InstrumentInfo, InstrumentsPort, TransportError, TransportPort,
};
pub use application::services::{OrderLifecycleManager, OrderValidator, ValidatorSettings};
pub use application::use_cases::OrderService;

// Infrastructure re-exports
pub use infrastructure::{BrokerInstruments, HttpTransport, InMemoryInstruments, SystemClock};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config};
pub use error::{ErrorCode, OrderEngineError};
pub use telemetry::{TelemetryError, init_telemetry};
