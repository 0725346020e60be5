//! Dry Run Port (Driven Port)
//!
//! Non-committing submission used by the buying-power step.

use async_trait::async_trait;

use crate::application::dto::OrderResponse;
use crate::domain::order_execution::aggregate::Order;
use crate::error::OrderEngineError;

/// Submit an order without creating it.
#[async_trait]
pub trait DryRunPort: Send + Sync {
    /// Dry-run `order`. The response never carries a live order.
    async fn dry_run(&self, order: &Order) -> Result<OrderResponse, OrderEngineError>;
}
