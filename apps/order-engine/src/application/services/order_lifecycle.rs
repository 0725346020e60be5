//! Order Lifecycle Manager
//!
//! Submits, cancels and replaces orders against the brokerage API and
//! decodes the broker's snapshots into [`LiveOrder`]s. Nothing is cached:
//! every status question is answered by a fresh fetch.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;

use super::lifecycle_errors::{LifecycleOperation, translate_lifecycle_error};
use crate::application::dto::{
    OrderFilters, OrderPayload, OrderResponse, Pagination, decode_data, decode_items,
};
use crate::application::ports::{DryRunPort, QueryParams, TransportPort};
use crate::domain::order_execution::aggregate::{LiveOrder, Order};
use crate::domain::order_execution::services::OrderStateMachine;
use crate::domain::shared::{AccountNumber, OrderId};
use crate::error::OrderEngineError;

/// Lifecycle operations for one account.
pub struct OrderLifecycleManager<T>
where
    T: TransportPort,
{
    transport: Arc<T>,
    account: AccountNumber,
}

impl<T> OrderLifecycleManager<T>
where
    T: TransportPort,
{
    /// Create a manager for `account`.
    pub const fn new(transport: Arc<T>, account: AccountNumber) -> Self {
        Self { transport, account }
    }

    /// Account this manager trades.
    #[must_use]
    pub const fn account(&self) -> &AccountNumber {
        &self.account
    }

    fn orders_path(&self) -> String {
        format!("/accounts/{}/orders", self.account)
    }

    fn order_path(&self, order_id: &OrderId) -> String {
        format!("/accounts/{}/orders/{order_id}", self.account)
    }

    /// Post `order`.
    ///
    /// A dry run goes to `/orders/dry-run` and never yields a live order. A
    /// real submission returns whatever status the broker reports.
    pub async fn submit(
        &self,
        order: &Order,
        dry_run: bool,
    ) -> Result<OrderResponse, OrderEngineError> {
        let payload = payload_json(order)?;
        let path = if dry_run {
            format!("{}/dry-run", self.orders_path())
        } else {
            self.orders_path()
        };

        tracing::info!(
            account = %self.account,
            dry_run,
            legs = order.legs().len(),
            order_type = %order.order_type(),
            "Submitting order"
        );

        let body = self.transport.post(&path, &payload).await?;
        let response = OrderResponse::decode(body, dry_run)?;

        let mode = if dry_run { "dry_run" } else { "live" };
        counter!("order_engine_submissions_total", "mode" => mode).increment(1);

        if dry_run {
            return Ok(response);
        }

        let Some(live) = &response.order else {
            return Err(OrderEngineError::UnexpectedResponse(
                "submission response carried no order".to_string(),
            ));
        };
        tracing::info!(
            account = %self.account,
            order_id = %live.id,
            status = %live.status,
            "Order submitted"
        );
        Ok(response)
    }

    /// Fetch one order.
    pub async fn get_order(&self, order_id: &OrderId) -> Result<LiveOrder, OrderEngineError> {
        let body = self
            .transport
            .get(&self.order_path(order_id), &QueryParams::new())
            .await?;
        decode_data(body)
    }

    /// Fetch `order_id` and cancel it if it is `Live`.
    pub async fn cancel(&self, order_id: &OrderId) -> Result<(), OrderEngineError> {
        let current = self.get_order(order_id).await?;
        self.cancel_live(&current).await
    }

    /// Cancel using a snapshot the caller already holds.
    ///
    /// Returns nothing; fetch again to observe the new status.
    pub async fn cancel_live(&self, order: &LiveOrder) -> Result<(), OrderEngineError> {
        OrderStateMachine::check_cancel(&order.id, order.status)?;

        self.transport
            .delete(&self.order_path(&order.id))
            .await
            .map_err(|e| translate_lifecycle_error(LifecycleOperation::Cancel, &order.id, e))?;

        counter!("order_engine_cancels_total").increment(1);
        tracing::info!(account = %self.account, order_id = %order.id, "Cancel requested");
        Ok(())
    }

    /// Replace `order_id` with `new_order`.
    ///
    /// The broker cancels the original and creates a new order, so the
    /// response always carries a different id.
    pub async fn replace(
        &self,
        order_id: &OrderId,
        new_order: &Order,
    ) -> Result<OrderResponse, OrderEngineError> {
        let original = self.get_order(order_id).await?;
        OrderStateMachine::check_replace(order_id, original.status, original.editable)?;
        OrderStateMachine::check_replace_quantity(&original, new_order)?;

        let payload = payload_json(new_order)?;
        let body = self
            .transport
            .put(&self.order_path(order_id), &payload)
            .await
            .map_err(|e| translate_lifecycle_error(LifecycleOperation::Replace, order_id, e))?;

        let response = OrderResponse::decode_replacement(body)?;
        let replacement_id = match &response.order {
            Some(order) if order.id != *order_id => order.id.clone(),
            Some(_) => {
                return Err(OrderEngineError::UnexpectedResponse(format!(
                    "replace of order {order_id} returned the same id"
                )));
            }
            None => {
                return Err(OrderEngineError::UnexpectedResponse(format!(
                    "replace of order {order_id} returned no order"
                )));
            }
        };

        counter!("order_engine_replaces_total").increment(1);
        tracing::info!(
            account = %self.account,
            order_id = %order_id,
            replacement_id = %replacement_id,
            "Order replaced"
        );
        Ok(response)
    }

    /// Working orders, filtered locally.
    pub async fn get_live_orders(
        &self,
        filters: &OrderFilters,
    ) -> Result<Vec<LiveOrder>, OrderEngineError> {
        let body = self
            .transport
            .get(&format!("{}/live", self.orders_path()), &QueryParams::new())
            .await?;
        let orders: Vec<LiveOrder> = decode_items(body)?;
        Ok(orders
            .into_iter()
            .filter(|o| filters.matches(o.status, o.underlying_symbol.as_deref()))
            .collect())
    }

    /// One page of order history, filtered by the broker.
    pub async fn get_order_history(
        &self,
        filters: &OrderFilters,
        pagination: Pagination,
    ) -> Result<Vec<LiveOrder>, OrderEngineError> {
        let mut params = filters.to_query();
        params.extend(pagination.to_query());
        let body = self.transport.get(&self.orders_path(), &params).await?;
        decode_items(body)
    }
}

#[async_trait]
impl<T> DryRunPort for OrderLifecycleManager<T>
where
    T: TransportPort,
{
    async fn dry_run(&self, order: &Order) -> Result<OrderResponse, OrderEngineError> {
        self.submit(order, true).await
    }
}

fn payload_json(order: &Order) -> Result<serde_json::Value, OrderEngineError> {
    OrderPayload::from(order)
        .to_json()
        .map_err(|e| OrderEngineError::validation("payload", e.to_string()))
}
