//! Order Service Use Case
//!
//! The account-facing surface: place, cancel, replace and query orders.

use std::sync::Arc;

use crate::application::dto::{OrderFilters, OrderResponse, Pagination, decode_data};
use crate::application::ports::{ClockPort, InstrumentsPort, QueryParams, TransportPort};
use crate::application::services::{OrderLifecycleManager, OrderValidator, ValidatorSettings};
use crate::domain::order_execution::aggregate::{LiveOrder, Order};
use crate::domain::order_validation::{AccountContext, TradingStatus, ValidationMode};
use crate::domain::shared::{AccountNumber, OrderId};
use crate::error::OrderEngineError;

/// Order operations for one account.
pub struct OrderService<T, I, C>
where
    T: TransportPort,
    I: InstrumentsPort,
    C: ClockPort,
{
    transport: Arc<T>,
    lifecycle: Arc<OrderLifecycleManager<T>>,
    validator: OrderValidator<I, OrderLifecycleManager<T>, C>,
}

impl<T, I, C> OrderService<T, I, C>
where
    T: TransportPort,
    I: InstrumentsPort,
    C: ClockPort,
{
    /// Wire the service for `account`.
    pub fn new(
        transport: Arc<T>,
        instruments: Arc<I>,
        clock: Arc<C>,
        account: AccountNumber,
        settings: ValidatorSettings,
    ) -> Self {
        let lifecycle = Arc::new(OrderLifecycleManager::new(Arc::clone(&transport), account));
        let validator = OrderValidator::new(instruments, Arc::clone(&lifecycle), clock, settings);
        Self {
            transport,
            lifecycle,
            validator,
        }
    }

    /// Account this service trades.
    #[must_use]
    pub fn account(&self) -> &AccountNumber {
        self.lifecycle.account()
    }

    /// Underlying lifecycle manager.
    #[must_use]
    pub fn lifecycle(&self) -> &OrderLifecycleManager<T> {
        &self.lifecycle
    }

    /// Fetch the account's current trading status.
    pub async fn refresh_trading_status(&self) -> Result<TradingStatus, OrderEngineError> {
        let path = format!("/accounts/{}/trading-status", self.account());
        let body = self.transport.get(&path, &QueryParams::new()).await?;
        decode_data(body)
    }

    /// Validate and place `order`.
    ///
    /// With `dry_run` the validation pipeline runs in collecting mode and its
    /// dry run is the only submission; the report carries every failure
    /// instead of raising. Without it the first failure is raised and a
    /// tick-rounded price is what gets submitted. `skip_validation` sends the
    /// order as is.
    pub async fn place_order(
        &self,
        order: &Order,
        dry_run: bool,
        skip_validation: bool,
    ) -> Result<OrderResponse, OrderEngineError> {
        if skip_validation {
            return self.lifecycle.submit(order, dry_run).await;
        }

        let account = AccountContext::new(self.account().clone(), self.refresh_trading_status().await?);

        if dry_run {
            let report = self
                .validator
                .validate(order, &account, ValidationMode::DryRun)
                .await?;
            return Ok(OrderResponse {
                buying_power_effect: report.buying_power_effect.clone(),
                ..OrderResponse::default()
            }
            .with_validation(report));
        }

        let report = self
            .validator
            .validate(order, &account, ValidationMode::Strict)
            .await?;
        let to_submit = report
            .adjusted_price
            .map_or_else(|| order.clone(), |price| order.with_price(price));

        let response = self.lifecycle.submit(&to_submit, false).await?;
        Ok(response.with_validation(report))
    }

    /// Cancel `order_id`. Returns nothing; fetch again to see the new status.
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<(), OrderEngineError> {
        self.lifecycle.cancel(order_id).await
    }

    /// Replace `order_id` with `new_order`. The response carries a new id.
    pub async fn replace_order(
        &self,
        order_id: &OrderId,
        new_order: &Order,
    ) -> Result<OrderResponse, OrderEngineError> {
        self.lifecycle.replace(order_id, new_order).await
    }

    /// Working orders.
    pub async fn get_live_orders(
        &self,
        filters: &OrderFilters,
    ) -> Result<Vec<LiveOrder>, OrderEngineError> {
        self.lifecycle.get_live_orders(filters).await
    }

    /// One page of history.
    pub async fn get_order_history(
        &self,
        filters: &OrderFilters,
        pagination: Pagination,
    ) -> Result<Vec<LiveOrder>, OrderEngineError> {
        self.lifecycle.get_order_history(filters, pagination).await
    }

    /// One order.
    pub async fn get_order(&self, order_id: &OrderId) -> Result<LiveOrder, OrderEngineError> {
        self.lifecycle.get_order(order_id).await
    }
}
