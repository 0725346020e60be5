//! Order State Machine Service
//!
//! Encodes which broker status changes are legal and which lifecycle
//! operations a status permits.

use crate::domain::order_execution::aggregate::{LiveLeg, LiveOrder, Order};
use crate::domain::order_execution::value_objects::OrderStatus;
use crate::domain::shared::OrderId;
use crate::error::OrderEngineError;

/// Order State Machine for validating transitions and lifecycle operations.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        Self::valid_next_states(from).contains(&to)
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        match from {
            OrderStatus::Received => vec![
                OrderStatus::Routed,
                OrderStatus::InFlight,
                OrderStatus::Contingent,
                OrderStatus::Live,
                OrderStatus::Rejected,
                OrderStatus::Cancelled,
                OrderStatus::Removed,
            ],
            OrderStatus::Routed => vec![
                OrderStatus::InFlight,
                OrderStatus::Contingent,
                OrderStatus::Live,
                OrderStatus::Rejected,
                OrderStatus::Cancelled,
                OrderStatus::Removed,
            ],
            OrderStatus::InFlight => vec![
                OrderStatus::Live,
                OrderStatus::Filled,
                OrderStatus::Rejected,
                OrderStatus::Cancelled,
                OrderStatus::Removed,
            ],
            OrderStatus::Contingent => vec![
                OrderStatus::Routed,
                OrderStatus::InFlight,
                OrderStatus::Live,
                OrderStatus::Rejected,
                OrderStatus::Cancelled,
                OrderStatus::Removed,
            ],
            OrderStatus::Live => vec![
                OrderStatus::CancelRequested,
                OrderStatus::ReplaceRequested,
                OrderStatus::Filled,
                OrderStatus::Cancelled,
                OrderStatus::Rejected,
                OrderStatus::Expired,
                OrderStatus::Removed,
                OrderStatus::PartiallyRemoved,
            ],
            // A refused cancel or replace drops back to Live.
            OrderStatus::CancelRequested | OrderStatus::ReplaceRequested => vec![
                OrderStatus::Live,
                OrderStatus::Filled,
                OrderStatus::Cancelled,
                OrderStatus::Expired,
                OrderStatus::PartiallyRemoved,
            ],
            // Terminal states
            OrderStatus::Filled
            | OrderStatus::Cancelled
            | OrderStatus::Rejected
            | OrderStatus::Expired
            | OrderStatus::Removed
            | OrderStatus::PartiallyRemoved => vec![],
        }
    }

    /// Check that an order in `status` may be cancelled.
    ///
    /// # Errors
    ///
    /// `OrderAlreadyFilled` when filled, `OrderNotCancellable` for every
    /// other status except `Live`.
    pub fn check_cancel(order_id: &OrderId, status: OrderStatus) -> Result<(), OrderEngineError> {
        match status {
            OrderStatus::Live => Ok(()),
            OrderStatus::Filled => Err(OrderEngineError::OrderAlreadyFilled {
                order_id: order_id.to_string(),
            }),
            _ => Err(OrderEngineError::OrderNotCancellable {
                order_id: order_id.to_string(),
                reason: format!("only Live orders can be cancelled, status is {status}"),
            }),
        }
    }

    /// Check that an order in `status` may be replaced.
    ///
    /// # Errors
    ///
    /// `OrderNotEditable` unless the order is `Live` and the broker marks it
    /// editable.
    pub fn check_replace(
        order_id: &OrderId,
        status: OrderStatus,
        editable: bool,
    ) -> Result<(), OrderEngineError> {
        if !status.is_live() {
            return Err(OrderEngineError::OrderNotEditable {
                order_id: order_id.to_string(),
                reason: format!("only Live orders can be replaced, status is {status}"),
            });
        }
        if !editable {
            return Err(OrderEngineError::OrderNotEditable {
                order_id: order_id.to_string(),
                reason: "broker reports the order as not editable".to_string(),
            });
        }
        Ok(())
    }

    /// Check that no replacement leg asks for more than remains unfilled.
    ///
    /// Replacement legs are matched to original legs by symbol, falling back
    /// to position. Legs with no counterpart are left to the broker.
    ///
    /// # Errors
    ///
    /// `InsufficientQuantity` naming the first leg that exceeds its remainder.
    pub fn check_replace_quantity(
        original: &LiveOrder,
        replacement: &Order,
    ) -> Result<(), OrderEngineError> {
        for (index, leg) in replacement.legs().iter().enumerate() {
            let matched: Option<&LiveLeg> = original
                .leg_for_symbol(leg.symbol())
                .or_else(|| original.legs.get(index));
            let Some(matched) = matched else {
                continue;
            };

            let remaining = matched.remaining();
            if leg.quantity() > remaining {
                return Err(OrderEngineError::InsufficientQuantity {
                    order_id: original.id.to_string(),
                    reason: format!(
                        "{} asks for {} but only {remaining} of {} remains unfilled",
                        leg.symbol(),
                        leg.quantity(),
                        matched.quantity
                    ),
                });
            }
        }
        Ok(())
    }
}
