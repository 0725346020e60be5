//! Strategy Builder
//!
//! Builds multi-leg option orders for named strategies. Every factory:
//!
//! 1. rejects expired or malformed options (`InvalidOption`)
//! 2. checks the strategy's strike/expiration/type rules (`InvalidStrategy`)
//! 3. assigns each leg its action and ratio
//! 4. derives the order's price effect from the net leg cash flow
//!
//! No network access happens here; descriptors must already be fetched.

use rust_decimal::Decimal;

use super::rules;
use super::{OptionDescriptor, OptionType, StrategyDirection, StrategyType};
use crate::domain::order_execution::aggregate::{Order, OrderLeg};
use crate::domain::order_execution::value_objects::{
    OrderAction, OrderType, PriceEffect, TimeInForce,
};
use crate::error::OrderEngineError;

/// One planned leg before it becomes an [`OrderLeg`].
struct PlannedLeg<'a, D> {
    option: &'a D,
    action: OrderAction,
    ratio: u32,
}

impl<'a, D> PlannedLeg<'a, D> {
    const fn buy(option: &'a D, ratio: u32) -> Self {
        Self {
            option,
            action: OrderAction::BuyToOpen,
            ratio,
        }
    }

    const fn sell(option: &'a D, ratio: u32) -> Self {
        Self {
            option,
            action: OrderAction::SellToOpen,
            ratio,
        }
    }
}

/// Builder for strategy orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyBuilder {
    time_in_force: TimeInForce,
}

impl StrategyBuilder {
    /// Builder producing Day orders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time in force of built orders (GTD is not supported here).
    #[must_use]
    pub const fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Vertical spread: buy `long`, sell `short`, same type and expiry.
    pub fn vertical_spread<D: OptionDescriptor>(
        &self,
        long: &D,
        short: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Vertical;
        let options = [long, short];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_same_type(strategy, &options)?;
        rules::check_different_strikes(strategy, long, short)?;

        // Calls are worth more at lower strikes, puts at higher ones.
        let long_is_richer = match long.option_type() {
            OptionType::Call => long.strike_price() < short.strike_price(),
            OptionType::Put => long.strike_price() > short.strike_price(),
        };
        let structural = if long_is_richer {
            PriceEffect::Debit
        } else {
            PriceEffect::Credit
        };

        let legs = [PlannedLeg::buy(long, 1), PlannedLeg::sell(short, 1)];
        self.assemble(strategy, &legs, quantity, limit_price, structural)
    }

    /// Straddle: one call and one put at the same strike and expiry.
    pub fn straddle<D: OptionDescriptor>(
        &self,
        call: &D,
        put: &D,
        direction: StrategyDirection,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Straddle;
        let options = [call, put];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_type(strategy, call, OptionType::Call, "call leg")?;
        rules::check_type(strategy, put, OptionType::Put, "put leg")?;
        rules::check_same_strike(strategy, call, put)?;

        let (legs, structural) = directional_pair(call, put, direction);
        self.assemble(strategy, &legs, quantity, limit_price, structural)
    }

    /// Strangle: one call and one put at different strikes, same expiry.
    pub fn strangle<D: OptionDescriptor>(
        &self,
        call: &D,
        put: &D,
        direction: StrategyDirection,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Strangle;
        let options = [call, put];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_type(strategy, call, OptionType::Call, "call leg")?;
        rules::check_type(strategy, put, OptionType::Put, "put leg")?;
        rules::check_different_strikes(strategy, call, put)?;

        let (legs, structural) = directional_pair(call, put, direction);
        self.assemble(strategy, &legs, quantity, limit_price, structural)
    }

    /// Iron condor: long put < short put < short call < long call.
    ///
    /// Sells the inner strikes and buys the wings, so it opens for a credit.
    /// The long put wing is the lowest strike, so passing the short put first
    /// (short put < long put) is rejected as [`ErrorCode::InvalidStrategy`]
    /// rather than reordered.
    ///
    /// [`ErrorCode::InvalidStrategy`]: crate::error::ErrorCode::InvalidStrategy
    pub fn iron_condor<D: OptionDescriptor>(
        &self,
        long_put: &D,
        short_put: &D,
        short_call: &D,
        long_call: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::IronCondor;
        let options = [long_put, short_put, short_call, long_call];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_type(strategy, long_put, OptionType::Put, "long put")?;
        rules::check_type(strategy, short_put, OptionType::Put, "short put")?;
        rules::check_type(strategy, short_call, OptionType::Call, "short call")?;
        rules::check_type(strategy, long_call, OptionType::Call, "long call")?;
        rules::check_ascending_strikes(
            strategy,
            &options,
            "long put < short put < short call < long call",
        )?;

        let legs = [
            PlannedLeg::buy(long_put, 1),
            PlannedLeg::sell(short_put, 1),
            PlannedLeg::sell(short_call, 1),
            PlannedLeg::buy(long_call, 1),
        ];
        self.assemble(strategy, &legs, quantity, limit_price, PriceEffect::Credit)
    }

    /// Butterfly: buy `low` and `high`, sell the `middle` strike twice.
    pub fn butterfly_spread<D: OptionDescriptor>(
        &self,
        low: &D,
        middle: &D,
        high: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Butterfly;
        let options = [low, middle, high];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_same_type(strategy, &options)?;
        rules::check_ascending_strikes(strategy, &options, "low < middle < high")?;
        rules::check_equal_wings(
            strategy,
            low.strike_price(),
            middle.strike_price(),
            high.strike_price(),
        )?;

        let legs = [
            PlannedLeg::buy(low, 1),
            PlannedLeg::sell(middle, 2),
            PlannedLeg::buy(high, 1),
        ];
        self.assemble(strategy, &legs, quantity, limit_price, PriceEffect::Debit)
    }

    /// Iron butterfly: short call and short put at the center strike, long
    /// wings at equal distance.
    pub fn iron_butterfly<D: OptionDescriptor>(
        &self,
        long_put: &D,
        short_put: &D,
        short_call: &D,
        long_call: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::IronButterfly;
        let options = [long_put, short_put, short_call, long_call];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_expiration(strategy, &options)?;
        rules::check_type(strategy, long_put, OptionType::Put, "long put")?;
        rules::check_type(strategy, short_put, OptionType::Put, "short put")?;
        rules::check_type(strategy, short_call, OptionType::Call, "short call")?;
        rules::check_type(strategy, long_call, OptionType::Call, "long call")?;
        if short_call.strike_price() != short_put.strike_price() {
            return Err(OrderEngineError::strategy(
                strategy,
                "short call and short put must share the center strike",
            ));
        }
        rules::check_ascending_strikes(
            strategy,
            &[long_put, short_put, long_call],
            "long put < center < long call",
        )?;
        rules::check_equal_wings(
            strategy,
            long_put.strike_price(),
            short_put.strike_price(),
            long_call.strike_price(),
        )?;

        let legs = [
            PlannedLeg::buy(long_put, 1),
            PlannedLeg::sell(short_put, 1),
            PlannedLeg::sell(short_call, 1),
            PlannedLeg::buy(long_call, 1),
        ];
        self.assemble(strategy, &legs, quantity, limit_price, PriceEffect::Credit)
    }

    /// Calendar spread: sell the near expiry, buy the far one, same strike.
    pub fn calendar_spread<D: OptionDescriptor>(
        &self,
        short: &D,
        long: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Calendar;
        let options = [short, long];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_type(strategy, &options)?;
        rules::check_same_strike(strategy, short, long)?;
        rules::check_short_expires_first(strategy, short, long)?;

        let legs = [PlannedLeg::sell(short, 1), PlannedLeg::buy(long, 1)];
        self.assemble(strategy, &legs, quantity, limit_price, PriceEffect::Debit)
    }

    /// Diagonal spread: sell the near expiry, buy the far one, different strikes.
    pub fn diagonal_spread<D: OptionDescriptor>(
        &self,
        short: &D,
        long: &D,
        quantity: u32,
        limit_price: Option<Decimal>,
    ) -> Result<Order, OrderEngineError> {
        let strategy = StrategyType::Diagonal;
        let options = [short, long];
        rules::check_options_usable(&options)?;
        rules::check_same_underlying(strategy, &options)?;
        rules::check_same_type(strategy, &options)?;
        rules::check_different_strikes(strategy, short, long)?;
        rules::check_short_expires_first(strategy, short, long)?;

        let legs = [PlannedLeg::sell(short, 1), PlannedLeg::buy(long, 1)];
        self.assemble(strategy, &legs, quantity, limit_price, PriceEffect::Debit)
    }

    fn assemble<D: OptionDescriptor>(
        &self,
        strategy: StrategyType,
        planned: &[PlannedLeg<'_, D>],
        quantity: u32,
        limit_price: Option<Decimal>,
        structural_effect: PriceEffect,
    ) -> Result<Order, OrderEngineError> {
        if quantity == 0 {
            return Err(OrderEngineError::strategy(strategy, "quantity must be positive"));
        }

        let legs = planned
            .iter()
            .map(|p| {
                let leg_quantity = Decimal::from(quantity) * Decimal::from(p.ratio);
                OrderLeg::new(
                    p.action,
                    p.option.symbol(),
                    leg_quantity,
                    p.option.instrument_type(),
                )?
                .with_ratio_quantity(p.ratio)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let price_effect = net_mark_effect(planned).unwrap_or(structural_effect);

        let builder = match limit_price {
            Some(price) => Order::builder(OrderType::Limit).price(price),
            None => Order::builder(OrderType::Market),
        };

        let underlying = planned
            .first()
            .map(|p| p.option.underlying_symbol().to_string())
            .unwrap_or_default();

        let order = builder
            .time_in_force(self.time_in_force)
            .price_effect(price_effect)
            .underlying_symbol(underlying)
            .strategy(strategy)
            .legs(legs)
            .build()?;

        tracing::debug!(
            strategy = %strategy,
            legs = order.legs().len(),
            price_effect = %order.price_effect(),
            "Built strategy order"
        );

        Ok(order)
    }
}

fn directional_pair<'a, D>(
    call: &'a D,
    put: &'a D,
    direction: StrategyDirection,
) -> ([PlannedLeg<'a, D>; 2], PriceEffect) {
    match direction {
        StrategyDirection::Long => (
            [PlannedLeg::buy(call, 1), PlannedLeg::buy(put, 1)],
            PriceEffect::Debit,
        ),
        StrategyDirection::Short => (
            [PlannedLeg::sell(call, 1), PlannedLeg::sell(put, 1)],
            PriceEffect::Credit,
        ),
    }
}

/// Net cash flow per strategy unit from marks; `None` if any mark is missing.
fn net_mark_effect<D: OptionDescriptor>(planned: &[PlannedLeg<'_, D>]) -> Option<PriceEffect> {
    let mut net = Decimal::ZERO;
    for leg in planned {
        let flow = leg.option.mark()? * Decimal::from(leg.ratio);
        if leg.action.is_sell() {
            net += flow;
        } else {
            net -= flow;
        }
    }
    Some(PriceEffect::from_cash_flow(net))
}
