//! Strategy Order Integration Tests
//!
//! Builds multi-leg orders through the public API and checks what would go
//! on the wire.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use order_engine::application::dto::OrderPayload;
use rust_decimal::Decimal;
use test_case::test_case;

use order_engine::{
    ErrorCode, OptionContract, Order, OrderAction, OrderEngineError, OrderType, PriceEffect,
    StrategyBuilder, StrategyDirection, StrategyType, TimeInForce,
};

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 19).unwrap()
}

fn later_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 17).unwrap()
}

fn call(strike: Decimal) -> OptionContract {
    OptionContract::call("SPY", strike, expiry())
}

fn put(strike: Decimal) -> OptionContract {
    OptionContract::put("SPY", strike, expiry())
}

type Built = Result<Order, OrderEngineError>;

#[test]
fn vertical_call_debit_spread() {
    let long = OptionContract::call("AAPL", dec!(150), expiry());
    let short = OptionContract::call("AAPL", dec!(155), expiry());

    let order = StrategyBuilder::new()
        .vertical_spread(&long, &short, 1, Some(dec!(1.00)))
        .unwrap();

    assert_eq!(order.legs().len(), 2);
    assert_eq!(order.price_effect(), PriceEffect::Debit);
    assert_eq!(order.price(), Some(dec!(1.00)));
    assert_eq!(order.order_type(), OrderType::Limit);
    assert_eq!(order.strategy(), Some(StrategyType::Vertical));
    assert_eq!(order.underlying_symbol(), Some("AAPL"));
    assert_eq!(order.legs()[0].action(), OrderAction::BuyToOpen);
    assert_eq!(order.legs()[0].symbol(), "AAPL  260619C00150000");
    assert_eq!(order.legs()[1].action(), OrderAction::SellToOpen);
    assert_eq!(order.legs()[1].symbol(), "AAPL  260619C00155000");
}

#[test]
fn vertical_spread_wire_payload() {
    let long = OptionContract::call("AAPL", dec!(150), expiry());
    let short = OptionContract::call("AAPL", dec!(155), expiry());
    let order = StrategyBuilder::new()
        .with_time_in_force(TimeInForce::Gtc)
        .vertical_spread(&long, &short, 2, Some(dec!(1.00)))
        .unwrap();

    let payload = OrderPayload::from(&order).to_json().unwrap();

    assert_eq!(payload["order-type"], json!("Limit"));
    assert_eq!(payload["time-in-force"], json!("GTC"));
    assert_eq!(payload["price-effect"], json!("Debit"));
    assert_eq!(payload["underlying-symbol"], json!("AAPL"));
    let legs = payload["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0]["action"], json!("Buy to Open"));
    assert_eq!(legs[0]["instrument-type"], json!("Equity Option"));
    assert_eq!(legs[1]["action"], json!("Sell to Open"));
}

#[test]
fn short_strangle_is_a_credit() {
    let call = OptionContract::call("SPY", dec!(520), expiry());
    let put = OptionContract::put("SPY", dec!(480), expiry());

    let order = StrategyBuilder::new()
        .strangle(&call, &put, StrategyDirection::Short, 3, Some(dec!(4.10)))
        .unwrap();

    assert_eq!(order.price_effect(), PriceEffect::Credit);
    assert!(order.legs().iter().all(|l| l.action() == OrderAction::SellToOpen));
    assert!(order.legs().iter().all(|l| l.quantity() == dec!(3)));
}

#[test]
fn iron_condor_strike_order_enforced() {
    let long_put = OptionContract::put("SPY", dec!(470), expiry());
    let short_put = OptionContract::put("SPY", dec!(480), expiry());
    let short_call = OptionContract::call("SPY", dec!(520), expiry());
    let long_call = OptionContract::call("SPY", dec!(530), expiry());
    let builder = StrategyBuilder::new();

    let order = builder
        .iron_condor(&long_put, &short_put, &short_call, &long_call, 1, None)
        .unwrap();
    assert_eq!(order.legs().len(), 4);
    assert_eq!(order.order_type(), OrderType::Market);
    assert_eq!(order.price_effect(), PriceEffect::Credit);

    let err = builder
        .iron_condor(&short_put, &long_put, &short_call, &long_call, 1, None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStrategy);
}

#[test]
fn butterfly_sells_the_body_twice() {
    let low = OptionContract::call("QQQ", dec!(440), expiry());
    let middle = OptionContract::call("QQQ", dec!(450), expiry());
    let high = OptionContract::call("QQQ", dec!(460), expiry());

    let order = StrategyBuilder::new()
        .butterfly_spread(&low, &middle, &high, 2, Some(dec!(1.25)))
        .unwrap();

    let body = &order.legs()[1];
    assert_eq!(body.action(), OrderAction::SellToOpen);
    assert_eq!(body.quantity(), dec!(4));
    assert_eq!(body.ratio_quantity(), 2);
}

#[test]
fn expired_option_is_rejected() {
    let long = OptionContract::call("AAPL", dec!(150), expiry()).with_expired(true);
    let short = OptionContract::call("AAPL", dec!(155), expiry());

    let err = StrategyBuilder::new()
        .vertical_spread(&long, &short, 1, Some(dec!(1.00)))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidOption);
}

fn vertical_mixed_underlyings() -> Built {
    let other = OptionContract::call("QQQ", dec!(505), expiry());
    StrategyBuilder::new().vertical_spread(&call(dec!(500)), &other, 1, None)
}

fn vertical_mixed_types() -> Built {
    StrategyBuilder::new().vertical_spread(&call(dec!(500)), &put(dec!(505)), 1, None)
}

fn vertical_mixed_expirations() -> Built {
    let far = OptionContract::call("SPY", dec!(505), later_expiry());
    StrategyBuilder::new().vertical_spread(&call(dec!(500)), &far, 1, None)
}

fn vertical_same_strike() -> Built {
    StrategyBuilder::new().vertical_spread(&call(dec!(500)), &call(dec!(500)), 1, None)
}

fn straddle_two_puts() -> Built {
    StrategyBuilder::new().straddle(&put(dec!(500)), &put(dec!(500)), StrategyDirection::Long, 1, None)
}

fn straddle_split_strikes() -> Built {
    StrategyBuilder::new().straddle(&call(dec!(505)), &put(dec!(500)), StrategyDirection::Long, 1, None)
}

fn straddle_mixed_expirations() -> Built {
    let far_put = OptionContract::put("SPY", dec!(500), later_expiry());
    StrategyBuilder::new().straddle(&call(dec!(500)), &far_put, StrategyDirection::Short, 1, None)
}

fn strangle_same_strike() -> Built {
    StrategyBuilder::new().strangle(&call(dec!(500)), &put(dec!(500)), StrategyDirection::Short, 1, None)
}

fn strangle_mixed_expirations() -> Built {
    let far_put = OptionContract::put("SPY", dec!(490), later_expiry());
    StrategyBuilder::new().strangle(&call(dec!(510)), &far_put, StrategyDirection::Long, 1, None)
}

fn iron_condor_short_put_below_long_put() -> Built {
    StrategyBuilder::new().iron_condor(
        &put(dec!(480)),
        &put(dec!(470)),
        &call(dec!(520)),
        &call(dec!(530)),
        1,
        None,
    )
}

fn iron_condor_call_in_put_wing() -> Built {
    StrategyBuilder::new().iron_condor(
        &call(dec!(470)),
        &put(dec!(480)),
        &call(dec!(520)),
        &call(dec!(530)),
        1,
        None,
    )
}

fn iron_condor_mixed_expirations() -> Built {
    let far_call = OptionContract::call("SPY", dec!(530), later_expiry());
    StrategyBuilder::new().iron_condor(
        &put(dec!(470)),
        &put(dec!(480)),
        &call(dec!(520)),
        &far_call,
        1,
        None,
    )
}

fn butterfly_mixed_types() -> Built {
    StrategyBuilder::new().butterfly_spread(&call(dec!(490)), &put(dec!(500)), &call(dec!(510)), 1, None)
}

fn butterfly_unsorted_strikes() -> Built {
    StrategyBuilder::new().butterfly_spread(&call(dec!(500)), &call(dec!(490)), &call(dec!(510)), 1, None)
}

fn butterfly_uneven_wings() -> Built {
    StrategyBuilder::new().butterfly_spread(&call(dec!(490)), &call(dec!(500)), &call(dec!(520)), 1, None)
}

fn butterfly_mixed_expirations() -> Built {
    let far_high = OptionContract::call("SPY", dec!(510), later_expiry());
    StrategyBuilder::new().butterfly_spread(&call(dec!(490)), &call(dec!(500)), &far_high, 1, None)
}

fn iron_butterfly_put_in_call_wing() -> Built {
    StrategyBuilder::new().iron_butterfly(
        &put(dec!(490)),
        &put(dec!(500)),
        &call(dec!(500)),
        &put(dec!(510)),
        1,
        None,
    )
}

fn iron_butterfly_off_center_shorts() -> Built {
    StrategyBuilder::new().iron_butterfly(
        &put(dec!(490)),
        &put(dec!(500)),
        &call(dec!(505)),
        &call(dec!(510)),
        1,
        None,
    )
}

fn iron_butterfly_uneven_wings() -> Built {
    StrategyBuilder::new().iron_butterfly(
        &put(dec!(490)),
        &put(dec!(500)),
        &call(dec!(500)),
        &call(dec!(520)),
        1,
        None,
    )
}

fn iron_butterfly_mixed_expirations() -> Built {
    let far_put = OptionContract::put("SPY", dec!(490), later_expiry());
    StrategyBuilder::new().iron_butterfly(
        &far_put,
        &put(dec!(500)),
        &call(dec!(500)),
        &call(dec!(510)),
        1,
        None,
    )
}

fn calendar_same_expiration() -> Built {
    StrategyBuilder::new().calendar_spread(&call(dec!(500)), &call(dec!(500)), 1, None)
}

fn calendar_long_leg_expires_first() -> Built {
    let far = OptionContract::call("SPY", dec!(500), later_expiry());
    StrategyBuilder::new().calendar_spread(&far, &call(dec!(500)), 1, None)
}

fn calendar_split_strikes() -> Built {
    let far = OptionContract::call("SPY", dec!(505), later_expiry());
    StrategyBuilder::new().calendar_spread(&call(dec!(500)), &far, 1, None)
}

fn calendar_mixed_types() -> Built {
    let far_put = OptionContract::put("SPY", dec!(500), later_expiry());
    StrategyBuilder::new().calendar_spread(&call(dec!(500)), &far_put, 1, None)
}

fn diagonal_same_strike() -> Built {
    let far = OptionContract::call("SPY", dec!(500), later_expiry());
    StrategyBuilder::new().diagonal_spread(&call(dec!(500)), &far, 1, None)
}

fn diagonal_long_leg_expires_first() -> Built {
    let far = OptionContract::call("SPY", dec!(505), later_expiry());
    StrategyBuilder::new().diagonal_spread(&far, &call(dec!(500)), 1, None)
}

fn diagonal_mixed_underlyings() -> Built {
    let far = OptionContract::call("QQQ", dec!(505), later_expiry());
    StrategyBuilder::new().diagonal_spread(&call(dec!(500)), &far, 1, None)
}

#[test_case(vertical_mixed_underlyings, "all legs must share the same underlying" ; "vertical mixed underlyings")]
#[test_case(vertical_mixed_types, "all legs must be the same option type for vertical spread" ; "vertical mixed types")]
#[test_case(vertical_mixed_expirations, "expirations must match for vertical spread" ; "vertical mixed expirations")]
#[test_case(vertical_same_strike, "strikes must differ for vertical spread" ; "vertical same strike")]
#[test_case(straddle_two_puts, "call leg must be a call, got a put" ; "straddle two puts")]
#[test_case(straddle_split_strikes, "strikes must match for straddle" ; "straddle split strikes")]
#[test_case(straddle_mixed_expirations, "expirations must match for straddle" ; "straddle mixed expirations")]
#[test_case(strangle_same_strike, "strikes must differ for strangle" ; "strangle same strike")]
#[test_case(strangle_mixed_expirations, "expirations must match for strangle" ; "strangle mixed expirations")]
#[test_case(iron_condor_short_put_below_long_put, "strikes must satisfy long put < short put < short call < long call" ; "iron condor short put below long put")]
#[test_case(iron_condor_call_in_put_wing, "long put must be a put, got a call" ; "iron condor call in put wing")]
#[test_case(iron_condor_mixed_expirations, "expirations must match for iron condor" ; "iron condor mixed expirations")]
#[test_case(butterfly_mixed_types, "all legs must be the same option type for butterfly spread" ; "butterfly mixed types")]
#[test_case(butterfly_unsorted_strikes, "strikes must satisfy low < middle < high" ; "butterfly unsorted strikes")]
#[test_case(butterfly_uneven_wings, "wing widths must be equal" ; "butterfly uneven wings")]
#[test_case(butterfly_mixed_expirations, "expirations must match for butterfly spread" ; "butterfly mixed expirations")]
#[test_case(iron_butterfly_put_in_call_wing, "long call must be a call, got a put" ; "iron butterfly put in call wing")]
#[test_case(iron_butterfly_off_center_shorts, "short call and short put must share the center strike" ; "iron butterfly off center shorts")]
#[test_case(iron_butterfly_uneven_wings, "wing widths must be equal" ; "iron butterfly uneven wings")]
#[test_case(iron_butterfly_mixed_expirations, "expirations must match for iron butterfly" ; "iron butterfly mixed expirations")]
#[test_case(calendar_same_expiration, "expirations must differ for calendar spread" ; "calendar same expiration")]
#[test_case(calendar_long_leg_expires_first, "short leg must expire before long leg for calendar spread" ; "calendar long leg expires first")]
#[test_case(calendar_split_strikes, "strikes must match for calendar spread" ; "calendar split strikes")]
#[test_case(calendar_mixed_types, "all legs must be the same option type for calendar spread" ; "calendar mixed types")]
#[test_case(diagonal_same_strike, "strikes must differ for diagonal spread" ; "diagonal same strike")]
#[test_case(diagonal_long_leg_expires_first, "short leg must expire before long leg for diagonal spread" ; "diagonal long leg expires first")]
#[test_case(diagonal_mixed_underlyings, "all legs must share the same underlying" ; "diagonal mixed underlyings")]
fn structural_rule_violation(build: fn() -> Built, rule: &str) {
    let err = build().unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidStrategy);
    assert!(
        err.to_string().contains(rule),
        "expected `{rule}` in `{err}`"
    );
}
