//! Structural rules shared by the strategy factories.
//!
//! Each check returns the first violated rule as an error whose message
//! names the rule, so a caller can tell exactly which leg relationship
//! was wrong.

use rust_decimal::Decimal;

use super::{OptionDescriptor, OptionType, StrategyType};
use crate::error::OrderEngineError;

/// Reject expired or malformed descriptors.
pub fn check_options_usable<D: OptionDescriptor>(options: &[&D]) -> Result<(), OrderEngineError> {
    for option in options {
        let symbol = option.symbol();
        if symbol.trim().is_empty() {
            return Err(OrderEngineError::InvalidOption {
                symbol: symbol.to_string(),
                reason: "option symbol must not be empty".to_string(),
            });
        }
        if option.is_expired() {
            return Err(OrderEngineError::InvalidOption {
                symbol: symbol.to_string(),
                reason: format!("option expired on {}", option.expiration_date()),
            });
        }
        if option.strike_price() <= Decimal::ZERO {
            return Err(OrderEngineError::InvalidOption {
                symbol: symbol.to_string(),
                reason: "strike price must be positive".to_string(),
            });
        }
        if !option.instrument_type().is_option() {
            return Err(OrderEngineError::InvalidOption {
                symbol: symbol.to_string(),
                reason: format!("{} is not an option instrument", option.instrument_type()),
            });
        }
    }
    Ok(())
}

/// All legs trade options on one underlying.
pub fn check_same_underlying<D: OptionDescriptor>(
    strategy: StrategyType,
    options: &[&D],
) -> Result<(), OrderEngineError> {
    let Some(first) = options.first() else {
        return Ok(());
    };
    if options
        .iter()
        .any(|o| o.underlying_symbol() != first.underlying_symbol())
    {
        return Err(OrderEngineError::strategy(
            strategy,
            "all legs must share the same underlying",
        ));
    }
    Ok(())
}

/// All legs expire on the same date.
pub fn check_same_expiration<D: OptionDescriptor>(
    strategy: StrategyType,
    options: &[&D],
) -> Result<(), OrderEngineError> {
    let Some(first) = options.first() else {
        return Ok(());
    };
    if options
        .iter()
        .any(|o| o.expiration_date() != first.expiration_date())
    {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("expirations must match for {strategy}"),
        ));
    }
    Ok(())
}

/// All legs are calls or all legs are puts.
pub fn check_same_type<D: OptionDescriptor>(
    strategy: StrategyType,
    options: &[&D],
) -> Result<(), OrderEngineError> {
    let Some(first) = options.first() else {
        return Ok(());
    };
    if options.iter().any(|o| o.option_type() != first.option_type()) {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("all legs must be the same option type for {strategy}"),
        ));
    }
    Ok(())
}

/// `option` has the expected right.
pub fn check_type<D: OptionDescriptor>(
    strategy: StrategyType,
    option: &D,
    expected: OptionType,
    role: &str,
) -> Result<(), OrderEngineError> {
    if option.option_type() != expected {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("{role} must be a {expected}, got a {}", option.option_type()),
        ));
    }
    Ok(())
}

/// Two legs share a strike.
pub fn check_same_strike<D: OptionDescriptor>(
    strategy: StrategyType,
    a: &D,
    b: &D,
) -> Result<(), OrderEngineError> {
    if a.strike_price() != b.strike_price() {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("strikes must match for {strategy}"),
        ));
    }
    Ok(())
}

/// Two legs use different strikes.
pub fn check_different_strikes<D: OptionDescriptor>(
    strategy: StrategyType,
    a: &D,
    b: &D,
) -> Result<(), OrderEngineError> {
    if a.strike_price() == b.strike_price() {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("strikes must differ for {strategy}"),
        ));
    }
    Ok(())
}

/// Short leg expires strictly before the long leg.
pub fn check_short_expires_first<D: OptionDescriptor>(
    strategy: StrategyType,
    short: &D,
    long: &D,
) -> Result<(), OrderEngineError> {
    if short.expiration_date() == long.expiration_date() {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("expirations must differ for {strategy}"),
        ));
    }
    if short.expiration_date() > long.expiration_date() {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("short leg must expire before long leg for {strategy}"),
        ));
    }
    Ok(())
}

/// Strikes increase strictly in the order given.
pub fn check_ascending_strikes<D: OptionDescriptor>(
    strategy: StrategyType,
    options: &[&D],
    rule: &str,
) -> Result<(), OrderEngineError> {
    let ascending = options
        .windows(2)
        .all(|pair| pair[0].strike_price() < pair[1].strike_price());
    if !ascending {
        return Err(OrderEngineError::strategy(
            strategy,
            format!("strikes must satisfy {rule}"),
        ));
    }
    Ok(())
}

/// Distance from `center` to each wing is identical.
pub fn check_equal_wings(
    strategy: StrategyType,
    lower: Decimal,
    center: Decimal,
    upper: Decimal,
) -> Result<(), OrderEngineError> {
    if center - lower != upper - center {
        return Err(OrderEngineError::strategy(strategy, "wing widths must be equal"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::option_strategy::OptionContract;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn expired_option_is_invalid_option() {
        let call = OptionContract::call("AAPL", dec!(150), date(19)).with_expired(true);
        let err = check_options_usable(&[&call]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidOption);
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn zero_strike_is_invalid_option() {
        let call = OptionContract::call("AAPL", dec!(0), date(19));
        assert_eq!(
            check_options_usable(&[&call]).unwrap_err().code(),
            ErrorCode::InvalidOption
        );
    }

    #[test]
    fn mixed_underlyings_rejected() {
        let a = OptionContract::call("AAPL", dec!(150), date(19));
        let b = OptionContract::call("MSFT", dec!(155), date(19));
        let err = check_same_underlying(StrategyType::Vertical, &[&a, &b]).unwrap_err();
        assert!(err.to_string().contains("same underlying"));
    }

    #[test]
    fn short_expiration_ordering() {
        let near = OptionContract::call("AAPL", dec!(150), date(12));
        let far = OptionContract::call("AAPL", dec!(150), date(19));
        assert!(check_short_expires_first(StrategyType::Calendar, &near, &far).is_ok());

        let err = check_short_expires_first(StrategyType::Calendar, &far, &near).unwrap_err();
        assert!(err.to_string().contains("short leg must expire before long leg"));

        let err = check_short_expires_first(StrategyType::Diagonal, &near, &near).unwrap_err();
        assert!(err.to_string().contains("expirations must differ for diagonal spread"));
    }

    #[test]
    fn equal_wings() {
        assert!(check_equal_wings(StrategyType::Butterfly, dec!(95), dec!(100), dec!(105)).is_ok());
        let err =
            check_equal_wings(StrategyType::Butterfly, dec!(95), dec!(100), dec!(110)).unwrap_err();
        assert!(err.to_string().contains("wing widths must be equal"));
    }

    #[test]
    fn ascending_strikes() {
        let a = OptionContract::put("AAPL", dec!(90), date(19));
        let b = OptionContract::put("AAPL", dec!(95), date(19));
        assert!(check_ascending_strikes(StrategyType::IronCondor, &[&a, &b], "a < b").is_ok());
        assert!(check_ascending_strikes(StrategyType::IronCondor, &[&b, &a], "a < b").is_err());
        assert!(check_ascending_strikes(StrategyType::IronCondor, &[&a, &a], "a < b").is_err());
    }

    proptest::proptest! {
        #[test]
        fn equal_wings_accepted_unequal_rejected(
            center in 10u32..1000,
            wing in 1u32..10,
            skew in 1u32..5,
        ) {
            let center = Decimal::from(center);
            let wing = Decimal::from(wing);
            let skew = Decimal::from(skew);
            proptest::prop_assert!(
                check_equal_wings(StrategyType::Butterfly, center - wing, center, center + wing).is_ok()
            );
            proptest::prop_assert!(
                check_equal_wings(StrategyType::Butterfly, center - wing, center, center + wing + skew)
                    .is_err()
            );
        }
    }
}
