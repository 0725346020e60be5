//! Order Validator
//!
//! Runs a candidate order through a fixed pipeline before submission:
//!
//! 1. symbol: every leg resolves to an active instrument
//! 2. quantity: every leg is within bounds
//! 3. price: limit prices sit on the instrument's tick grid
//! 4. permissions: the account may trade every leg
//! 5. buying power: a dry run must not drive buying power negative
//! 6. market hours: outside the regular session only warns
//!
//! In [`ValidationMode::Strict`] the first hard failure is returned. In
//! [`ValidationMode::DryRun`] every step runs and failures are collected in
//! the report. Transport failures always propagate.

use std::sync::Arc;

use metrics::counter;
use rust_decimal::Decimal;

use crate::application::ports::{ClockPort, DryRunPort, InstrumentInfo, InstrumentsPort};
use crate::domain::buying_power::BuyingPowerEvaluator;
use crate::domain::order_execution::aggregate::Order;
use crate::domain::order_validation::{
    AccountContext, MarketHours, QuantityLimits, TickSchedule, ValidationIssue, ValidationMode,
    ValidationReport, ValidationStep, ValidationWarning, check_permissions, check_quantity,
};
use crate::error::OrderEngineError;

/// Tunables of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorSettings {
    /// Allowed leg quantities.
    pub quantity_limits: QuantityLimits,
    /// Usage above this percentage of buying power warns.
    pub buying_power_warning_pct: Decimal,
    /// Warn when validating outside the regular session.
    pub warn_outside_market_hours: bool,
    /// Regular session.
    pub market_hours: MarketHours,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            quantity_limits: QuantityLimits::default(),
            buying_power_warning_pct: Decimal::from(80),
            warn_outside_market_hours: true,
            market_hours: MarketHours::regular(),
        }
    }
}

/// Pre-submission validation pipeline.
pub struct OrderValidator<I, D, C>
where
    I: InstrumentsPort,
    D: DryRunPort,
    C: ClockPort,
{
    instruments: Arc<I>,
    dry_run: Arc<D>,
    clock: Arc<C>,
    settings: ValidatorSettings,
}

// Records failures according to the mode.
struct Outcome {
    mode: ValidationMode,
    report: ValidationReport,
}

impl Outcome {
    fn fail(&mut self, step: ValidationStep, error: OrderEngineError) -> Result<(), OrderEngineError> {
        counter!("order_engine_validation_failures_total", "step" => step.as_str()).increment(1);
        tracing::debug!(step = %step, error = %error, "Validation step failed");

        if !self.mode.collects_errors() {
            return Err(error);
        }
        self.report.errors.push(ValidationIssue {
            step,
            code: error.code(),
            message: error.to_string(),
        });
        Ok(())
    }

    fn warn(&mut self, warning: ValidationWarning) {
        tracing::warn!(warning = %warning, "Validation warning");
        self.report.warnings.push(warning);
    }
}

impl<I, D, C> OrderValidator<I, D, C>
where
    I: InstrumentsPort,
    D: DryRunPort,
    C: ClockPort,
{
    /// Create a validator.
    pub const fn new(
        instruments: Arc<I>,
        dry_run: Arc<D>,
        clock: Arc<C>,
        settings: ValidatorSettings,
    ) -> Self {
        Self {
            instruments,
            dry_run,
            clock,
            settings,
        }
    }

    /// Pipeline settings.
    #[must_use]
    pub const fn settings(&self) -> &ValidatorSettings {
        &self.settings
    }

    /// Validate `order` for `account`.
    ///
    /// # Errors
    ///
    /// In strict mode, the first hard failure. In either mode, any
    /// transport failure other than a broker refusal of the dry run.
    pub async fn validate(
        &self,
        order: &Order,
        account: &AccountContext,
        mode: ValidationMode,
    ) -> Result<ValidationReport, OrderEngineError> {
        let mut outcome = Outcome {
            mode,
            report: ValidationReport::default(),
        };

        let instruments = self.check_symbols(order, &mut outcome).await?;
        self.check_quantities(order, &instruments, &mut outcome)?;
        Self::check_price(order, &instruments, &mut outcome)?;

        tracing::debug!(step = %ValidationStep::Permissions, "Validating");
        if let Err(e) = check_permissions(order, &account.trading_status) {
            outcome.fail(ValidationStep::Permissions, e)?;
        }

        self.check_buying_power(order, &mut outcome).await?;
        self.check_market_hours(&mut outcome);

        tracing::debug!(
            account = %account.account_number,
            warnings = outcome.report.warnings.len(),
            errors = outcome.report.errors.len(),
            "Validation finished"
        );
        Ok(outcome.report)
    }

    async fn check_symbols(
        &self,
        order: &Order,
        outcome: &mut Outcome,
    ) -> Result<Vec<Option<InstrumentInfo>>, OrderEngineError> {
        tracing::debug!(step = %ValidationStep::Symbol, "Validating");
        let mut resolved = Vec::with_capacity(order.legs().len());

        for leg in order.legs() {
            let info = self
                .instruments
                .lookup(leg.symbol(), leg.instrument_type())
                .await?;

            let reason = match &info {
                None => Some(format!("no {} instrument with this symbol", leg.instrument_type())),
                Some(info) if !info.active => Some("instrument is not active".to_string()),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                outcome.fail(
                    ValidationStep::Symbol,
                    OrderEngineError::InvalidSymbol {
                        symbol: leg.symbol().to_string(),
                        reason,
                    },
                )?;
            }
            resolved.push(info);
        }
        Ok(resolved)
    }

    fn check_quantities(
        &self,
        order: &Order,
        instruments: &[Option<InstrumentInfo>],
        outcome: &mut Outcome,
    ) -> Result<(), OrderEngineError> {
        tracing::debug!(step = %ValidationStep::Quantity, "Validating");
        for (leg, info) in order.legs().iter().zip(instruments) {
            let fractional = info.as_ref().is_some_and(|i| i.fractional_eligible);
            if let Err(e) = check_quantity(leg, fractional, self.settings.quantity_limits) {
                outcome.fail(ValidationStep::Quantity, e)?;
            }
        }
        Ok(())
    }

    fn check_price(
        order: &Order,
        instruments: &[Option<InstrumentInfo>],
        outcome: &mut Outcome,
    ) -> Result<(), OrderEngineError> {
        tracing::debug!(step = %ValidationStep::Price, "Validating");
        let Some(price) = order.price() else {
            return Ok(());
        };

        let schedule = instruments
            .iter()
            .flatten()
            .map(|info| &info.tick_schedule)
            .next()
            .cloned()
            .unwrap_or_else(TickSchedule::penny);

        match schedule.round(price) {
            Ok(rounded) if rounded != price => {
                outcome.report.adjusted_price = Some(rounded);
                outcome.warn(ValidationWarning::PriceRounded {
                    original: price,
                    rounded,
                });
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => outcome.fail(ValidationStep::Price, e),
        }
    }

    async fn check_buying_power(
        &self,
        order: &Order,
        outcome: &mut Outcome,
    ) -> Result<(), OrderEngineError> {
        tracing::debug!(step = %ValidationStep::BuyingPower, "Validating");
        let candidate = outcome
            .report
            .adjusted_price
            .map_or_else(|| order.clone(), |price| order.with_price(price));

        let response = match self.dry_run.dry_run(&candidate).await {
            Ok(response) => response,
            Err(OrderEngineError::Transport(e)) if e.is_rejection() => {
                let reason = e
                    .rejection()
                    .map_or_else(|| e.to_string(), |(_, message)| message.to_string());
                return outcome.fail(
                    ValidationStep::BuyingPower,
                    OrderEngineError::validation("buying_power", reason),
                );
            }
            Err(e) => return Err(e),
        };

        for message in response.warnings {
            outcome.warn(ValidationWarning::Broker(message.message));
        }

        let Some(effect) = response.buying_power_effect else {
            return Ok(());
        };
        let evaluator = BuyingPowerEvaluator::new(&effect);

        if evaluator.would_go_negative() {
            let new_bp = evaluator.signed_new_buying_power().unwrap_or_default();
            outcome.fail(
                ValidationStep::BuyingPower,
                OrderEngineError::validation(
                    "buying_power",
                    format!("insufficient buying power: order would leave {new_bp}"),
                ),
            )?;
        } else if evaluator.exceeds_threshold(self.settings.buying_power_warning_pct) {
            outcome.warn(ValidationWarning::HighBuyingPowerUsage {
                usage_pct: evaluator.usage_percentage(),
                threshold_pct: self.settings.buying_power_warning_pct,
            });
        }

        outcome.report.buying_power_effect = Some(effect);
        Ok(())
    }

    fn check_market_hours(&self, outcome: &mut Outcome) {
        tracing::debug!(step = %ValidationStep::MarketHours, "Validating");
        if self.settings.warn_outside_market_hours
            && !self.settings.market_hours.is_open_at(self.clock.now())
        {
            outcome.warn(ValidationWarning::OutsideMarketHours);
        }
    }
}
