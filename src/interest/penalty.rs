use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::interest::started_months;
use crate::types::OverdueCharge;

/// surcharge per started month overdue
pub const DEFAULT_LATE_FEE_RATE: Decimal = dec!(0.02);

/// late fee on an overdue installment at the standard 2% per started month
pub fn compute_late_fee(amount_due: Money, days_overdue: i64) -> Result<Money> {
    LateFeePolicy::default().fee_for(amount_due, days_overdue)
}

/// late fee policy
///
/// Any part of a month overdue counts as a whole month. The fee is not
/// capped here; callers that cap it apply their own limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeePolicy {
    /// fraction of the amount due charged per started month
    pub monthly_rate: Rate,
}

impl Default for LateFeePolicy {
    fn default() -> Self {
        Self {
            monthly_rate: Rate::from_decimal(DEFAULT_LATE_FEE_RATE),
        }
    }
}

impl LateFeePolicy {
    pub fn new(monthly_rate: Rate) -> Self {
        Self { monthly_rate }
    }

    /// fee for an amount that is `days_overdue` days past its due date
    pub fn fee_for(&self, amount_due: Money, days_overdue: i64) -> Result<Money> {
        if days_overdue < 0 {
            tracing::warn!(days_overdue, "rejected negative overdue window");
            return Err(EngineError::invalid_input(format!(
                "days overdue must not be negative, got {days_overdue}"
            )));
        }
        if amount_due.is_negative() {
            tracing::warn!(%amount_due, "rejected negative amount due");
            return Err(EngineError::invalid_input(format!(
                "amount due must not be negative, got {amount_due}"
            )));
        }
        if days_overdue == 0 {
            return Ok(Money::ZERO);
        }

        let months = Decimal::from(started_months(days_overdue));
        let fee = amount_due
            .as_decimal()
            .checked_mul(self.monthly_rate.as_decimal())
            .and_then(|f| f.checked_mul(months))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("late fee overflow for {amount_due} over {days_overdue} days"),
            })?;
        Ok(Money::from_decimal(fee).round_unit())
    }

    /// full overdue charge record for persistence alongside the repayment row
    pub fn assess(&self, amount_due: Money, days_overdue: i64) -> Result<OverdueCharge> {
        let fee_amount = self.fee_for(amount_due, days_overdue)?;
        Ok(OverdueCharge {
            base_amount: amount_due,
            days_overdue,
            fee_amount,
        })
    }
}

impl OverdueCharge {
    /// assess with the standard policy
    pub fn assess(amount_due: Money, days_overdue: i64) -> Result<Self> {
        LateFeePolicy::default().assess(amount_due, days_overdue)
    }

    /// amount due plus fee
    pub fn total_payable(&self) -> Money {
        self.base_amount + self.fee_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_month_counts_as_full() {
        // ceil(10 / 30) = 1 month at 2%
        let fee = compute_late_fee(Money::from_major(8_500), 10).unwrap();
        assert_eq!(fee, Money::from_major(170));

        let fee = compute_late_fee(Money::from_major(8_500), 30).unwrap();
        assert_eq!(fee, Money::from_major(170));

        let fee = compute_late_fee(Money::from_major(8_500), 31).unwrap();
        assert_eq!(fee, Money::from_major(340));
    }

    #[test]
    fn test_no_fee_on_due_date() {
        let fee = compute_late_fee(Money::from_major(8_500), 0).unwrap();
        assert_eq!(fee, Money::ZERO);
    }

    #[test]
    fn test_fee_rounds_to_whole_units() {
        // 1234 * 0.02 = 24.68
        let fee = compute_late_fee(Money::from_major(1_234), 5).unwrap();
        assert_eq!(fee, Money::from_major(25));

        // 1225 * 0.02 = 24.5 rounds up
        let fee = compute_late_fee(Money::from_major(1_225), 5).unwrap();
        assert_eq!(fee, Money::from_major(25));
    }

    #[test]
    fn test_fee_is_monotonic_in_days() {
        for amount in [500_i64, 1_234, 8_500, 13_752, 50_000] {
            let amount = Money::from_major(amount);
            let mut previous = Money::ZERO;
            for days in 0..=400 {
                let fee = compute_late_fee(amount, days).unwrap();
                assert!(fee >= previous, "fee dropped at {days} days for {amount}");
                previous = fee;
            }
        }
    }

    #[test]
    fn test_fee_is_uncapped() {
        // a year overdue is 13 started months
        let fee = compute_late_fee(Money::from_major(1_000), 365).unwrap();
        assert_eq!(fee, Money::from_major(260));
    }

    #[test]
    fn test_extreme_overdue_window() {
        // months saturate at u32::MAX: 100 * 0.02 * 4_294_967_295
        let fee = compute_late_fee(Money::from_major(100), i64::MAX).unwrap();
        assert_eq!(fee, Money::from_major(8_589_934_590));

        assert!(matches!(
            compute_late_fee(Money::from_decimal(Decimal::MAX), i64::MAX),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            compute_late_fee(Money::from_major(100), -1),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_late_fee(Money::from_major(-100), 3),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_custom_policy_rate() {
        let policy = LateFeePolicy::new(Rate::from_percent(dec!(3)));
        let fee = policy.fee_for(Money::from_major(1_000), 45).unwrap();
        assert_eq!(fee, Money::from_major(60));
    }

    #[test]
    fn test_overdue_charge() {
        let charge = OverdueCharge::assess(Money::from_major(8_500), 10).unwrap();
        assert_eq!(charge.days_overdue, 10);
        assert_eq!(charge.fee_amount, Money::from_major(170));
        assert_eq!(charge.total_payable(), Money::from_major(8_670));

        let on_time = OverdueCharge::assess(Money::from_major(8_500), 0).unwrap();
        assert!(on_time.fee_amount.is_zero());
    }
}
