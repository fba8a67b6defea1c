use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::interest::{tenure_months, DAYS_PER_MONTH};
use crate::types::LoanTerms;

/// fixed installment for a day-denominated loan, rounded to whole units
///
/// The tenure is converted to `tenure_days / 30` months, which may be
/// fractional; only the scheduler rounds up to a whole number of rows.
pub fn compute_installment_amount(
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_days: i64,
) -> Result<Money> {
    let terms = LoanTerms::new(principal, annual_rate_percent, tenure_days);
    terms.installment_amount()
}

impl LoanTerms {
    /// EMI for these terms
    pub fn installment_amount(&self) -> Result<Money> {
        if let Err(e) = self.validate() {
            tracing::warn!(error = %e, "rejected loan terms");
            return Err(e);
        }

        let monthly_rate = self.annual_rate.monthly_rate().as_decimal();
        let months = tenure_months(self.tenure_days);

        if monthly_rate.is_zero() {
            // straight-line, no interest
            return Ok((self.principal / months).round_unit());
        }

        // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
        let compound = growth_factor(monthly_rate, self.tenure_days)?;
        let denominator = compound - Decimal::ONE;
        if denominator <= Decimal::ZERO {
            return Err(EngineError::CalculationError {
                message: format!("degenerate growth factor {compound} for rate {monthly_rate}"),
            });
        }

        let emi = self
            .principal
            .as_decimal()
            .checked_mul(monthly_rate)
            .and_then(|x| x.checked_mul(compound))
            .and_then(|x| x.checked_div(denominator))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("installment overflow for principal {}", self.principal),
            })?;

        Ok(Money::from_decimal(emi).round_unit())
    }
}

/// `(1 + r)^n` with `n = tenure_days / 30`
fn growth_factor(monthly_rate: Decimal, tenure_days: i64) -> Result<Decimal> {
    let base = Decimal::ONE + monthly_rate;

    // whole months stay on exact integer powers
    let factor = if tenure_days % DAYS_PER_MONTH == 0 {
        base.checked_powu((tenure_days / DAYS_PER_MONTH) as u64)
    } else {
        base.checked_powd(tenure_months(tenure_days))
    };

    factor.ok_or_else(|| EngineError::CalculationError {
        message: format!("cannot raise {base} to {tenure_days}/{DAYS_PER_MONTH}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_loan_emi() {
        let emi = compute_installment_amount(Money::from_major(150_000), dec!(18), 360).unwrap();
        assert_eq!(emi, Money::from_major(13_752));
    }

    #[test]
    fn test_short_tenure_single_period() {
        // 7 / 30 of a month at 2% monthly
        let emi = compute_installment_amount(Money::from_major(5_000), dec!(24), 7).unwrap();
        assert!(emi >= Money::from_major(21_691));
        assert!(emi <= Money::from_major(21_693));
        assert_eq!(emi, emi.round_unit());
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let emi = compute_installment_amount(Money::from_major(5_000), dec!(0), 7).unwrap();
        assert_eq!(emi, Money::from_major(21_429));

        for principal in [500_i64, 1_000, 5_000, 12_345, 50_000] {
            for days in [7_i64, 15, 30, 45, 60, 90] {
                let p = Money::from_major(principal);
                let emi = compute_installment_amount(p, dec!(0), days).unwrap();
                let expected = (p / tenure_months(days)).round_unit();
                assert_eq!(emi, expected);
            }
        }
    }

    #[test]
    fn test_emi_exceeds_interest_only() {
        for days in 1..=90 {
            let p = Money::from_major(10_000);
            let emi = compute_installment_amount(p, dec!(18), days).unwrap();
            // first month's interest is 150
            assert!(emi > Money::from_major(150), "emi {emi} at {days} days");
        }
    }

    #[test]
    fn test_longer_tenure_lowers_emi() {
        let p = Money::from_major(20_000);
        let short = compute_installment_amount(p, dec!(15), 30).unwrap();
        let long = compute_installment_amount(p, dec!(15), 90).unwrap();
        assert!(long < short);
        assert_eq!(long, Money::from_major(6_834));
    }

    #[test]
    fn test_invalid_terms() {
        assert!(matches!(
            compute_installment_amount(Money::ZERO, dec!(18), 30),
            Err(EngineError::InvalidTerms { .. })
        ));
        assert!(matches!(
            compute_installment_amount(Money::from_major(-10), dec!(18), 30),
            Err(EngineError::InvalidTerms { .. })
        ));
        assert!(matches!(
            compute_installment_amount(Money::from_major(1_000), dec!(18), 0),
            Err(EngineError::InvalidTerms { .. })
        ));
        assert!(matches!(
            compute_installment_amount(Money::from_major(1_000), dec!(18), -7),
            Err(EngineError::InvalidTerms { .. })
        ));
    }
}
