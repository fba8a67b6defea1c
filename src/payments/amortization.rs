use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::interest::started_months;
use crate::types::{Installment, LoanTerms};

/// amortization schedule for a day-denominated loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
    pub installment_amount: Money,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// expand loan terms into monthly installments starting one month after `start_date`
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_days: i64,
    start_date: NaiveDate,
) -> Result<AmortizationSchedule> {
    let terms = LoanTerms::new(principal, annual_rate_percent, tenure_days);
    AmortizationSchedule::generate(terms, start_date)
}

impl AmortizationSchedule {
    /// generate payment schedule
    ///
    /// Interest is charged on the declining balance. Each emitted figure is
    /// rounded to whole units and the rounding drift stays in the carried
    /// balance, so the final row takes whatever principal is left. Principals
    /// with a fractional part are rejected as invalid terms, which keeps that
    /// final row whole as well.
    pub fn generate(terms: LoanTerms, start_date: NaiveDate) -> Result<Self> {
        let installment_amount = terms.installment_amount()?;
        let monthly_rate = terms.annual_rate.monthly_rate();
        let count = started_months(terms.tenure_days);

        let mut installments = Vec::with_capacity(count as usize);
        let mut remaining = terms.principal;

        for i in 1..=count {
            let due_date = add_months(start_date, i)?;
            let interest_portion = remaining.apply_rate(monthly_rate).round_unit();

            let principal_portion = if i == count {
                remaining
            } else {
                (installment_amount - interest_portion).min(remaining)
            };

            remaining -= principal_portion;

            installments.push(Installment {
                sequence_number: i,
                due_date,
                principal_portion,
                interest_portion,
                total_due: principal_portion + interest_portion,
                remaining_principal: remaining,
            });
        }

        let total_interest = installments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = installments
            .iter()
            .map(|p| p.total_due)
            .fold(Money::ZERO, |acc, x| acc + x);

        tracing::debug!(
            principal = %terms.principal,
            rate = %terms.annual_rate,
            tenure_days = terms.tenure_days,
            installments = count,
            %installment_amount,
            %total_interest,
            "built amortization schedule"
        );

        Ok(Self {
            terms,
            start_date,
            installment_amount,
            installments,
            total_interest,
            total_payment,
        })
    }

    /// number of installments
    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// get installment by 1-based sequence number
    pub fn get_installment(&self, sequence_number: u32) -> Option<&Installment> {
        let index = sequence_number.checked_sub(1)?;
        self.installments.get(index as usize)
    }

    /// principal outstanding after the given installment is paid
    pub fn balance_after(&self, sequence_number: u32) -> Money {
        self.get_installment(sequence_number)
            .map(|p| p.remaining_principal)
            .unwrap_or(self.terms.principal)
    }

    /// sum of principal portions; equals the loan principal
    pub fn total_principal(&self) -> Money {
        self.installments
            .iter()
            .map(|p| p.principal_portion)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    /// final due date
    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.installments.last().map(|p| p.due_date)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installment> {
        self.installments.iter()
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a Installment;
    type IntoIter = std::slice::Iter<'a, Installment>;

    fn into_iter(self) -> Self::IntoIter {
        self.installments.iter()
    }
}

/// calendar-month increment, clamped to the end of shorter months
fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("due date out of range: {date} + {months} months"),
        })
}
