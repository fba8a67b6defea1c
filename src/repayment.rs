use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::interest::LateFeePolicy;
use crate::types::{Installment, RepaymentStatus};

/// whole days `as_of` is past `due_date`, zero on or before the due date
pub fn overdue_days(due_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - due_date).num_days().max(0)
}

/// repayment row materialised when the agreement is signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentRow {
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub amount_due: Money,
    pub amount_paid: Money,
    pub late_fee: Money,
    pub status: RepaymentStatus,
    pub paid_on: Option<NaiveDate>,
}

impl RepaymentRow {
    pub fn from_installment(installment: &Installment) -> Self {
        Self {
            sequence_number: installment.sequence_number,
            due_date: installment.due_date,
            amount_due: installment.total_due,
            amount_paid: Money::ZERO,
            late_fee: Money::ZERO,
            status: RepaymentStatus::Pending,
            paid_on: None,
        }
    }

    /// one pending row per installment
    pub fn from_schedule(installments: &[Installment]) -> Vec<Self> {
        installments.iter().map(Self::from_installment).collect()
    }

    pub fn is_paid(&self) -> bool {
        self.status == RepaymentStatus::Paid
    }

    /// days overdue as of a date; paid rows are never overdue
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        if self.is_paid() {
            0
        } else {
            overdue_days(self.due_date, as_of)
        }
    }

    /// move unpaid rows past their due date to overdue
    pub fn refresh_status(&mut self, as_of: NaiveDate) {
        if self.is_paid() {
            return;
        }
        self.status = if self.days_overdue(as_of) > 0 {
            RepaymentStatus::Overdue
        } else {
            RepaymentStatus::Pending
        };
    }

    /// record a collected payment against this row
    ///
    /// The quote must be dated the day the payment is collected so the late
    /// fee reflects the actual settlement date.
    pub fn mark_paid(&mut self, quote: &PaymentQuote, tendered: Money, paid_on: NaiveDate) -> Result<()> {
        if self.is_paid() {
            return Err(EngineError::AlreadyPaid {
                sequence_number: self.sequence_number,
            });
        }
        if quote.sequence_number != self.sequence_number {
            return Err(EngineError::invalid_input(format!(
                "quote for installment {} applied to installment {}",
                quote.sequence_number, self.sequence_number
            )));
        }
        if quote.as_of != paid_on {
            tracing::warn!(
                sequence_number = self.sequence_number,
                quoted = %quote.as_of,
                %paid_on,
                "stale payment quote"
            );
            return Err(EngineError::invalid_input(format!(
                "quote dated {} used for payment on {}",
                quote.as_of, paid_on
            )));
        }
        if tendered < quote.total_payable {
            tracing::warn!(
                sequence_number = self.sequence_number,
                %tendered,
                payable = %quote.total_payable,
                "payment below amount payable"
            );
            return Err(EngineError::InsufficientPayment {
                payable: quote.total_payable,
                provided: tendered,
            });
        }

        self.late_fee = quote.late_fee;
        self.amount_paid = quote.total_payable;
        self.status = RepaymentStatus::Paid;
        self.paid_on = Some(paid_on);

        tracing::debug!(
            sequence_number = self.sequence_number,
            amount = %self.amount_paid,
            late_fee = %self.late_fee,
            "repayment settled"
        );
        Ok(())
    }
}

/// amount to collect for one row at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub sequence_number: u32,
    pub as_of: NaiveDate,
    pub amount_due: Money,
    pub days_overdue: i64,
    pub late_fee: Money,
    pub total_payable: Money,
}

impl PaymentQuote {
    pub fn for_row(row: &RepaymentRow, as_of: NaiveDate, policy: &LateFeePolicy) -> Result<Self> {
        if row.is_paid() {
            return Err(EngineError::AlreadyPaid {
                sequence_number: row.sequence_number,
            });
        }

        let days_overdue = row.days_overdue(as_of);
        let late_fee = policy.fee_for(row.amount_due, days_overdue)?;

        Ok(Self {
            sequence_number: row.sequence_number,
            as_of,
            amount_due: row.amount_due,
            days_overdue,
            late_fee,
            total_payable: row.amount_due + late_fee,
        })
    }

    /// quote against the current time of an injected clock
    pub fn now(row: &RepaymentRow, time_provider: &SafeTimeProvider, policy: &LateFeePolicy) -> Result<Self> {
        Self::for_row(row, time_provider.now().date_naive(), policy)
    }
}

/// borrower-facing totals across a loan's repayment rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub total_due: Money,
    pub total_paid: Money,
    /// unpaid past-due rows including their accrued late fees
    pub overdue_amount: Money,
    pub overdue_count: u32,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_amount: Option<Money>,
    /// every row paid; the loan is complete
    pub is_settled: bool,
}

impl RepaymentSummary {
    pub fn from_rows(rows: &[RepaymentRow], as_of: NaiveDate, policy: &LateFeePolicy) -> Result<Self> {
        let mut total_due = Money::ZERO;
        let mut total_paid = Money::ZERO;
        let mut overdue_amount = Money::ZERO;
        let mut overdue_count = 0;
        let mut next: Option<&RepaymentRow> = None;

        for row in rows {
            total_due += row.amount_due;
            total_paid += row.amount_paid;

            if row.is_paid() {
                continue;
            }

            let days = row.days_overdue(as_of);
            if days > 0 {
                overdue_amount += row.amount_due + policy.fee_for(row.amount_due, days)?;
                overdue_count += 1;
            } else if next.map_or(true, |n| row.due_date < n.due_date) {
                next = Some(row);
            }
        }

        Ok(Self {
            total_due,
            total_paid,
            overdue_amount,
            overdue_count,
            next_due_date: next.map(|r| r.due_date),
            next_due_amount: next.map(|r| r.amount_due),
            is_settled: rows.iter().all(RepaymentRow::is_paid),
        })
    }
}
