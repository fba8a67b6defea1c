use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EngineConfig, LoanProduct};
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::payments::AmortizationSchedule;
use crate::types::{Installment, LoanTerms, OfferId};

/// priced offer presented to an approved applicant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanOffer {
    pub offer_id: OfferId,
    pub product_name: String,
    pub sanctioned_amount: Money,
    pub apr: Rate,
    pub fees: Money,
    pub tenure_days: i64,
    pub installment_amount: Money,
    pub schedule: Vec<Installment>,
    pub total_interest: Money,
    /// principal plus interest plus fees
    pub total_repayable: Money,
}

impl LoanOffer {
    /// price an offer on a catalog product
    pub fn generate(
        product: &LoanProduct,
        amount: Money,
        tenure_days: i64,
        start_date: NaiveDate,
    ) -> Result<Self> {
        product.accepts(amount, tenure_days)?;

        let terms = LoanTerms::new(amount, product.annual_rate_percent, tenure_days);
        let schedule = AmortizationSchedule::generate(terms, start_date)?;

        let offer = Self {
            offer_id: Uuid::new_v4(),
            product_name: product.name.clone(),
            sanctioned_amount: amount,
            apr: terms.annual_rate,
            fees: product.processing_fee,
            tenure_days,
            installment_amount: schedule.installment_amount,
            total_interest: schedule.total_interest,
            total_repayable: schedule.total_payment + product.processing_fee,
            schedule: schedule.installments,
        };

        tracing::debug!(
            offer_id = %offer.offer_id,
            product = %offer.product_name,
            amount = %amount,
            tenure_days,
            installments = offer.schedule.len(),
            "generated loan offer"
        );

        Ok(offer)
    }

    /// price an offer by product name, applying platform limits first
    pub fn for_application(
        config: &EngineConfig,
        product_name: &str,
        amount: Money,
        tenure_days: i64,
        start_date: NaiveDate,
    ) -> Result<Self> {
        config.application_limits.check(amount, tenure_days)?;
        let product = config
            .product(product_name)
            .ok_or_else(|| EngineError::OutOfProductRange {
                message: format!("unknown product: {product_name}"),
            })?;
        Self::generate(product, amount, tenure_days, start_date)
    }

    /// amount handed to the borrower after the processing fee
    pub fn net_disbursement(&self) -> Money {
        (self.sanctioned_amount - self.fees).max(Money::ZERO)
    }

    pub fn first_due_date(&self) -> Option<NaiveDate> {
        self.schedule.first().map(|p| p.due_date)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EngineError::CalculationError {
            message: format!("failed to serialize offer: {e}"),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidInput {
            message: format!("failed to parse offer: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_personal_loan_offer() {
        let offer = LoanOffer::generate(
            &LoanProduct::personal_loan(),
            Money::from_major(20_000),
            90,
            date(2024, 6, 15),
        )
        .unwrap();

        assert_eq!(offer.product_name, "Personal Loan");
        assert_eq!(offer.apr, Rate::from_percent(dec!(15)));
        assert_eq!(offer.installment_amount, Money::from_major(6_834));
        assert_eq!(offer.schedule.len(), 3);
        assert_eq!(offer.first_due_date(), Some(date(2024, 7, 15)));
        assert_eq!(offer.total_interest, Money::from_major(502));
        assert_eq!(offer.total_repayable, Money::from_major(20_702));
        assert_eq!(offer.fees, Money::from_major(200));
        assert_eq!(offer.net_disbursement(), Money::from_major(19_800));
    }

    #[test]
    fn test_offer_outside_product_window() {
        let result = LoanOffer::generate(
            &LoanProduct::quick_cash(),
            Money::from_major(10_000),
            30,
            date(2024, 6, 15),
        );
        assert!(matches!(result, Err(EngineError::OutOfProductRange { .. })));
    }

    #[test]
    fn test_offer_for_application() {
        let config = EngineConfig::default();
        let offer = LoanOffer::for_application(
            &config,
            "Quick Cash",
            Money::from_major(5_000),
            7,
            date(2024, 3, 1),
        )
        .unwrap();
        assert_eq!(offer.schedule.len(), 1);
        assert_eq!(offer.schedule[0].total_due, Money::from_major(5_100));

        let unknown = LoanOffer::for_application(
            &config,
            "Gold Loan",
            Money::from_major(5_000),
            7,
            date(2024, 3, 1),
        );
        assert!(unknown.is_err());

        let over_limit = LoanOffer::for_application(
            &config,
            "Personal Loan",
            Money::from_major(60_000),
            60,
            date(2024, 3, 1),
        );
        assert!(matches!(over_limit, Err(EngineError::OutOfProductRange { .. })));
    }

    #[test]
    fn test_offer_json_round_trip() {
        let offer = LoanOffer::generate(
            &LoanProduct::student_loan(),
            Money::from_major(10_000),
            60,
            date(2024, 1, 10),
        )
        .unwrap();

        let json = offer.to_json().unwrap();
        let restored = LoanOffer::from_json(&json).unwrap();
        assert_eq!(restored, offer);
    }
}
