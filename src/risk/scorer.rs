use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::{EmploymentCategory, VerificationStatus};

/// creditworthiness score, higher is lower risk
pub type RiskScore = u8;

pub const MAX_SCORE: RiskScore = 100;

/// borrower attributes consumed at application intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub monthly_income: Money,
    pub requested_amount: Money,
    pub employment_category: EmploymentCategory,
    pub verification_status: VerificationStatus,
}

/// points contributed by each factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub income_ratio: RiskScore,
    pub employment: RiskScore,
    pub verification: RiskScore,
    pub loan_size: RiskScore,
}

impl ScoreBreakdown {
    pub fn total(&self) -> RiskScore {
        let sum = self.income_ratio as u32
            + self.employment as u32
            + self.verification as u32
            + self.loan_size as u32;
        sum.min(MAX_SCORE as u32) as RiskScore
    }
}

impl RiskInputs {
    pub fn new(
        monthly_income: Money,
        requested_amount: Money,
        employment_category: EmploymentCategory,
        verification_status: VerificationStatus,
    ) -> Self {
        Self {
            monthly_income,
            requested_amount,
            employment_category,
            verification_status,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.monthly_income.is_positive() {
            return Err(EngineError::invalid_input(format!(
                "monthly income must be positive, got {}",
                self.monthly_income
            )));
        }
        if !self.requested_amount.is_positive() {
            return Err(EngineError::invalid_input(format!(
                "requested amount must be positive, got {}",
                self.requested_amount
            )));
        }
        Ok(())
    }

    /// per-factor points
    pub fn breakdown(&self) -> Result<ScoreBreakdown> {
        if let Err(e) = self.validate() {
            tracing::warn!(error = %e, "rejected risk inputs");
            return Err(e);
        }

        let ratio = self
            .requested_amount
            .as_decimal()
            .checked_div(self.monthly_income.as_decimal())
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "income ratio overflow for {} over {}",
                    self.requested_amount, self.monthly_income
                ),
            })?;

        Ok(ScoreBreakdown {
            income_ratio: income_ratio_points(ratio),
            employment: employment_points(self.employment_category),
            verification: verification_points(self.verification_status),
            loan_size: loan_size_points(self.requested_amount),
        })
    }

    /// additive score clamped to `[0, 100]`
    pub fn score(&self) -> Result<RiskScore> {
        Ok(self.breakdown()?.total())
    }
}

/// score a borrower for underwriting
pub fn compute_risk_score(
    monthly_income: Money,
    requested_amount: Money,
    employment_category: EmploymentCategory,
    verification_status: VerificationStatus,
) -> Result<RiskScore> {
    RiskInputs::new(
        monthly_income,
        requested_amount,
        employment_category,
        verification_status,
    )
    .score()
}

/// requested amount over monthly income, lower is better
fn income_ratio_points(ratio: Decimal) -> RiskScore {
    if ratio <= dec!(0.5) {
        30
    } else if ratio <= Decimal::ONE {
        20
    } else if ratio <= dec!(2) {
        10
    } else {
        0
    }
}

fn employment_points(category: EmploymentCategory) -> RiskScore {
    match category {
        EmploymentCategory::Employee => 25,
        EmploymentCategory::SelfEmployed => 15,
        EmploymentCategory::Student => 10,
        EmploymentCategory::Unemployed => 0,
    }
}

fn verification_points(status: VerificationStatus) -> RiskScore {
    match status {
        VerificationStatus::Verified => 25,
        VerificationStatus::Pending => 10,
        VerificationStatus::Unverified => 0,
    }
}

/// smaller loans carry less exposure
fn loan_size_points(requested_amount: Money) -> RiskScore {
    let amount = requested_amount.as_decimal();
    if amount <= dec!(5000) {
        20
    } else if amount <= dec!(15000) {
        15
    } else if amount <= dec!(30000) {
        10
    } else {
        5
    }
}
