use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for a generated offer
pub type OfferId = Uuid;

/// loan terms as priced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_days: i64,
}

impl LoanTerms {
    /// build terms from an annual percentage figure (18 for 18%)
    pub fn new(principal: Money, annual_rate_percent: rust_decimal::Decimal, tenure_days: i64) -> Self {
        Self {
            principal,
            annual_rate: Rate::from_percent(annual_rate_percent),
            tenure_days,
        }
    }

    /// reject terms the amortization formula cannot price
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(EngineError::invalid_terms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.principal.is_whole() {
            return Err(EngineError::invalid_terms(format!(
                "principal must be a whole currency amount, got {}",
                self.principal
            )));
        }
        if self.tenure_days < 1 {
            return Err(EngineError::invalid_terms(format!(
                "tenure must be at least one day, got {}",
                self.tenure_days
            )));
        }
        if self.annual_rate.is_negative() {
            return Err(EngineError::invalid_terms(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate
            )));
        }
        Ok(())
    }
}

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub sequence_number: u32,
    pub due_date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_due: Money,
    pub remaining_principal: Money,
}

/// penalty assessed on an overdue amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueCharge {
    pub base_amount: Money,
    pub days_overdue: i64,
    pub fee_amount: Money,
}

/// borrower employment category as captured on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentCategory {
    Employee,
    SelfEmployed,
    Student,
    Unemployed,
}

impl EmploymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentCategory::Employee => "EMPLOYEE",
            EmploymentCategory::SelfEmployed => "SELF_EMPLOYED",
            EmploymentCategory::Student => "STUDENT",
            EmploymentCategory::Unemployed => "UNEMPLOYED",
        }
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Ok(EmploymentCategory::Employee),
            "SELF_EMPLOYED" => Ok(EmploymentCategory::SelfEmployed),
            "STUDENT" => Ok(EmploymentCategory::Student),
            "UNEMPLOYED" => Ok(EmploymentCategory::Unemployed),
            other => Err(EngineError::invalid_input(format!(
                "unknown employment category: {other}"
            ))),
        }
    }
}

/// kyc verification status of the borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Unverified,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Unverified => "UNVERIFIED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VERIFIED" => Ok(VerificationStatus::Verified),
            "PENDING" => Ok(VerificationStatus::Pending),
            "UNVERIFIED" => Ok(VerificationStatus::Unverified),
            other => Err(EngineError::invalid_input(format!(
                "unknown verification status: {other}"
            ))),
        }
    }
}

/// repayment row status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentStatus {
    /// not yet due, or due today
    Pending,
    /// collected in full
    Paid,
    /// past the due date and unpaid
    Overdue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_terms_validation() {
        let ok = LoanTerms::new(Money::from_major(5_000), dec!(24), 30);
        assert!(ok.validate().is_ok());

        let zero_principal = LoanTerms::new(Money::ZERO, dec!(24), 30);
        assert!(matches!(
            zero_principal.validate(),
            Err(EngineError::InvalidTerms { .. })
        ));

        let zero_tenure = LoanTerms::new(Money::from_major(5_000), dec!(24), 0);
        assert!(matches!(
            zero_tenure.validate(),
            Err(EngineError::InvalidTerms { .. })
        ));

        let negative_rate = LoanTerms::new(Money::from_major(5_000), dec!(-1), 30);
        assert!(negative_rate.validate().is_err());

        let fractional = LoanTerms::new(Money::from(dec!(1500.50)), dec!(18), 60);
        assert!(matches!(
            fractional.validate(),
            Err(EngineError::InvalidTerms { .. })
        ));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(
            "SELF_EMPLOYED".parse::<EmploymentCategory>().unwrap(),
            EmploymentCategory::SelfEmployed
        );
        assert_eq!(
            "verified".parse::<VerificationStatus>().unwrap(),
            VerificationStatus::Verified
        );
        assert!("FREELANCER".parse::<EmploymentCategory>().is_err());
    }

    #[test]
    fn test_enum_serde_matches_stored_strings() {
        let json = serde_json::to_string(&EmploymentCategory::SelfEmployed).unwrap();
        assert_eq!(json, "\"SELF_EMPLOYED\"");

        let status: VerificationStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, VerificationStatus::Pending);
    }
}
