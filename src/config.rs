use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::interest::LateFeePolicy;
use crate::risk::RiskPolicy;

/// engine configuration
///
/// Every section falls back to its default when missing from the JSON
/// document, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub late_fee: LateFeePolicy,
    #[serde(default)]
    pub risk: RiskPolicy,
    #[serde(default)]
    pub application_limits: ApplicationLimits,
    #[serde(default = "default_products")]
    pub products: Vec<LoanProduct>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            late_fee: LateFeePolicy::default(),
            risk: RiskPolicy::default(),
            application_limits: ApplicationLimits::default(),
            products: default_products(),
        }
    }
}

fn default_products() -> Vec<LoanProduct> {
    vec![
        LoanProduct::quick_cash(),
        LoanProduct::student_loan(),
        LoanProduct::personal_loan(),
    ]
}

impl EngineConfig {
    /// parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfiguration {
                message: format!("failed to parse config: {e}"),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::InvalidConfiguration {
                message: format!("failed to read {}: {e}", path.display()),
            })?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            products = config.products.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidConfiguration {
            message: format!("failed to serialize config: {e}"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.late_fee.monthly_rate.is_negative() {
            return Err(EngineError::InvalidConfiguration {
                message: format!("late fee rate {} is negative", self.late_fee.monthly_rate),
            });
        }
        self.risk.validate()?;
        self.application_limits.validate()?;
        for product in &self.products {
            product.validate()?;
        }
        Ok(())
    }

    /// look up a product by name, case-insensitively
    pub fn product(&self, name: &str) -> Option<&LoanProduct> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// platform-wide bounds on any application, checked at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLimits {
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_tenure_days: i64,
    pub max_tenure_days: i64,
}

impl Default for ApplicationLimits {
    fn default() -> Self {
        Self {
            min_amount: Money::from_major(500),
            max_amount: Money::from_major(50_000),
            min_tenure_days: 7,
            max_tenure_days: 90,
        }
    }
}

impl ApplicationLimits {
    pub fn validate(&self) -> Result<()> {
        validate_window(
            "application limits",
            self.min_amount,
            self.max_amount,
            self.min_tenure_days,
            self.max_tenure_days,
        )
    }

    pub fn check(&self, amount: Money, tenure_days: i64) -> Result<()> {
        check_window(
            "application",
            amount,
            tenure_days,
            (self.min_amount, self.max_amount),
            (self.min_tenure_days, self.max_tenure_days),
        )
    }
}

/// a loan product from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub name: String,
    pub min_amount: Money,
    pub max_amount: Money,
    pub annual_rate_percent: Decimal,
    pub min_tenure_days: i64,
    pub max_tenure_days: i64,
    /// flat processing fee charged on sanction
    pub processing_fee: Money,
}

impl LoanProduct {
    /// small short-term advance
    pub fn quick_cash() -> Self {
        Self {
            name: "Quick Cash".to_string(),
            min_amount: Money::from_major(500),
            max_amount: Money::from_major(5_000),
            annual_rate_percent: dec!(24),
            min_tenure_days: 7,
            max_tenure_days: 30,
            processing_fee: Money::from_major(50),
        }
    }

    pub fn student_loan() -> Self {
        Self {
            name: "Student Loan".to_string(),
            min_amount: Money::from_major(1_000),
            max_amount: Money::from_major(15_000),
            annual_rate_percent: dec!(18),
            min_tenure_days: 15,
            max_tenure_days: 60,
            processing_fee: Money::from_major(100),
        }
    }

    pub fn personal_loan() -> Self {
        Self {
            name: "Personal Loan".to_string(),
            min_amount: Money::from_major(5_000),
            max_amount: Money::from_major(50_000),
            annual_rate_percent: dec!(15),
            min_tenure_days: 30,
            max_tenure_days: 90,
            processing_fee: Money::from_major(200),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_window(
            &self.name,
            self.min_amount,
            self.max_amount,
            self.min_tenure_days,
            self.max_tenure_days,
        )?;
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: format!("{}: negative rate {}", self.name, self.annual_rate_percent),
            });
        }
        if self.processing_fee.is_negative() {
            return Err(EngineError::InvalidConfiguration {
                message: format!("{}: negative processing fee", self.name),
            });
        }
        Ok(())
    }

    /// check that the product can be offered for this amount and tenure
    pub fn accepts(&self, amount: Money, tenure_days: i64) -> Result<()> {
        check_window(
            &self.name,
            amount,
            tenure_days,
            (self.min_amount, self.max_amount),
            (self.min_tenure_days, self.max_tenure_days),
        )
    }
}

fn validate_window(
    label: &str,
    min_amount: Money,
    max_amount: Money,
    min_tenure_days: i64,
    max_tenure_days: i64,
) -> Result<()> {
    if !min_amount.is_positive() || min_amount > max_amount {
        return Err(EngineError::InvalidConfiguration {
            message: format!("{label}: invalid amount range {min_amount}..={max_amount}"),
        });
    }
    if min_tenure_days < 1 || min_tenure_days > max_tenure_days {
        return Err(EngineError::InvalidConfiguration {
            message: format!(
                "{label}: invalid tenure range {min_tenure_days}..={max_tenure_days} days"
            ),
        });
    }
    Ok(())
}

fn check_window(
    label: &str,
    amount: Money,
    tenure_days: i64,
    (min_amount, max_amount): (Money, Money),
    (min_tenure_days, max_tenure_days): (i64, i64),
) -> Result<()> {
    if amount < min_amount || amount > max_amount {
        tracing::warn!(%amount, label, "amount outside range");
        return Err(EngineError::OutOfProductRange {
            message: format!("{label}: amount must be between {min_amount} and {max_amount}, got {amount}"),
        });
    }
    if tenure_days < min_tenure_days || tenure_days > max_tenure_days {
        tracing::warn!(tenure_days, label, "tenure outside range");
        return Err(EngineError::OutOfProductRange {
            message: format!(
                "{label}: tenure must be between {min_tenure_days} and {max_tenure_days} days, got {tenure_days}"
            ),
        });
    }
    Ok(())
}
