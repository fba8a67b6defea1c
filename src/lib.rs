pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod offer;
pub mod payments;
pub mod repayment;
pub mod risk;
pub mod types;

// re-export key types
pub use config::{ApplicationLimits, EngineConfig, LoanProduct};
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use interest::{compute_late_fee, LateFeePolicy};
pub use offer::LoanOffer;
pub use payments::{build_schedule, compute_installment_amount, AmortizationSchedule};
pub use repayment::{overdue_days, PaymentQuote, RepaymentRow, RepaymentSummary};
pub use risk::{
    compute_risk_score, RiskAssessment, RiskBand, RiskInputs, RiskPolicy, RiskScore,
    UnderwritingDecision,
};
pub use types::{
    EmploymentCategory, Installment, LoanTerms, OfferId, OverdueCharge, RepaymentStatus,
    VerificationStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
