use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};
use crate::risk::scorer::{RiskInputs, RiskScore, ScoreBreakdown, MAX_SCORE};

/// risk band shown to underwriters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

/// outcome of the underwriting gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnderwritingDecision {
    Approve,
    ManualReview,
    Decline,
}

/// score thresholds for the underwriting gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicy {
    /// scores at or above this are low risk and approved
    pub approve_threshold: RiskScore,
    /// scores at or above this (and below approve) go to manual review
    pub review_threshold: RiskScore,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            approve_threshold: 70,
            review_threshold: 50,
        }
    }
}

impl RiskPolicy {
    pub fn new(approve_threshold: RiskScore, review_threshold: RiskScore) -> Result<Self> {
        let policy = Self {
            approve_threshold,
            review_threshold,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.approve_threshold > MAX_SCORE {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "approve threshold {} exceeds maximum score {MAX_SCORE}",
                    self.approve_threshold
                ),
            });
        }
        if self.review_threshold > self.approve_threshold {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "review threshold {} above approve threshold {}",
                    self.review_threshold, self.approve_threshold
                ),
            });
        }
        Ok(())
    }

    pub fn band(&self, score: RiskScore) -> RiskBand {
        if score >= self.approve_threshold {
            RiskBand::Low
        } else if score >= self.review_threshold {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    pub fn decide(&self, score: RiskScore) -> UnderwritingDecision {
        match self.band(score) {
            RiskBand::Low => UnderwritingDecision::Approve,
            RiskBand::Medium => UnderwritingDecision::ManualReview,
            RiskBand::High => UnderwritingDecision::Decline,
        }
    }

    /// score the borrower and gate the application
    pub fn assess(&self, inputs: &RiskInputs) -> Result<RiskAssessment> {
        let breakdown = inputs.breakdown()?;
        let score = breakdown.total();
        let band = self.band(score);
        let decision = self.decide(score);

        tracing::info!(
            score,
            ?band,
            ?decision,
            employment = %inputs.employment_category,
            verification = %inputs.verification_status,
            "underwriting decision"
        );

        Ok(RiskAssessment {
            score,
            breakdown,
            band,
            decision,
        })
    }
}

/// scored application with its gate outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub breakdown: ScoreBreakdown,
    pub band: RiskBand,
    pub decision: UnderwritingDecision,
}

impl RiskAssessment {
    pub fn is_approved(&self) -> bool {
        self.decision == UnderwritingDecision::Approve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::types::{EmploymentCategory, VerificationStatus};

    #[test]
    fn test_default_bands() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.band(100), RiskBand::Low);
        assert_eq!(policy.band(70), RiskBand::Low);
        assert_eq!(policy.band(69), RiskBand::Medium);
        assert_eq!(policy.band(50), RiskBand::Medium);
        assert_eq!(policy.band(49), RiskBand::High);
        assert_eq!(policy.band(0), RiskBand::High);
    }

    #[test]
    fn test_decisions_follow_bands() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.decide(85), UnderwritingDecision::Approve);
        assert_eq!(policy.decide(55), UnderwritingDecision::ManualReview);
        assert_eq!(policy.decide(45), UnderwritingDecision::Decline);
    }

    #[test]
    fn test_assess_student_borrower() {
        let inputs = RiskInputs::new(
            Money::from_major(15_000),
            Money::from_major(5_000),
            EmploymentCategory::Student,
            VerificationStatus::Verified,
        );
        let assessment = RiskPolicy::default().assess(&inputs).unwrap();
        assert_eq!(assessment.score, 85);
        assert_eq!(assessment.band, RiskBand::Low);
        assert!(assessment.is_approved());
    }

    #[test]
    fn test_assess_pending_kyc_goes_to_review() {
        // ratio 1 -> 20, self employed 15, pending 10, 15000 -> 15
        let inputs = RiskInputs::new(
            Money::from_major(15_000),
            Money::from_major(15_000),
            EmploymentCategory::SelfEmployed,
            VerificationStatus::Pending,
        );
        let assessment = RiskPolicy::default().assess(&inputs).unwrap();
        assert_eq!(assessment.score, 60);
        assert_eq!(assessment.decision, UnderwritingDecision::ManualReview);
    }

    #[test]
    fn test_assess_rejects_bad_income() {
        let inputs = RiskInputs::new(
            Money::ZERO,
            Money::from_major(5_000),
            EmploymentCategory::Employee,
            VerificationStatus::Verified,
        );
        assert!(matches!(
            RiskPolicy::default().assess(&inputs),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_policy_validation() {
        assert!(RiskPolicy::new(80, 60).is_ok());
        assert!(RiskPolicy::new(60, 80).is_err());
        assert!(RiskPolicy::new(101, 50).is_err());
    }
}
