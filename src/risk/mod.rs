pub mod policy;
pub mod scorer;

pub use policy::{RiskAssessment, RiskBand, RiskPolicy, UnderwritingDecision};
pub use scorer::{compute_risk_score, RiskInputs, RiskScore, ScoreBreakdown, MAX_SCORE};
