/// config - override policy from json and compare late fees
use loan_engine::{EngineConfig, Money};

const OVERRIDES: &str = r#"{
    "late_fee": { "monthly_rate": "0.03" },
    "risk": { "approve_threshold": 80, "review_threshold": 60 }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let standard = EngineConfig::default();
    let strict = EngineConfig::from_json_str(OVERRIDES)?;

    let due = Money::from_major(8_500);
    for days in [0, 10, 30, 31, 75] {
        println!(
            "{:>2} days overdue: standard fee {:>4}, strict fee {:>4}",
            days,
            standard.late_fee.fee_for(due, days)?,
            strict.late_fee.fee_for(due, days)?,
        );
    }

    for score in [85, 65, 40] {
        println!(
            "score {}: standard {:?}, strict {:?}",
            score,
            standard.risk.decide(score),
            strict.risk.decide(score),
        );
    }

    Ok(())
}
