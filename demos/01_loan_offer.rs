/// loan offer - score an applicant, gate the application and price an offer
use loan_engine::chrono::NaiveDate;
use loan_engine::{
    EmploymentCategory, EngineConfig, LoanOffer, Money, RiskInputs, UnderwritingDecision,
    VerificationStatus,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::default();

    let applicant = RiskInputs::new(
        Money::from_major(15_000),
        Money::from_major(5_000),
        "STUDENT".parse::<EmploymentCategory>()?,
        "VERIFIED".parse::<VerificationStatus>()?,
    );

    let assessment = config.risk.assess(&applicant)?;
    println!(
        "score {} ({:?}) -> {:?}",
        assessment.score, assessment.band, assessment.decision
    );

    if assessment.decision != UnderwritingDecision::Approve {
        println!("application not auto-approved");
        return Ok(());
    }

    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("bad start date")?;
    let offer = LoanOffer::for_application(
        &config,
        "Student Loan",
        applicant.requested_amount,
        45,
        start,
    )?;

    println!("{}", serde_json::to_string_pretty(&offer)?);
    println!("net disbursement: {}", offer.net_disbursement());

    Ok(())
}
