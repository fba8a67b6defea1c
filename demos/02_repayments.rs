/// repayments - materialise rows, let time pass and collect with late fees
use chrono::{Duration, TimeZone, Utc};
use loan_engine::{
    build_schedule, Decimal, LateFeePolicy, Money, PaymentQuote, RepaymentRow, RepaymentSummary,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let policy = LateFeePolicy::default();

    let start = time.now().date_naive();
    let schedule = build_schedule(Money::from_major(20_000), Decimal::from(15), 90, start)?;
    let mut rows = RepaymentRow::from_schedule(&schedule.installments);

    // first installment paid on its due date
    controller.advance(Duration::days(31));
    let quote = PaymentQuote::now(&rows[0], &time, &policy)?;
    rows[0].mark_paid(&quote, quote.total_payable, time.now().date_naive())?;
    println!("paid #1: {} (late fee {})", quote.total_payable, quote.late_fee);

    // second installment paid ten days late
    controller.advance(Duration::days(39));
    let quote = PaymentQuote::now(&rows[1], &time, &policy)?;
    rows[1].mark_paid(&quote, quote.total_payable, time.now().date_naive())?;
    println!(
        "paid #2: {} ({} days late, fee {})",
        quote.total_payable, quote.days_overdue, quote.late_fee
    );

    let summary = RepaymentSummary::from_rows(&rows, time.now().date_naive(), &policy)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
