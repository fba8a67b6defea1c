/// quick start - price a loan and print its schedule
use loan_engine::chrono::NaiveDate;
use loan_engine::{build_schedule, compute_installment_amount, Decimal, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let principal = Money::from_major(150_000);
    let apr = Decimal::from(18);

    let emi = compute_installment_amount(principal, apr, 360)?;
    println!("installment: {}", emi);

    let start = NaiveDate::from_ymd_opt(2024, 6, 15).ok_or("bad start date")?;
    let schedule = build_schedule(principal, apr, 360, start)?;

    for row in &schedule {
        println!(
            "{:>2}  {}  principal {:>6}  interest {:>5}  total {:>6}  remaining {:>7}",
            row.sequence_number,
            row.due_date,
            row.principal_portion,
            row.interest_portion,
            row.total_due,
            row.remaining_principal,
        );
    }
    println!("total interest: {}", schedule.total_interest);

    Ok(())
}
