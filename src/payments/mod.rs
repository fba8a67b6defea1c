pub mod amortization;
pub mod emi;

pub use amortization::{build_schedule, AmortizationSchedule};
pub use emi::compute_installment_amount;
