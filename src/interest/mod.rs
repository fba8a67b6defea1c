pub mod penalty;

use rust_decimal::Decimal;

use crate::decimal::Rate;

pub use penalty::{compute_late_fee, LateFeePolicy};

/// days in one billing month; tenures and overdue windows are day-denominated
pub const DAYS_PER_MONTH: i64 = 30;

/// tenure expressed in (possibly fractional) months
pub fn tenure_months(tenure_days: i64) -> Decimal {
    Decimal::from(tenure_days) / Decimal::from(DAYS_PER_MONTH)
}

/// number of started months in a span of days, `ceil(days / 30)`
///
/// Negative spans count as zero months; spans past `u32::MAX` months saturate.
pub fn started_months(days: i64) -> u32 {
    if days <= 0 {
        return 0;
    }
    let months = (days - 1) / DAYS_PER_MONTH + 1;
    u32::try_from(months).unwrap_or(u32::MAX)
}

/// monthly rate for an annual percentage figure, `apr / 100 / 12`
pub fn monthly_rate_from_percent(annual_rate_percent: Decimal) -> Rate {
    Rate::from_percent(annual_rate_percent).monthly_rate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tenure_months() {
        assert_eq!(tenure_months(360), dec!(12));
        assert_eq!(tenure_months(45), dec!(1.5));
        assert!(tenure_months(7) > dec!(0.233));
        assert!(tenure_months(7) < dec!(0.234));
    }

    #[test]
    fn test_started_months() {
        assert_eq!(started_months(0), 0);
        assert_eq!(started_months(1), 1);
        assert_eq!(started_months(30), 1);
        assert_eq!(started_months(31), 2);
        assert_eq!(started_months(90), 3);
        assert_eq!(started_months(-5), 0);
        assert_eq!(started_months(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate_from_percent(dec!(18)).as_decimal(), dec!(0.015));
        assert_eq!(monthly_rate_from_percent(dec!(24)).as_decimal(), dec!(0.02));
        assert!(monthly_rate_from_percent(dec!(0)).is_zero());
    }
}
