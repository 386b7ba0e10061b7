use chrono::{Datelike, NaiveDate};

use crate::model::medicine::Medicine;

/// Aggregated spend figures across the whole cabinet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    /// Value of stock on hand: sum of unit_price * amount_left.
    pub total: f64,
    /// Daily burn rate: sum of unit_price * daily_needed.
    pub daily: f64,
    /// Daily burn scaled by the real number of days in the given month.
    pub monthly: f64,
}

/// Sum cabinet costs for the month containing `date`. Medicines with a
/// zero price or zero daily dose contribute zero to the respective terms.
pub fn aggregate(medicines: &[Medicine], date: NaiveDate) -> CostSummary {
    let total = medicines
        .iter()
        .map(|m| m.unit_price * m.amount_left as f64)
        .sum();
    let daily: f64 = medicines
        .iter()
        .map(|m| m.unit_price * m.daily_needed as f64)
        .sum();
    CostSummary {
        total,
        daily,
        monthly: daily * days_in_month(date) as f64,
    }
}

/// Number of days in the month containing `date`, leap years included.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let first_of_this = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date);
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or(date);
    (first_of_next - first_of_this).num_days() as u32
}
