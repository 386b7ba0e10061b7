use crate::model::medicine::{Medicine, StockLevel};

/// Derive a stock level from the remaining amount and daily dose.
/// Zero is empty; up to three days' worth is half; anything beyond is
/// enough. A zero daily dose can only be empty or enough.
pub fn level_for(amount_left: u32, daily_needed: u32) -> StockLevel {
    if amount_left == 0 {
        StockLevel::Empty
    } else if amount_left <= daily_needed.saturating_mul(3) {
        StockLevel::Half
    } else {
        StockLevel::Enough
    }
}

/// Record a dose event against a medicine. `taken` decrements the unit
/// count (floored at zero), un-taking increments it back. The level is
/// re-derived afterwards, so manual level edits survive only until the
/// next dose event.
pub fn apply_dose_event(med: &mut Medicine, taken: bool) {
    if taken {
        med.amount_left = med.amount_left.saturating_sub(1);
    } else {
        med.amount_left = med.amount_left.saturating_add(1);
    }
    med.level = level_for(med.amount_left, med.daily_needed);
}
