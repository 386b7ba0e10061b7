use crate::model::medicine::Medicine;
use crate::model::settings::TimeWindows;

/// The four schedulable parts of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }
}

/// Map a dose-time tag name to a day period by case-insensitive keyword
/// match. Priority order is fixed: morning, afternoon, evening, night —
/// a tag containing both "lunch" and "dinner" classifies as afternoon.
/// Free-text tags ("weekly") match nothing and are never active.
pub fn classify_tag(tag: &str) -> Option<DayPeriod> {
    let lower = tag.to_lowercase();
    if lower.contains("morning") || lower.contains("breakfast") {
        Some(DayPeriod::Morning)
    } else if lower.contains("afternoon") || lower.contains("lunch") {
        Some(DayPeriod::Afternoon)
    } else if lower.contains("evening") || lower.contains("dinner") {
        Some(DayPeriod::Evening)
    } else if lower.contains("night") || lower.contains("bed") {
        Some(DayPeriod::Night)
    } else {
        None
    }
}

/// Whether a dose-time tag is active at `hour` under the given windows.
///
/// Morning/afternoon/evening use the half-open `[start, end)` range; night
/// wraps past midnight (`hour >= start || hour < end`).
pub fn is_tag_active(tag: &str, hour: u32, windows: &TimeWindows) -> bool {
    match classify_tag(tag) {
        Some(DayPeriod::Morning) => windows.morning.contains(hour),
        Some(DayPeriod::Afternoon) => windows.afternoon.contains(hour),
        Some(DayPeriod::Evening) => windows.evening.contains(hour),
        Some(DayPeriod::Night) => windows.night.contains_wrapping(hour),
        None => false,
    }
}

/// Medicines due at `hour`: any dose-time tag active. Stable filter — the
/// result preserves cabinet order.
pub fn due_medicines<'a>(
    medicines: &'a [Medicine],
    hour: u32,
    windows: &TimeWindows,
) -> Vec<&'a Medicine> {
    medicines
        .iter()
        .filter(|m| m.time_tags.iter().any(|t| is_tag_active(t, hour, windows)))
        .collect()
}

/// The periods active at `hour` (for the status row).
pub fn active_periods(hour: u32, windows: &TimeWindows) -> Vec<DayPeriod> {
    let mut periods = Vec::new();
    if windows.morning.contains(hour) {
        periods.push(DayPeriod::Morning);
    }
    if windows.afternoon.contains(hour) {
        periods.push(DayPeriod::Afternoon);
    }
    if windows.evening.contains(hour) {
        periods.push(DayPeriod::Evening);
    }
    if windows.night.contains_wrapping(hour) {
        periods.push(DayPeriod::Night);
    }
    periods
}
