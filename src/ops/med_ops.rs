use crate::model::cabinet::Cabinet;
use crate::model::medicine::{Medicine, StockLevel};
use crate::ops::stock;

/// Field-by-field edit for a medicine. `None` leaves the field untouched.
#[derive(Debug, Default, Clone)]
pub struct MedicinePatch {
    pub name: Option<String>,
    pub time_tags: Option<Vec<String>>,
    pub purpose_tag: Option<String>,
    pub level: Option<StockLevel>,
    pub amount_left: Option<u32>,
    pub unit_price: Option<f64>,
    pub daily_needed: Option<u32>,
}

/// Add a medicine to the cabinet. A blank name is a no-op (returns None).
/// The stock level is derived from the counts unless a manual level is
/// supplied.
pub fn add_medicine(cabinet: &mut Cabinet, patch: MedicinePatch) -> Option<u32> {
    let name = patch.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return None;
    }
    let id = cabinet.next_medicine_id();
    let mut med = Medicine::new(id, name);
    med.time_tags = patch.time_tags.unwrap_or_default();
    med.purpose_tag = patch.purpose_tag.unwrap_or_default();
    med.amount_left = patch.amount_left.unwrap_or(0);
    med.unit_price = patch.unit_price.unwrap_or(0.0);
    med.daily_needed = patch.daily_needed.unwrap_or(0);
    med.level = patch
        .level
        .unwrap_or_else(|| stock::level_for(med.amount_left, med.daily_needed));
    cabinet.medicines.push(med);
    Some(id)
}

/// Apply a patch to an existing medicine. Unknown ids and blank renames
/// are no-ops. Returns whether anything was written.
pub fn update_medicine(cabinet: &mut Cabinet, id: u32, patch: MedicinePatch) -> bool {
    let Some(med) = cabinet.find_medicine_mut(id) else {
        return false;
    };
    if let Some(name) = patch.name {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        med.name = name.to_string();
    }
    if let Some(tags) = patch.time_tags {
        med.time_tags = tags;
    }
    if let Some(purpose) = patch.purpose_tag {
        med.purpose_tag = purpose;
    }
    if let Some(amount) = patch.amount_left {
        med.amount_left = amount;
    }
    if let Some(price) = patch.unit_price {
        med.unit_price = price;
    }
    if let Some(daily) = patch.daily_needed {
        med.daily_needed = daily;
    }
    // Manual level wins over the derived one; count edits without an
    // explicit level re-derive it.
    if let Some(level) = patch.level {
        med.level = level;
    } else {
        med.level = stock::level_for(med.amount_left, med.daily_needed);
    }
    true
}

/// Remove a medicine. Returns its name, or None for an unknown id.
pub fn delete_medicine(cabinet: &mut Cabinet, id: u32) -> Option<String> {
    let name = cabinet.find_medicine(id)?.name.clone();
    cabinet.medicines.retain(|m| m.id != id);
    Some(name)
}

/// Record a taken (or un-taken) dose. No-op on unknown id.
pub fn record_dose(cabinet: &mut Cabinet, id: u32, taken: bool) -> bool {
    match cabinet.find_medicine_mut(id) {
        Some(med) => {
            stock::apply_dose_event(med, taken);
            true
        }
        None => false,
    }
}

/// Case-insensitive substring match against name, dose-time tags, and
/// purpose tag. An empty query matches everything.
pub fn matches_query(med: &Medicine, query: &str) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }
    med.name.to_lowercase().contains(&query)
        || med.time_tags.iter().any(|t| t.to_lowercase().contains(&query))
        || med.purpose_tag.to_lowercase().contains(&query)
}

pub fn search<'a>(medicines: &'a [Medicine], query: &str) -> Vec<&'a Medicine> {
    medicines.iter().filter(|m| matches_query(m, query)).collect()
}
