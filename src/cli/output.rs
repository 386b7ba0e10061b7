use serde::Serialize;

use crate::model::medicine::{Medicine, StockLevel};
use crate::model::tag::Tag;
use crate::ops::cost::CostSummary;
use crate::util::text::{format_money, join_tags};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct MedicineJson {
    pub id: u32,
    pub name: String,
    pub level: StockLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub purpose_tag: String,
    pub amount_left: u32,
    pub unit_price: f64,
    pub daily_needed: u32,
}

#[derive(Serialize)]
pub struct MedicineListJson {
    pub medicines: Vec<MedicineJson>,
}

#[derive(Serialize)]
pub struct DueJson {
    pub hour: u32,
    pub medicines: Vec<MedicineJson>,
}

#[derive(Serialize)]
pub struct TagJson {
    pub id: u32,
    pub kind: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct TagListJson {
    pub tags: Vec<TagJson>,
}

#[derive(Serialize)]
pub struct CostsJson {
    pub month: String,
    pub total: f64,
    pub daily: f64,
    pub monthly: f64,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn medicine_to_json(med: &Medicine) -> MedicineJson {
    MedicineJson {
        id: med.id,
        name: med.name.clone(),
        level: med.level,
        time_tags: med.time_tags.clone(),
        purpose_tag: med.purpose_tag.clone(),
        amount_left: med.amount_left,
        unit_price: med.unit_price,
        daily_needed: med.daily_needed,
    }
}

pub fn tag_to_json(tag: &Tag, kind: &str) -> TagJson {
    TagJson {
        id: tag.id,
        kind: kind.to_string(),
        name: tag.name.clone(),
    }
}

pub fn costs_to_json(summary: &CostSummary, month: &str) -> CostsJson {
    CostsJson {
        month: month.to_string(),
        total: summary.total,
        daily: summary.daily,
        monthly: summary.monthly,
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

/// One-line cabinet listing: `[=] 1 Aspirin (20 left) — Pain relief · Before breakfast, With dinner`
pub fn medicine_line(med: &Medicine) -> String {
    let mut line = format!(
        "[{}] {:>3} {} ({} left)",
        med.level.bracket_char(),
        med.id,
        med.name,
        med.amount_left
    );
    if !med.purpose_tag.is_empty() {
        line.push_str(&format!(" — {}", med.purpose_tag));
    }
    if !med.time_tags.is_empty() {
        line.push_str(&format!(" · {}", join_tags(&med.time_tags)));
    }
    line
}

pub fn print_medicine_details(med: &Medicine) {
    println!("{} (id {})", med.name, med.id);
    println!("  level:  {}", med.level.label());
    println!("  stock:  {} units", med.amount_left);
    println!("  price:  {} per unit", format_money(med.unit_price));
    println!("  daily:  {} units", med.daily_needed);
    if !med.time_tags.is_empty() {
        println!("  when:   {}", join_tags(&med.time_tags));
    }
    if !med.purpose_tag.is_empty() {
        println!("  for:    {}", med.purpose_tag);
    }
}

pub fn print_costs(summary: &CostSummary, month: &str) {
    println!("costs for {}", month);
    println!("  on hand:  {}", format_money(summary.total));
    println!("  per day:  {}", format_money(summary.daily));
    println!("  monthly:  {}", format_money(summary.monthly));
}
