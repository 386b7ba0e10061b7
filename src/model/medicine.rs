use serde::{Deserialize, Serialize};

/// Qualitative stock state, derived from remaining quantity vs daily need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Enough,
    Half,
    Empty,
}

impl StockLevel {
    /// The character used inside the stock bracket `(=)` / `(~)` / `(!)`
    pub fn bracket_char(self) -> char {
        match self {
            StockLevel::Enough => '=',
            StockLevel::Half => '~',
            StockLevel::Empty => '!',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockLevel::Enough => "enough",
            StockLevel::Half => "half",
            StockLevel::Empty => "empty",
        }
    }

    /// Parse a level name as typed on the CLI.
    pub fn from_label(s: &str) -> Option<StockLevel> {
        match s {
            "enough" => Some(StockLevel::Enough),
            "half" => Some(StockLevel::Half),
            "empty" => Some(StockLevel::Empty),
            _ => None,
        }
    }
}

/// A medicine record.
///
/// Dose-time tags and the purpose tag are embedded *by name*, not by id:
/// renaming a tag in the registry must rewrite these strings (see
/// `ops::tag_ops`). The `level` field is recomputed from `amount_left` and
/// `daily_needed` after every dose event; a manual edit may set it directly
/// and is left alone until the next dose event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: u32,
    pub name: String,
    /// Dose-time tag names (e.g. "Before breakfast")
    #[serde(default)]
    pub time_tags: Vec<String>,
    /// Single purpose tag name; empty string means untagged
    #[serde(default)]
    pub purpose_tag: String,
    pub level: StockLevel,
    /// Units remaining (non-negative)
    pub amount_left: u32,
    /// Price per unit
    pub unit_price: f64,
    /// Units needed per day
    pub daily_needed: u32,
}

impl Medicine {
    pub fn new(id: u32, name: String) -> Self {
        Medicine {
            id,
            name,
            time_tags: Vec::new(),
            purpose_tag: String::new(),
            level: StockLevel::Enough,
            amount_left: 0,
            unit_price: 0.0,
            daily_needed: 0,
        }
    }
}
