use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from dosette.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreInfo,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub windows: TimeWindows,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_language")]
    pub language: String,
    /// Reserved: parsed and editable, but wired to no behavior yet.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            language: default_language(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_low_stock_threshold() -> u32 {
    5
}

/// An `[start, end)` hour-of-day range. The night window may wrap past
/// midnight (`start > end` means "hour >= start OR hour < end").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u32,
    pub end: u32,
}

impl TimeWindow {
    pub fn new(start: u32, end: u32) -> Self {
        TimeWindow { start, end }
    }

    /// Whether `hour` falls in this window, half-open.
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour < self.end
    }

    /// Whether `hour` falls in this window with wrap-around semantics.
    pub fn contains_wrapping(&self, hour: u32) -> bool {
        hour >= self.start || hour < self.end
    }
}

/// The four configurable dose-time windows. A partial `[windows]` table
/// fills the missing entries with the stock defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindows {
    #[serde(default = "default_morning")]
    pub morning: TimeWindow,
    #[serde(default = "default_afternoon")]
    pub afternoon: TimeWindow,
    #[serde(default = "default_evening")]
    pub evening: TimeWindow,
    #[serde(default = "default_night")]
    pub night: TimeWindow,
}

fn default_morning() -> TimeWindow {
    TimeWindow::new(6, 10)
}

fn default_afternoon() -> TimeWindow {
    TimeWindow::new(11, 14)
}

fn default_evening() -> TimeWindow {
    TimeWindow::new(17, 21)
}

fn default_night() -> TimeWindow {
    TimeWindow::new(21, 2)
}

impl Default for TimeWindows {
    fn default() -> Self {
        TimeWindows {
            morning: default_morning(),
            afternoon: default_afternoon(),
            evening: default_evening(),
            night: default_night(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, hex strings keyed by theme slot name.
    #[serde(default)]
    pub colors: IndexMap<String, String>,
    /// Per-stock-level color overrides ("enough", "half", "empty").
    #[serde(default)]
    pub level_colors: IndexMap<String, String>,
}
