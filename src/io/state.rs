use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("cabinet", "due", "costs")
    pub view: String,
    /// Cursor row in the cabinet view
    #[serde(default)]
    pub cabinet_cursor: usize,
    /// Cursor row in the due view
    #[serde(default)]
    pub due_cursor: usize,
    /// Active tag filter in the cabinet view, if any
    #[serde(default)]
    pub tag_filter: Option<String>,
    /// Last search pattern
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .state.json from the dosette directory
pub fn read_ui_state(dosette_dir: &Path) -> Option<UiState> {
    let path = dosette_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the dosette directory
pub fn write_ui_state(dosette_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = dosette_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
