use ratatui::style::Color;

use crate::model::medicine::StockLevel;
use crate::model::settings::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    pub enough: Color,
    pub half: Color,
    pub empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            enough: Color::Rgb(0x44, 0xFF, 0x88),
            half: Color::Rgb(0xFF, 0xD7, 0x00),
            empty: Color::Rgb(0xFF, 0x44, 0x44),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from store UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // Apply color overrides from [ui.colors]
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }

        // Apply stock-level overrides from [ui.level_colors]
        for (level, value) in &ui.level_colors {
            if let Some(color) = parse_hex_color(value) {
                match level.as_str() {
                    "enough" => theme.enough = color,
                    "half" => theme.half = color,
                    "empty" => theme.empty = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Get the color for a stock level
    pub fn level_color(&self, level: StockLevel) -> Color {
        match level {
            StockLevel::Enough => self.enough,
            StockLevel::Half => self.half,
            StockLevel::Empty => self.empty,
        }
    }
}
