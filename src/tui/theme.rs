use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Dialog accent colors keyed by class name (`ModalConfig::custom_class`)
    pub class_colors: HashMap<String, Color>,
    pub category_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let red = Color::Rgb(0xFF, 0x44, 0x44);
        let cyan = Color::Rgb(0x44, 0xDD, 0xFF);
        let yellow = Color::Rgb(0xFF, 0xD7, 0x00);

        let mut class_colors = HashMap::new();
        class_colors.insert("danger".into(), red);
        class_colors.insert("info".into(), cyan);
        class_colors.insert("warning".into(), yellow);

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red,
            yellow,
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan,
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            border: Color::Rgb(0x7D, 0x78, 0xBF),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            class_colors,
            category_colors: HashMap::new(),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "selection_bg" => theme.selection_bg = color,
                "border" => theme.border = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                other => {
                    // Anything else names a dialog class
                    theme.class_colors.insert(other.to_string(), color);
                }
            }
        }

        for (category, value) in &ui.category_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.category_colors.insert(category.clone(), color);
            }
        }

        theme
    }

    /// Border color for a dialog, honoring its custom class
    pub fn dialog_border(&self, class: Option<&str>) -> Color {
        class
            .and_then(|c| self.class_colors.get(c).copied())
            .unwrap_or(self.highlight)
    }

    pub fn category_color(&self, category: &str) -> Color {
        self.category_colors
            .get(category)
            .copied()
            .unwrap_or(self.cyan)
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.green,
        }
    }
}
