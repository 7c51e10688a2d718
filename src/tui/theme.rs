use ratatui::style::Color;

use crate::model::UiConfig;

/// Colors by role, named after the shadcn/ui tokens of the dark web theme.
/// Each field can be overridden from `[ui.colors]` under the same name.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Titles and typed text
    pub foreground: Color,
    /// Labels, open checkboxes, counts
    pub secondary: Color,
    /// Dates, descriptions, hints
    pub muted: Color,
    /// Header, focused input, key names
    pub primary: Color,
    /// Selected row
    pub accent: Color,
    /// Unfocused input frames
    pub border: Color,
    pub destructive: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // zinc dark with the blue primary
        Theme {
            background: Color::Rgb(0x09, 0x09, 0x0B),
            foreground: Color::Rgb(0xFA, 0xFA, 0xFA),
            secondary: Color::Rgb(0xD4, 0xD4, 0xD8),
            muted: Color::Rgb(0xA1, 0xA1, 0xAA),
            primary: Color::Rgb(0x3B, 0x82, 0xF6),
            accent: Color::Rgb(0x27, 0x27, 0x2A),
            border: Color::Rgb(0x3F, 0x3F, 0x46),
            destructive: Color::Rgb(0xEF, 0x44, 0x44),
            success: Color::Rgb(0x22, 0xC5, 0x5E),
        }
    }
}

/// `#rrggbb` to an RGB color. Anything else, including non-ASCII text, is None.
fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Theme from `[ui.colors]`, unknown keys and bad values ignored
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(slot) = theme.slot_mut(key) else {
                tracing::warn!(key = key.as_str(), "unknown color key");
                continue;
            };
            match parse_hex_color(value) {
                Some(color) => *slot = color,
                None => {
                    tracing::warn!(key = key.as_str(), value = value.as_str(), "ignoring invalid color")
                }
            }
        }
        theme
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "background" => &mut self.background,
            "foreground" => &mut self.foreground,
            "secondary" => &mut self.secondary,
            "muted" => &mut self.muted,
            "primary" => &mut self.primary,
            "accent" => &mut self.accent,
            "border" => &mut self.border,
            "destructive" => &mut self.destructive,
            "success" => &mut self.success,
            _ => return None,
        })
    }

    /// Title color: done tasks fade like the rest of their row
    pub fn title_color(&self, is_done: bool) -> Color {
        if is_done { self.muted } else { self.foreground }
    }
}
