//! Colour themes.
//!
//! The selected theme is persisted in [`crate::Config`] and tints the tree
//! output.
use std::fmt;

use console::Color;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
    Forest,
    Ocean,
    Sunset,
}

const ALL_THEMES: [Theme; 6] = [
    Theme::Light,
    Theme::Dark,
    Theme::Sepia,
    Theme::Forest,
    Theme::Ocean,
    Theme::Sunset,
];

impl Theme {
    /// All themes in cycling order.
    pub fn all() -> &'static [Theme] {
        &ALL_THEMES
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Sepia => "Sepia",
            Theme::Forest => "Forest",
            Theme::Ocean => "Ocean",
            Theme::Sunset => "Sunset",
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Theme {
        let position = ALL_THEMES.iter().position(|t| *t == self).unwrap_or(0);
        ALL_THEMES[(position + 1) % ALL_THEMES.len()]
    }

    /// Accent colour for directory names.
    pub fn accent(self) -> Color {
        match self {
            Theme::Light => Color::Blue,
            Theme::Dark => Color::Cyan,
            Theme::Sepia => Color::Color256(136),
            Theme::Forest => Color::Green,
            Theme::Ocean => Color::Color256(37),
            Theme::Sunset => Color::Color256(208),
        }
    }

    /// Colour for muted text such as timestamps.
    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Sepia | Theme::Sunset => Color::Yellow,
            _ => Color::Black,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_every_theme_and_wraps() {
        let mut theme = Theme::default();
        let mut seen = vec![theme];
        for _ in 1..Theme::all().len() {
            theme = theme.next();
            seen.push(theme);
        }
        assert_eq!(seen, Theme::all());
        assert_eq!(Theme::Sunset.next(), Theme::Light);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Forest).unwrap(), "\"forest\"");
        let theme: Theme = serde_json::from_str("\"ocean\"").unwrap();
        assert_eq!(theme, Theme::Ocean);
    }
}
