//! Color themes.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Available themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Neon,
    Light,
}

/// Resolved colors for a theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub branch: Color,
    pub leaf: Color,
    pub selected_bg: Color,
    pub danger: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

impl Theme {
    /// Next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::Dark => Theme::Neon,
            Theme::Neon => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Neon => "neon",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: rgb(15, 23, 42),
                text: rgb(226, 232, 240),
                muted: rgb(100, 116, 139),
                branch: rgb(52, 152, 255),
                leaf: rgb(148, 163, 184),
                selected_bg: rgb(30, 64, 175),
                danger: rgb(255, 77, 79),
            },
            Theme::Neon => Palette {
                background: rgb(0, 0, 0),
                text: rgb(0, 255, 65),
                muted: rgb(0, 143, 17),
                branch: rgb(0, 255, 65),
                leaf: rgb(0, 200, 50),
                selected_bg: rgb(0, 59, 0),
                danger: rgb(255, 0, 60),
            },
            Theme::Light => Palette {
                background: rgb(248, 250, 252),
                text: rgb(15, 23, 42),
                muted: rgb(148, 163, 184),
                branch: rgb(52, 152, 255),
                leaf: rgb(100, 116, 139),
                selected_bg: rgb(191, 219, 254),
                danger: rgb(220, 38, 38),
            },
        }
    }
}

/// Parses `#rrggbb` (or `rrggbb`) into a terminal color.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(rgb(channel(0)?, channel(2)?, channel(4)?))
}
