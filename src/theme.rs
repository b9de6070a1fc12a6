//! Light/dark theme and the colors each one paints with.
//! The host picks the theme; the simulation never looks it up itself.

use std::str::FromStr;

/// Host UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: gray(255),
                ink: gray(0),
                scenery: gray(190),
                floor: gray(220),
            },
            Theme::Dark => Palette {
                background: gray(0),
                ink: gray(255),
                scenery: gray(60),
                floor: gray(40),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Case-insensitive theme name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("unknown theme {s:?}")),
        }
    }
}

/// RGBA colors packed as u32 (0xRRGGBBAA).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    /// Cat, toys and reaction text.
    pub ink: u32,
    /// Decorative text blocks.
    pub scenery: u32,
    pub floor: u32,
}

/// Opaque gray of the given level.
fn gray(level: u8) -> u32 {
    let l = level as u32;
    l << 24 | l << 16 | l << 8 | 0xFF
}
