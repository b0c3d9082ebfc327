//! Color themes expressed as design tokens.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Rgba;
use crate::style::parse_named;

/// Named color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    /// Violet and teal, the default.
    #[default]
    Aurora,
    Ocean,
    Ember,
    Mono,
}

/// Resolved tokens that the renderers read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Canvas clear color.
    pub background: Rgba,
    /// Color used for network edges and node cores.
    pub accent: Rgba,
    /// Center of the particle hue band, in degrees.
    pub hue_base: f32,
    /// Half-width of the particle hue band, in degrees.
    pub hue_spread: f32,
    /// HSL saturation for particle colors.
    pub saturation: f32,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 4] = [
        ColorTheme::Aurora,
        ColorTheme::Ocean,
        ColorTheme::Ember,
        ColorTheme::Mono,
    ];

    pub fn next(self) -> Self {
        match self {
            ColorTheme::Aurora => ColorTheme::Ocean,
            ColorTheme::Ocean => ColorTheme::Ember,
            ColorTheme::Ember => ColorTheme::Mono,
            ColorTheme::Mono => ColorTheme::Aurora,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Aurora => "aurora",
            ColorTheme::Ocean => "ocean",
            ColorTheme::Ember => "ember",
            ColorTheme::Mono => "mono",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ColorTheme::Aurora => Palette {
                background: Rgba::from_u8(8, 6, 20),
                accent: Rgba::from_u8(120, 220, 232),
                hue_base: 265.0,
                hue_spread: 45.0,
                saturation: 0.8,
            },
            ColorTheme::Ocean => Palette {
                background: Rgba::from_u8(2, 12, 24),
                accent: Rgba::from_u8(100, 180, 255),
                hue_base: 200.0,
                hue_spread: 25.0,
                saturation: 0.75,
            },
            ColorTheme::Ember => Palette {
                background: Rgba::from_u8(18, 6, 4),
                accent: Rgba::from_u8(255, 170, 90),
                hue_base: 20.0,
                hue_spread: 20.0,
                saturation: 0.9,
            },
            ColorTheme::Mono => Palette {
                background: Rgba::from_u8(10, 10, 10),
                accent: Rgba::from_u8(220, 220, 220),
                hue_base: 0.0,
                hue_spread: 0.0,
                saturation: 0.0,
            },
        }
    }
}

impl FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(s, &Self::ALL, |v| v.name())
    }
}
