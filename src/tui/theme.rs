use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::widget::VerdictStyle;

/// Theme configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    // UI elements
    pub border: ColorValue,
    pub border_focused: ColorValue,
    pub header: ColorValue,
    pub status_bar: ColorValue,

    // Text colors
    pub text_primary: ColorValue,
    pub text_secondary: ColorValue,
    pub text_disabled: ColorValue,

    // Verdict colors
    pub verdict_real: ColorValue,
    pub verdict_fake: ColorValue,
    pub verdict_uncertain: ColorValue,

    // Status colors
    pub warning: ColorValue,
    pub error: ColorValue,
    pub info: ColorValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ColorValue {
    pub fn to_color(&self) -> Color {
        match self {
            ColorValue::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ColorValue::Named(name) => match name.as_str() {
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "white" => Color::White,
                "gray" | "grey" => Color::Gray,
                "dark_gray" | "dark_grey" => Color::DarkGray,
                _ => Color::White,
            },
        }
    }
}

fn named(name: &str) -> ColorValue {
    ColorValue::Named(name.to_string())
}

impl Theme {
    /// Create the default dark theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                border: named("dark_gray"),
                border_focused: named("cyan"),
                header: named("cyan"),
                status_bar: named("black"),

                text_primary: named("white"),
                text_secondary: named("gray"),
                text_disabled: named("dark_gray"),

                verdict_real: named("green"),
                verdict_fake: named("red"),
                verdict_uncertain: named("yellow"),

                warning: named("yellow"),
                error: named("red"),
                info: named("cyan"),
            },
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                border: ColorValue::Rgb {
                    r: 200,
                    g: 200,
                    b: 200,
                },
                border_focused: ColorValue::Rgb {
                    r: 0,
                    g: 100,
                    b: 200,
                },
                header: ColorValue::Rgb {
                    r: 0,
                    g: 100,
                    b: 200,
                },
                status_bar: ColorValue::Rgb {
                    r: 240,
                    g: 240,
                    b: 240,
                },

                text_primary: named("black"),
                text_secondary: ColorValue::Rgb {
                    r: 100,
                    g: 100,
                    b: 100,
                },
                text_disabled: ColorValue::Rgb {
                    r: 150,
                    g: 150,
                    b: 150,
                },

                verdict_real: ColorValue::Rgb {
                    r: 0,
                    g: 150,
                    b: 50,
                },
                verdict_fake: ColorValue::Rgb { r: 200, g: 0, b: 0 },
                verdict_uncertain: ColorValue::Rgb {
                    r: 200,
                    g: 150,
                    b: 0,
                },

                warning: ColorValue::Rgb {
                    r: 200,
                    g: 150,
                    b: 0,
                },
                error: ColorValue::Rgb { r: 200, g: 0, b: 0 },
                info: ColorValue::Rgb {
                    r: 0,
                    g: 150,
                    b: 200,
                },
            },
        }
    }

    /// Theme by config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                warn!("Unknown theme '{}', using dark", other);
                Self::dark()
            }
        }
    }

    /// Accent color for a verdict card
    pub fn verdict_color(&self, style: VerdictStyle) -> Color {
        match style {
            VerdictStyle::Real => self.colors.verdict_real.to_color(),
            VerdictStyle::Fake => self.colors.verdict_fake.to_color(),
            VerdictStyle::Uncertain => self.colors.verdict_uncertain.to_color(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
