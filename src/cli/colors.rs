//! To maintain a theme of colors, colors live here as constants so
//! the UI does not look bad at any point.
//!
//! - RELA_BLUE: Main Color

use colored::Color;

pub(crate) const RELA_BLUE: Color = Color::TrueColor {
    r: 87,
    g: 140,
    b: 255,
};
