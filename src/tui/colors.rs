//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Status, TagColor};

/// Focused form field and selected column border.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Card background.
pub const CARD_BG: Color = Color::Rgb(26, 26, 26);
/// Status bar when a change could not be saved.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Terminal colour for a tag's palette token.
pub fn tag_color(color: TagColor) -> Color {
    match color {
        TagColor::Blue => Color::Rgb(59, 130, 246),
        TagColor::Green => Color::Rgb(34, 197, 94),
        TagColor::Purple => Color::Rgb(168, 85, 247),
        TagColor::Orange => Color::Rgb(249, 115, 22),
        TagColor::Red => Color::Rgb(239, 68, 68),
        TagColor::Yellow => Color::Rgb(234, 179, 8),
        TagColor::Pink => Color::Rgb(236, 72, 153),
        TagColor::Indigo => Color::Rgb(99, 102, 241),
    }
}

/// Accent used for a column's heading.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Gray,
        Status::Inprogress => Color::Cyan,
        Status::Done => Color::Green,
    }
}
