//! Moss & Ember palette for the roller.
//!
//! Truecolor RGB throughout. Views take colors and styles from here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Moss green, focused borders and headings.
pub const MOSS: Color = Color::Rgb(0x5B, 0x8C, 0x4A);
/// Lighter moss for secondary emphasis.
pub const MOSS_LIGHT: Color = Color::Rgb(0x9C, 0xC0, 0x7A);
/// Ember, the rolled name and the current selection.
pub const EMBER: Color = Color::Rgb(0xE0, 0x8A, 0x3C);
/// Parchment, badge background.
pub const PARCHMENT: Color = Color::Rgb(0xF2, 0xE6, 0xC9);

pub const INK: Color = Color::Rgb(0xE8, 0xE2, 0xD4);
pub const INK_FADED: Color = Color::Rgb(0x9A, 0x93, 0x85);
pub const INK_DIM: Color = Color::Rgb(0x5E, 0x59, 0x50);

// Notification levels
pub const ERROR: Color = Color::Rgb(0xD9, 0x4F, 0x3D);
pub const SUCCESS: Color = Color::Rgb(0x7F, 0xB0, 0x69);
pub const INFO: Color = Color::Rgb(0x6F, 0xA3, 0xC7);

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn heading() -> Style {
    Style::default().fg(MOSS).add_modifier(Modifier::BOLD)
}

/// The composed display name of a roll.
pub fn rolled_name() -> Style {
    Style::default().fg(EMBER).add_modifier(Modifier::BOLD)
}

/// Left-hand label of a detail row ("Height", "Build").
pub fn label() -> Style {
    Style::default().fg(INK_FADED)
}

pub fn body() -> Style {
    Style::default().fg(INK)
}

pub fn selected() -> Style {
    Style::default()
        .fg(EMBER)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

pub fn key_hint() -> Style {
    Style::default().fg(INK_DIM)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(PARCHMENT)
        .add_modifier(Modifier::BOLD)
}

// ── Blocks ──────────────────────────────────────────────────────────────────

/// Rounded block for the pane that takes input.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MOSS))
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(INK_DIM))
}
