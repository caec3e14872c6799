/// Ancestry Roller - random ancestry and trait rolls for tabletop games (TUI Edition)
///
/// Core library providing weighted location tables, archetype resolution,
/// homebrew catalog merging and the terminal UI around them.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
