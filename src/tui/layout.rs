//! Root layout computation for location list + result + debug panel + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the location list column.
pub const LOCATION_LIST_WIDTH: u16 = 24;
/// Hide the location list below this terminal width.
pub const HIDE_LIST_THRESHOLD: u16 = 40;
/// Put the debug panel beside the result at or above this width, below it otherwise.
pub const SIDE_BY_SIDE_THRESHOLD: u16 = 100;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Location list (None if hidden).
    pub locations: Option<Rect>,
    /// Roll result, or the whole catalog view.
    pub main: Rect,
    /// "Rolled Details" panel (None unless toggled on).
    pub debug: Option<Rect>,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect, show_debug: bool) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let (locations, content) = if area.width < HIDE_LIST_THRESHOLD {
            (None, content_area)
        } else {
            let cols = Layout::horizontal([
                Constraint::Length(LOCATION_LIST_WIDTH),
                Constraint::Min(1),
            ])
            .split(content_area);
            (Some(cols[0]), cols[1])
        };

        let (main, debug) = if !show_debug {
            (content, None)
        } else if area.width >= SIDE_BY_SIDE_THRESHOLD {
            let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(content);
            (cols[0], Some(cols[1]))
        } else {
            let rows = Layout::vertical([Constraint::Length(12), Constraint::Min(1)]).split(content);
            (rows[0], Some(rows[1]))
        };

        AppLayout {
            locations,
            main,
            debug,
            status,
        }
    }
}
