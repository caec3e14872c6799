//! Catalog view: sorted ancestry JSON and the location template.
//!
//! The catalog is built in the background the first time this view opens.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use crate::core::ancestry_gen::{catalog_json, template_json, Catalog};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pane {
    Ancestries,
    Template,
}

/// Outcome of catalog input the app has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResult {
    Consumed,
    Close,
    Export,
}

// ── State ──────────────────────────────────────────────────────────────────

pub struct CatalogViewState {
    status: CatalogStatus,
    catalog: Option<Catalog>,
    catalog_text: String,
    template_text: String,
    pane: Pane,
    scroll: u16,
}

impl CatalogViewState {
    pub fn new() -> Self {
        Self {
            status: CatalogStatus::Idle,
            catalog: None,
            catalog_text: String::new(),
            template_text: String::new(),
            pane: Pane::Ancestries,
            scroll: 0,
        }
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Mark a build as started. Returns false when nothing needs requesting.
    pub fn begin_loading(&mut self) -> bool {
        match self.status {
            CatalogStatus::Ready | CatalogStatus::Loading => false,
            CatalogStatus::Idle | CatalogStatus::Failed(_) => {
                self.status = CatalogStatus::Loading;
                true
            }
        }
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        match (catalog_json(&catalog), template_json(&catalog)) {
            (Ok(catalog_text), Ok(template_text)) => {
                self.catalog_text = catalog_text;
                self.template_text = template_text;
                self.catalog = Some(catalog);
                self.status = CatalogStatus::Ready;
                self.scroll = 0;
            }
            (Err(e), _) | (_, Err(e)) => self.set_failed(e.to_string()),
        }
    }

    pub fn set_failed(&mut self, message: String) {
        self.status = CatalogStatus::Failed(message);
    }

    pub fn handle_input(&mut self, event: &Event) -> Option<CatalogResult> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Char('c')) => Some(CatalogResult::Close),
            (KeyModifiers::NONE, KeyCode::Char('e')) => {
                if self.status == CatalogStatus::Ready {
                    Some(CatalogResult::Export)
                } else {
                    Some(CatalogResult::Consumed)
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                self.pane = match self.pane {
                    Pane::Ancestries => Pane::Template,
                    Pane::Template => Pane::Ancestries,
                };
                self.scroll = 0;
                Some(CatalogResult::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.scroll = self.scroll.saturating_add(1);
                Some(CatalogResult::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
                Some(CatalogResult::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::PageDown) => {
                self.scroll = self.scroll.saturating_add(20);
                Some(CatalogResult::Consumed)
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                self.scroll = self.scroll.saturating_sub(20);
                Some(CatalogResult::Consumed)
            }
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_pane(frame, chunks[0], Pane::Ancestries, "Ancestries", &self.catalog_text);
        self.render_pane(frame, chunks[1], Pane::Template, "Location Template", &self.template_text);
    }

    fn render_pane(&self, frame: &mut Frame, area: Rect, pane: Pane, title: &str, text: &str) {
        let focused = self.pane == pane;
        let block = if focused {
            theme::block_focused(title)
        } else {
            theme::block_default(title)
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line<'static>> = match &self.status {
            CatalogStatus::Idle | CatalogStatus::Loading => vec![Line::from(Span::styled(
                "  Building catalog...",
                theme::label(),
            ))],
            CatalogStatus::Failed(message) => vec![Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(theme::ERROR),
            ))],
            CatalogStatus::Ready => text
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), theme::body())))
                .collect(),
        };

        let scroll = if focused { self.scroll } else { 0 };
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }
}

impl Default for CatalogViewState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
