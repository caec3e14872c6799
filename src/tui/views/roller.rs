//! Roller view: location list, rolled result and the "Rolled Details" panel.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::ancestry_gen::{GeneratedResult, RollerState};

// ── State ──────────────────────────────────────────────────────────────────

pub struct RollerViewState {
    locations: Vec<String>,
    selected: usize,
    result: Option<GeneratedResult>,
    last_error: Option<String>,
    pub show_debug: bool,
    debug_scroll: u16,
}

impl RollerViewState {
    pub fn new(locations: Vec<String>, show_debug: bool) -> Self {
        Self {
            locations,
            selected: 0,
            result: None,
            last_error: None,
            show_debug,
            debug_scroll: 0,
        }
    }

    pub fn selected_location(&self) -> Option<&str> {
        self.locations.get(self.selected).map(String::as_str)
    }

    pub fn result(&self) -> Option<&GeneratedResult> {
        self.result.as_ref()
    }

    pub fn toggle_debug(&mut self) {
        self.show_debug = !self.show_debug;
        self.debug_scroll = 0;
    }

    /// Roll the highlighted location.
    pub fn roll_selected<R>(&mut self, state: &RollerState, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if let Some(location) = self.selected_location().map(str::to_string) {
            self.roll_location(&location, state, rng);
        }
    }

    /// Roll `location`. An unknown location leaves the display untouched.
    pub fn roll_location<R>(&mut self, location: &str, state: &RollerState, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match state.generate(location, rng) {
            Ok(result) => {
                self.result = Some(result);
                self.last_error = None;
                self.debug_scroll = 0;
            }
            Err(e) if e.is_recoverable() => {
                log::info!("Ignoring roll request: {}", e);
            }
            Err(e) => {
                log::warn!("Roll for {} failed: {}", location, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn handle_input<R>(&mut self, event: &Event, state: &RollerState, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                if self.selected + 1 < self.locations.len() {
                    self.selected += 1;
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('r')) => {
                self.roll_selected(state, rng);
                true
            }
            (KeyModifiers::NONE, KeyCode::PageDown) if self.show_debug => {
                self.debug_scroll = self.debug_scroll.saturating_add(5);
                true
            }
            (KeyModifiers::NONE, KeyCode::PageUp) if self.show_debug => {
                self.debug_scroll = self.debug_scroll.saturating_sub(5);
                true
            }
            _ => false,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render_locations(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Locations");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line<'static>> = self
            .locations
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let is_selected = i == self.selected;
                let marker = if is_selected { "\u{25b8} " } else { "  " };
                let style = if is_selected {
                    theme::selected()
                } else {
                    theme::body()
                };
                Line::from(Span::styled(format!("{marker}{name}"), style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    pub fn render_result(&self, frame: &mut Frame, area: Rect) {
        let title = match self.selected_location() {
            Some(location) => format!("Roll: {location}"),
            None => "Roll".to_string(),
        };
        let block = theme::block_default(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line<'static>> = vec![Line::raw("")];

        match &self.result {
            Some(result) => {
                lines.push(Line::from(Span::styled(
                    format!("  {}", result.display_name),
                    theme::rolled_name(),
                )));
                lines.push(Line::raw(""));
                section_header(&mut lines, "TRAITS");
                lines.push(detail_line("Height", &result.height));
                lines.push(detail_line("Build", &result.build));
                lines.push(detail_line("Skin tone", &result.skintone));
                lines.push(Line::raw(""));
                section_header(&mut lines, "FEATURES");
                lines.push(detail_line("They", &result.features[0]));
                lines.push(detail_line("and", &result.features[1]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "  Nothing rolled yet",
                    theme::label(),
                )));
            }
        }

        if let Some(ref error) = self.last_error {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme::ERROR),
            )));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  [Enter] roll  [j/k] location  [d] details  [c] catalog",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    pub fn render_debug(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Rolled Details");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = self
            .result
            .as_ref()
            .map(|r| r.trace.to_string())
            .unwrap_or_default();
        let lines: Vec<Line<'static>> = text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme::body())))
            .collect();

        frame.render_widget(
            Paragraph::new(lines).scroll((self.debug_scroll, 0)),
            inner,
        );
    }
}

fn section_header(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(format!("  {title}"), theme::heading())));
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", label),
            theme::label(),
        ),
        Span::styled(value.to_string(), theme::body()),
    ])
}

// ── Tests ──────────────────────────────────────────────────────────────────
