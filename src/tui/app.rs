use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use rand::rngs::StdRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::theme;
use super::views::catalog::{CatalogResult, CatalogViewState};
use super::views::roller::RollerViewState;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused view.
    pub focus: Focus,
    /// Location list, result and debug panel.
    pub roller: RollerViewState,
    /// Catalog browser state.
    pub catalog: CatalogViewState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Source of randomness for every roll.
    rng: StdRng,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        services: Services,
        rng: StdRng,
        show_debug: bool,
    ) -> Self {
        let roller = RollerViewState::new(services.state.location_names(), show_debug);
        Self {
            running: true,
            focus: Focus::Roller,
            roller,
            catalog: CatalogViewState::new(),
            notifications: Vec::new(),
            show_help: false,
            rng,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        self.roll_startup();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    /// Roll the first location so the screen is never empty at startup.
    pub fn roll_startup(&mut self) {
        let Some(first) = self.services.state.first_location().map(str::to_string) else {
            log::warn!("Location table is empty, nothing to roll");
            return;
        };
        self.roller
            .roll_location(&first, &self.services.state, &mut self.rng);
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Focused view
                let consumed = self.dispatch_view_input(&crossterm_event);
                if consumed {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::CatalogReady(catalog) => {
                self.push_notification(
                    format!("Catalog ready: {} ancestries", catalog.len()),
                    NotificationLevel::Success,
                );
                self.catalog.set_catalog(catalog);
            }
            AppEvent::CatalogFailed(message) => {
                self.push_notification("Catalog build failed".to_string(), NotificationLevel::Error);
                self.catalog.set_failed(message);
            }
            AppEvent::ExportDone(paths) => {
                let names: Vec<String> = paths
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect();
                self.push_notification(
                    format!("Exported {}", names.join(", ")),
                    NotificationLevel::Success,
                );
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Roller => {
                self.roller
                    .handle_input(event, &self.services.state, &mut self.rng)
            }
            Focus::Catalog => match self.catalog.handle_input(event) {
                Some(CatalogResult::Consumed) => true,
                Some(CatalogResult::Close) => {
                    self.handle_action(Action::CloseCatalog);
                    true
                }
                Some(CatalogResult::Export) => {
                    self.handle_action(Action::ExportCatalog);
                    true
                }
                None => false,
            },
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        // Global keybindings (always active when no modal or view consumes)
        match (modifiers, code) {
            // Ctrl+C → quit
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('d') => Some(Action::ToggleDebug),
                KeyCode::Char('c') => Some(Action::ShowCatalog),
                KeyCode::Char('e') => Some(Action::ExportCatalog),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleDebug => self.roller.toggle_debug(),
            Action::ShowCatalog => {
                self.focus = Focus::Catalog;
                if self.catalog.begin_loading() {
                    self.services.request_catalog();
                }
            }
            Action::CloseCatalog => self.focus = Focus::Roller,
            Action::ExportCatalog => match self.catalog.catalog() {
                Some(catalog) => self.services.export_catalog(catalog.clone()),
                None => {
                    // Export needs the catalog; open the view and build it first.
                    self.handle_action(Action::ShowCatalog);
                    self.push_notification(
                        "Catalog not built yet, press e again when ready".to_string(),
                        NotificationLevel::Info,
                    );
                }
            },
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notifications.push(Notification {
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match self.focus {
            Focus::Roller => {
                let layout = AppLayout::compute(area, self.roller.show_debug);
                if let Some(list_area) = layout.locations {
                    self.roller.render_locations(frame, list_area);
                }
                self.roller.render_result(frame, layout.main);
                if let Some(debug_area) = layout.debug {
                    self.roller.render_debug(frame, debug_area);
                }
                self.render_status_bar(frame, layout.status);
            }
            Focus::Catalog => {
                let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
                self.catalog.render(frame, rows[0]);
                self.render_status_bar(frame, rows[1]);
            }
        }

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.focus {
            Focus::Roller => &[
                ("Enter", ":roll "),
                ("d", ":details "),
                ("c", ":catalog "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Focus::Catalog => &[
                ("Tab", ":pane "),
                ("e", ":export "),
                ("Esc", ":back "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(" ANCESTRY ROLLER ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::MOSS_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(*key, theme::key_hint()));
            spans.push(Span::raw(*label));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 70, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q / Ctrl+C", "Quit application"),
            ("?", "Toggle this help"),
            ("d", "Toggle Rolled Details panel"),
            ("c", "Open ancestry catalog"),
            ("e", "Export catalog and template"),
            ("", ""),
            ("Roller:", ""),
            ("j/k / Up/Down", "Select location"),
            ("Enter / r", "Roll selected location"),
            ("PgUp/PgDn", "Scroll Rolled Details"),
            ("", ""),
            ("Catalog:", ""),
            ("Tab", "Switch ancestries / template"),
            ("j/k", "Scroll"),
            ("e", "Write ancestries.json and location-template.json"),
            ("Esc / c", "Back to roller"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                theme::heading(),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    theme::heading(),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<22}", key),
                        Style::default().fg(theme::MOSS_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::EMBER));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
