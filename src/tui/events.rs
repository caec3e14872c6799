use std::path::PathBuf;

use crate::core::ancestry_gen::Catalog;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The merged catalog finished building.
    CatalogReady(Catalog),
    /// Catalog build failed (blocklist, index or core races unavailable).
    CatalogFailed(String),
    /// Catalog export wrote these files.
    ExportDone(Vec<PathBuf>),
    /// Notification to display to the user.
    Notification(Notification),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleDebug,
    ShowCatalog,
    CloseCatalog,
    ExportCatalog,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Which view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Roller,
    Catalog,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Roller => "Roller",
            Focus::Catalog => "Catalog",
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Notification for the event channel; the app sets the TTL on display.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            ttl_ticks: 0,
        }
    }
}
