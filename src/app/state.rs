//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::core::{error::RulerError, ruler::Ruler};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Ruler,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// The ruler control.
    pub ruler: Ruler,
    /// Latest value published by the ruler's observer.
    pub value: watch::Receiver<String>,
    /// Text typed into the value input.
    pub input: String,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// `true` when `status_message` reports a failure.
    pub status_is_error: bool,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User configuration.
    pub config: AppConfig,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Set by event handlers when the screen must be redrawn.
    pub needs_redraw: bool,
}

impl AppState {
    /// Build the ruler from `config` and wire its observer to `value`.
    pub fn new(config: AppConfig) -> Result<Self, RulerError> {
        let ruler_config = &config.ruler;
        let mut ruler = Ruler::new(
            ruler_config.scale()?,
            ruler_config.current_number,
            ruler_config.motion(),
        )?;
        let (tx, value) = watch::channel(ruler.formatted_value());
        ruler.set_value_observer(Some(Box::new(tx)));

        Ok(Self {
            ruler,
            value,
            input: String::new(),
            should_quit: false,
            status_message: None,
            status_is_error: false,
            active_view: ActiveView::default(),
            config,
            terminal_area: Rect::default(),
            needs_redraw: true,
        })
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }
}
