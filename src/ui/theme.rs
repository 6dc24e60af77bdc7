//! Colour palette and text styles used across the UI.
//!
//! Ruler colours are user-configurable and live in [`RulerStyle`]; the
//! surrounding chrome uses the fixed [`Theme`].

use ratatui::style::{Color, Modifier, Style};

use crate::config::RulerConfig;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── readout ────────────────────────────────────────────────
    pub fn value_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn motion_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error_style() -> Style {
        Style::default()
            .bg(Color::Red)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// Styles for the ruler itself, built from the user's configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerStyle {
    pub tick: Style,
    pub major_tick: Style,
    pub label: Style,
    pub indicator: Style,
}

impl RulerStyle {
    pub fn from_config(config: &RulerConfig) -> Self {
        let mut label = Style::default().fg(config.label_color);
        if config.label_bold {
            label = label.add_modifier(Modifier::BOLD);
        }
        Self {
            tick: Style::default().fg(config.tick_color),
            major_tick: Style::default()
                .fg(config.tick_color)
                .add_modifier(Modifier::BOLD),
            label,
            indicator: Style::default()
                .fg(config.indicator_color)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self::from_config(&RulerConfig::default())
    }
}
