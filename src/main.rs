//! A horizontally scrollable ruler slider for the terminal.
//!
//! Drag the scale with the mouse, flick it to let it coast, and it snaps to
//! the nearest tenth when it stops.  A value can also be typed and applied.
//! The TUI draws on stderr; the selected value is printed on stdout at exit
//! so the binary can be used from scripts (`v=$(ruler-tui)`).

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::ui::{
    layout::AppLayout,
    popup::HelpPopup,
    ruler_widget::RulerWidget,
    theme::{RulerStyle, Theme},
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scrollable ruler slider")]
struct Cli {
    /// Lowest value on the scale (whole units).
    #[arg(long, allow_negative_numbers = true)]
    min: Option<i64>,

    /// Highest value on the scale (whole units).
    #[arg(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// Initially selected value.
    #[arg(long, allow_negative_numbers = true)]
    value: Option<f64>,

    /// Columns between neighbouring ticks.
    #[arg(long)]
    gap: Option<f64>,

    /// Milliseconds between animation frames.
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut AppConfig) {
        let ruler = &mut config.ruler;
        if let Some(min) = self.min {
            ruler.min_number = min;
        }
        if let Some(max) = self.max {
            ruler.max_number = max;
        }
        if let Some(value) = self.value {
            ruler.current_number = value;
        }
        if let Some(gap) = self.gap {
            ruler.set_tick_gap(gap);
        }
        if let Some(frame_ms) = self.frame_ms {
            ruler.frame_ms = frame_ms.clamp(5, 200);
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Validate the scale before touching the terminal.
    let frame_interval = config.ruler.frame_interval();
    let mut state = AppState::new(config)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let events = spawn_event_reader(frame_interval);
    let result = run(&mut terminal, &mut state, events).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    println!("{}", state.ruler.formatted_value());
    Ok(())
}

/// Event loop: advance animations, redraw when asked, then wait for input.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    mut events: tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        state.ruler.compute_scroll(Instant::now());
        if state.ruler.take_redraw_request() {
            state.needs_redraw = true;
        }

        // Redraws are coalesced: at most one per loop turn.
        if state.needs_redraw {
            state.needs_redraw = false;
            terminal.draw(|frame| draw(frame, state))?;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k, Instant::now()),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m, Instant::now()),
            AppEvent::Resize(_, _) => state.needs_redraw = true,
            AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    state.terminal_area = area;
    let layout = AppLayout::from_area(area);

    let ruler_config = &state.config.ruler;
    let ruler_block = Block::default()
        .title(format!(
            " ruler {} – {} ",
            ruler_config.min_number, ruler_config.max_number
        ))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let ruler_widget = RulerWidget::new(RulerStyle::from_config(ruler_config)).block(ruler_block);
    frame.render_stateful_widget(ruler_widget, layout.ruler_area, &mut state.ruler);

    // The render above has just published into the watch channel.
    let value = state.value.borrow_and_update().clone();
    let mut readout = Line::from(vec![
        Span::raw(" Value: "),
        Span::styled(value, Theme::value_style()),
    ]);
    let motion = state.ruler.state().label();
    if !motion.is_empty() {
        readout.push_span(Span::styled(format!("  ({motion})"), Theme::motion_style()));
    }
    frame.render_widget(Paragraph::new(readout), layout.value_area);

    let input = Line::from(vec![
        Span::raw(" Set value: "),
        Span::styled(format!("{}▏", state.input), Theme::input_style()),
    ]);
    frame.render_widget(Paragraph::new(input), layout.input_area);

    let hint = state.config.status_bar_hint();
    let (status_text, status_style) = match (&state.status_message, state.status_is_error) {
        (Some(message), true) => (message.as_str(), Theme::error_style()),
        (Some(message), false) => (message.as_str(), Theme::status_bar_style()),
        (None, _) => (hint.as_str(), Theme::status_bar_style()),
    };
    frame.render_widget(Paragraph::new(status_text).style(status_style), layout.status_area);

    if state.active_view == ActiveView::Help {
        frame.render_widget(HelpPopup { config: &state.config }, area);
    }
}
