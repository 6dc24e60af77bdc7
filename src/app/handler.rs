//! Input handling — maps key/mouse events to ruler and host-screen mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::{self, AppLayout};

use super::state::{ActiveView, AppState};

/// Longest accepted value input; anything longer is not a sensible number.
const MAX_INPUT_LEN: usize = 16;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.needs_redraw = true;

    match state.active_view {
        ActiveView::Ruler => handle_ruler_key(state, key, now),
        ActiveView::Help => handle_help_key(state, key),
    }
}

// ── Ruler view (configurable bindings) ──────────────────────────

fn handle_ruler_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // The value input takes plain number characters before any binding.
    if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                if state.input.len() < MAX_INPUT_LEN {
                    state.input.push(c);
                }
                return;
            }
            KeyCode::Backspace => {
                state.input.pop();
                return;
            }
            _ => {}
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleHelp => state.active_view = ActiveView::Help,
        Action::StepLeft => step(state, -1, now),
        Action::StepRight => step(state, 1, now),
        Action::JumpMin => {
            let min = state.ruler.scale().min() as f64 / 10.0;
            apply_value(state, min, now);
        }
        Action::JumpMax => {
            let max = state.ruler.scale().max() as f64 / 10.0;
            apply_value(state, max, now);
        }
        Action::Apply => apply_input(state, now),
        Action::ClearInput => {
            state.input.clear();
            state.clear_status();
        }
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.active_view = ActiveView::Ruler;
        return;
    }
    match state.config.match_key(key) {
        Some(Action::ToggleHelp) => state.active_view = ActiveView::Ruler,
        Some(Action::Quit) => state.should_quit = true,
        _ => {}
    }
}

/// Parse the typed value and scroll to it.  Empty input is ignored.
fn apply_input(state: &mut AppState, now: Instant) {
    let text = state.input.trim();
    if text.is_empty() {
        return;
    }
    match text.parse::<f64>() {
        Ok(value) => {
            apply_value(state, value, now);
        }
        Err(_) => {
            let message = format!("not a number: {text:?}");
            state.set_error(message);
        }
    }
}

fn apply_value(state: &mut AppState, value: f64, now: Instant) {
    match state.ruler.set_current_value(value, now) {
        Ok(()) => {
            state.input.clear();
            state.set_status(format!("scrolling to {value:.1}"));
        }
        Err(err) => {
            tracing::warn!("rejected value: {err}");
            state.set_error(err.to_string());
        }
    }
}

/// Move the selection by `ticks` tenths, stopping at the ends of the scale.
fn step(state: &mut AppState, ticks: i64, now: Instant) {
    let scale = *state.ruler.scale();
    let current = (state.ruler.current_value() * 10.0).round() as i64;
    let target = (current + ticks).clamp(scale.min(), scale.max());
    if target != current {
        apply_value(state, target as f64 / 10.0, now);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  Presses inside the ruler start a gesture; the
/// gesture keeps receiving moves even when the pointer leaves the ruler.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Ruler {
        return;
    }

    let ruler_area = AppLayout::from_area(state.terminal_area).ruler_inner();
    let x = f64::from(mouse.column);
    let y = f64::from(mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout::contains(ruler_area, mouse.column, mouse.row) {
                state.ruler.pointer_down(x, y, now);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => state.ruler.pointer_move(x, y, now),
        MouseEventKind::Up(MouseButton::Left) => state.ruler.pointer_up(x, y, now),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            if layout::contains(ruler_area, mouse.column, mouse.row) {
                step(state, -1, now);
                state.needs_redraw = true;
            }
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            if layout::contains(ruler_area, mouse.column, mouse.row) {
                step(state, 1, now);
                state.needs_redraw = true;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::layout::Rect;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::motion::MotionState;

    fn state() -> AppState {
        let mut state = AppState::new(AppConfig::default()).unwrap();
        state.terminal_area = Rect::new(0, 0, 80, 24);
        state
    }

    fn press(state: &mut AppState, code: KeyCode, now: Instant) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    fn type_text(state: &mut AppState, text: &str, now: Instant) {
        for c in text.chars() {
            press(state, KeyCode::Char(c), now);
        }
    }

    fn mouse(state: &mut AppState, kind: MouseEventKind, column: u16, now: Instant) {
        let event = MouseEvent {
            kind,
            column,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(state, event, now);
    }

    fn settle(state: &mut AppState, mut now: Instant) {
        while state.ruler.compute_scroll(now) {
            now += Duration::from_millis(16);
        }
    }

    #[test]
    fn typed_value_is_applied_on_enter() {
        let mut s = state();
        let now = Instant::now();
        type_text(&mut s, "12.3", now);
        assert_eq!(s.input, "12.3");
        press(&mut s, KeyCode::Enter, now);
        assert!(s.input.is_empty());
        assert!(!s.status_is_error);
        assert_eq!(s.ruler.state(), MotionState::Flinging);
        settle(&mut s, now);
        assert_eq!(s.ruler.formatted_value(), "12.3");
    }

    #[test]
    fn out_of_range_value_reports_an_error() {
        let mut s = state();
        let now = Instant::now();
        type_text(&mut s, "3", now);
        press(&mut s, KeyCode::Enter, now);
        assert!(s.status_is_error);
        assert!(s.status_message.as_deref().unwrap().contains("out of range"));
        // The input is kept so it can be corrected.
        assert_eq!(s.input, "3");
        assert_eq!(s.ruler.state(), MotionState::Idle);
    }

    #[test]
    fn garbage_input_is_not_a_number() {
        let mut s = state();
        let now = Instant::now();
        type_text(&mut s, "1.2.3", now);
        press(&mut s, KeyCode::Enter, now);
        assert!(s.status_is_error);
        press(&mut s, KeyCode::Esc, now);
        assert!(s.input.is_empty());
        assert!(s.status_message.is_none());
    }

    #[test]
    fn backspace_edits_input() {
        let mut s = state();
        let now = Instant::now();
        type_text(&mut s, "42", now);
        press(&mut s, KeyCode::Backspace, now);
        assert_eq!(s.input, "4");
    }

    #[test]
    fn step_keys_move_one_tick_and_stop_at_the_end() {
        let mut s = state();
        let now = Instant::now();
        // Default config starts at the maximum.
        press(&mut s, KeyCode::Right, now);
        assert_eq!(s.ruler.state(), MotionState::Idle);
        press(&mut s, KeyCode::Left, now);
        settle(&mut s, now);
        assert_eq!(s.ruler.formatted_value(), "49.9");
        press(&mut s, KeyCode::Home, now);
        settle(&mut s, now);
        assert_eq!(s.ruler.formatted_value(), "10.0");
    }

    #[test]
    fn dragging_the_ruler_scrolls_it() {
        let mut s = state();
        let now = Instant::now();
        let start = s.ruler.offset();
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 40, now);
        mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), 45, now + Duration::from_millis(30));
        // Dragging right pulls lower values under the indicator.
        assert_eq!(s.ruler.offset(), start - 5.0);
        assert_eq!(s.ruler.state(), MotionState::Dragging);
    }

    #[test]
    fn presses_outside_the_ruler_are_ignored() {
        let mut s = state();
        let now = Instant::now();
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut s, event, now);
        assert_eq!(s.ruler.state(), MotionState::Idle);
    }

    #[test]
    fn help_overlay_swallows_ruler_input() {
        let mut s = state();
        let now = Instant::now();
        press(&mut s, KeyCode::Char('?'), now);
        assert_eq!(s.active_view, ActiveView::Help);
        type_text(&mut s, "12", now);
        assert!(s.input.is_empty());
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 40, now);
        assert_eq!(s.ruler.state(), MotionState::Idle);
        press(&mut s, KeyCode::Esc, now);
        assert_eq!(s.active_view, ActiveView::Ruler);
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        press(&mut s, KeyCode::Char('q'), Instant::now());
        assert!(s.should_quit);

        let mut s = state();
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(s.should_quit);
    }
}
