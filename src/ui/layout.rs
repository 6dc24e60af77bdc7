//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows the ruler needs inside its border: baseline, two tick rows, labels.
pub const RULER_ROWS: u16 = 4;

/// Primary screen layout: ruler pane, value readout, input line, status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub ruler_area: Rect,
    pub value_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(RULER_ROWS + 2), // ruler inside a bordered block
                Constraint::Length(1),              // value readout
                Constraint::Length(1),              // value input
                Constraint::Min(0),                 // spare space
                Constraint::Length(1),              // status bar
            ])
            .split(area);

        Self {
            ruler_area: chunks[0],
            value_area: chunks[1],
            input_area: chunks[2],
            status_area: chunks[4],
        }
    }

    /// The ruler's drawing surface inside its border.
    pub fn ruler_inner(&self) -> Rect {
        Rect {
            x: self.ruler_area.x.saturating_add(1),
            y: self.ruler_area.y.saturating_add(1),
            width: self.ruler_area.width.saturating_sub(2),
            height: self.ruler_area.height.saturating_sub(2),
        }
    }
}

/// Is the cell at (`col`, `row`) inside `area`?
pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && row >= area.y
        && col < area.x.saturating_add(area.width)
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_regions_top_to_bottom() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.ruler_area, Rect::new(0, 0, 80, 6));
        assert_eq!(layout.value_area.y, 6);
        assert_eq!(layout.input_area.y, 7);
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.ruler_inner(), Rect::new(1, 1, 78, 4));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(contains(r, 2, 3));
        assert!(contains(r, 5, 4));
        assert!(!contains(r, 6, 4));
        assert!(!contains(r, 5, 5));
        assert!(!contains(r, 1, 3));
    }
}
