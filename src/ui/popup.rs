//! Help overlay listing the active key bindings and the ruler's range.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

/// Read-only help popup.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + range line + 3 blanks + hint + 2 border
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered_fixed(48, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let label_style = Style::default().fg(Color::White);
        let key_style = Style::default().fg(Color::Yellow);
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![Line::raw("")];

        // Fixed-width columns: label left-aligned, keys right-aligned.
        for &action in Action::ALL {
            let label_col = format!("   {:<20}", action.label());
            let keys_width = (inner.width as usize).saturating_sub(label_col.len() + 1).max(1);
            let keys = self.config.display_bindings(action);
            lines.push(Line::from(vec![
                Span::styled(label_col, label_style),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }

        let ruler = &self.config.ruler;
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("   Range {} – {}, step 0.1", ruler.min_number, ruler.max_number),
            label_style,
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Drag or flick the ruler. Esc/?: close",
            dim,
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        assert_eq!(centered_fixed(10, 4, Rect::new(0, 0, 20, 10)), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(50, 50, Rect::new(2, 2, 20, 10)), Rect::new(2, 2, 20, 10));
    }

    #[test]
    fn lists_every_action() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        HelpPopup { config: &config }.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        for &action in Action::ALL {
            assert!(text.contains(action.label()), "missing {}", action.label());
        }
        assert!(text.contains("Range 10"));
    }
}
