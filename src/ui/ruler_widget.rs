//! Custom Ratatui widget that draws a [`Ruler`]: baseline, ticks, labels and
//! the fixed center indicator.
//!
//! Rows inside the widget area, top to bottom:
//!
//! ```text
//! ──┬─┬─┬─┃─┬─┬──   baseline, indicator on top
//!   │ │ │ ┃ │ │     minor and major ticks
//!         ┃         major ticks only
//!        30         major labels
//! ```
//!
//! Rendering is also how the ruler reports its value: every draw ends with
//! [`Ruler::publish_value`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::core::{ruler::Ruler, scale::TickKind};

use super::theme::RulerStyle;

const BASELINE: &str = "─";
const TICK_ON_BASELINE: &str = "┬";
const MINOR_TICK: &str = "│";
const MAJOR_TICK: &str = "┃";
const INDICATOR: &str = "┃";

const BASELINE_ROW: u16 = 0;
const LABEL_ROW: u16 = 3;
/// Rows covered by the indicator; one longer than a major tick.
const INDICATOR_ROWS: u16 = 3;

/// The ruler widget — created fresh each frame.
pub struct RulerWidget<'a> {
    style: RulerStyle,
    block: Option<Block<'a>>,
}

impl<'a> RulerWidget<'a> {
    pub fn new(style: RulerStyle) -> Self {
        Self { style, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for RulerWidget<'a> {
    type State = Ruler;

    fn render(self, area: Rect, buf: &mut Buffer, ruler: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.width > 0 && inner.height > 0 {
            let canvas = Canvas { area: inner, buf };
            draw_scale(canvas, ruler, &self.style);
        }

        ruler.publish_value();
    }
}

fn draw_scale(mut canvas: Canvas<'_>, ruler: &Ruler, style: &RulerStyle) {
    let width = canvas.area.width;
    for col in 0..width {
        canvas.put(col, BASELINE_ROW, BASELINE, style.tick);
    }

    for tick in ruler.visible_ticks(f64::from(width)) {
        let Some(col) = canvas.column(tick.x) else {
            continue;
        };
        match tick.kind {
            TickKind::Minor => {
                canvas.put(col, BASELINE_ROW, TICK_ON_BASELINE, style.tick);
                canvas.put(col, 1, MINOR_TICK, style.tick);
            }
            TickKind::Major => {
                canvas.put(col, BASELINE_ROW, TICK_ON_BASELINE, style.major_tick);
                canvas.put(col, 1, MAJOR_TICK, style.major_tick);
                canvas.put(col, 2, MAJOR_TICK, style.major_tick);
            }
        }
        // Labels may hang off either edge when their tick is near it.
        if let Some(label) = tick.label() {
            canvas.put_centered(tick.x.floor() as i32, LABEL_ROW, &label, style.label);
        }
    }

    let center = width / 2;
    for row in 0..INDICATOR_ROWS {
        canvas.put(center, row, INDICATOR, style.indicator);
    }
}

/// Clipped drawing in widget-local coordinates.
struct Canvas<'b> {
    area: Rect,
    buf: &'b mut Buffer,
}

impl Canvas<'_> {
    /// Column for a horizontal position, if it falls inside the area.
    fn column(&self, x: f64) -> Option<u16> {
        let col = x.floor();
        (col >= 0.0 && col < f64::from(self.area.width)).then_some(col as u16)
    }

    fn put(&mut self, col: u16, row: u16, symbol: &str, style: Style) {
        if col >= self.area.width || row >= self.area.height {
            return;
        }
        self.buf[(self.area.x + col, self.area.y + row)]
            .set_symbol(symbol)
            .set_style(style);
    }

    /// Write `text` centered on column `center`, dropping cells that fall
    /// outside the area.
    fn put_centered(&mut self, center: i32, row: u16, text: &str, style: Style) {
        let text_width: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
        let mut col = center - (text_width / 2) as i32;
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            if let Ok(c) = u16::try_from(col) {
                self.put(c, row, ch.encode_utf8(&mut utf8), style);
            }
            col += ch.width().unwrap_or(0) as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::widgets::Borders;

    use super::*;
    use crate::core::motion::MotionConfig;
    use crate::core::scale::Scale;

    fn ruler(value: f64) -> Ruler {
        let scale = Scale::new(10, 50, 2.0).unwrap();
        Ruler::new(scale, value, MotionConfig::default()).unwrap()
    }

    fn draw(ruler: &mut Ruler, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        RulerWidget::new(RulerStyle::default()).render(area, &mut buf, ruler);
        buf
    }

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    #[test]
    fn draws_ticks_labels_and_indicator() {
        let mut r = ruler(30.0);
        let buf = draw(&mut r, Rect::new(0, 0, 21, 4));
        // Center of 21 columns is 10.5, so the indicator sits in column 10.
        for row in 0..3 {
            assert_eq!(symbol(&buf, 10, row), INDICATOR);
        }
        // Label for 30 is centered under the indicator.
        assert_eq!(symbol(&buf, 9, 3), "3");
        assert_eq!(symbol(&buf, 10, 3), "0");
        // Minor tick 29.6 sits four gaps left of the center, at x = 2.5.
        assert_eq!(symbol(&buf, 2, 0), TICK_ON_BASELINE);
        assert_eq!(symbol(&buf, 2, 1), MINOR_TICK);
        assert_eq!(symbol(&buf, 2, 2), " ");
        // Between ticks only the baseline is drawn.
        assert_eq!(symbol(&buf, 1, 0), BASELINE);
        assert_eq!(symbol(&buf, 1, 1), " ");
    }

    #[test]
    fn uses_configured_indicator_style() {
        let mut r = ruler(30.0);
        let buf = draw(&mut r, Rect::new(0, 0, 21, 4));
        assert_eq!(buf[(10, 1)].style().fg, RulerStyle::default().indicator.fg);
    }

    #[test]
    fn nothing_left_of_the_scale_start() {
        let mut r = ruler(10.0);
        let buf = draw(&mut r, Rect::new(0, 0, 20, 4));
        // Offset 0: the scale starts at the indicator (column 10).
        for col in 0..10 {
            assert_eq!(symbol(&buf, col, 0), BASELINE);
            assert_eq!(symbol(&buf, col, 1), " ");
        }
        assert_eq!(symbol(&buf, 9, 3), "1");
        assert_eq!(symbol(&buf, 10, 3), "0");
        assert_eq!(symbol(&buf, 12, 1), MINOR_TICK);
    }

    #[test]
    fn respects_the_block_border() {
        let mut r = ruler(30.0);
        let area = Rect::new(0, 0, 23, 6);
        let mut buf = Buffer::empty(area);
        RulerWidget::new(RulerStyle::default())
            .block(Block::default().borders(Borders::ALL))
            .render(area, &mut buf, &mut r);
        assert_eq!(symbol(&buf, 0, 0), "┌");
        // Inner area is 21 wide starting at column 1.
        assert_eq!(symbol(&buf, 11, 1), INDICATOR);
    }

    #[test]
    fn every_render_publishes_the_value() {
        let mut r = ruler(50.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        r.set_value_observer(Some(Box::new(move |v: &str| sink.borrow_mut().push(v.to_owned()))));
        draw(&mut r, Rect::new(0, 0, 30, 4));
        draw(&mut r, Rect::new(0, 0, 0, 0));
        assert_eq!(*seen.borrow(), vec!["50.0".to_string(), "50.0".to_string()]);
    }

    #[test]
    fn short_areas_clip_instead_of_panicking() {
        let mut r = ruler(25.0);
        let buf = draw(&mut r, Rect::new(0, 0, 7, 1));
        assert_eq!(symbol(&buf, 3, 0), INDICATOR);
    }
}
