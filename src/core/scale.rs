//! Scale geometry — maps scroll offsets to values and lays out visible ticks.
//!
//! Values are stored internally in *tenth-units*: a scale from 10 to 50 is
//! `min = 100`, `max = 500`, and every tick is one tenth of a unit apart.

use super::error::RulerError;

// ───────────────────────────────────────── scale ─────────────

/// Immutable scale description built from the ruler configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Lowest tick index (value × 10).
    min: i64,
    /// Highest tick index (value × 10).
    max: i64,
    /// Horizontal distance between two neighbouring ticks.
    tick_gap: f64,
}

impl Scale {
    /// Build a scale from whole-unit bounds.  Both bounds are multiplied by
    /// ten so major ticks land on whole units.
    pub fn new(min_number: i64, max_number: i64, tick_gap: f64) -> Result<Self, RulerError> {
        if min_number >= max_number {
            return Err(RulerError::InvalidRange {
                min: min_number,
                max: max_number,
            });
        }
        if !tick_gap.is_finite() || tick_gap <= 0.0 {
            return Err(RulerError::InvalidTickGap(tick_gap));
        }
        // Both ends and the span between them must fit in tenth-units.
        let invalid = RulerError::InvalidRange {
            min: min_number,
            max: max_number,
        };
        let (Some(min), Some(max)) = (min_number.checked_mul(10), max_number.checked_mul(10))
        else {
            return Err(invalid);
        };
        if max.checked_sub(min).is_none() {
            return Err(invalid);
        }
        Ok(Self { min, max, tick_gap })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn tick_gap(&self) -> f64 {
        self.tick_gap
    }

    /// Length of the whole scale: the largest legal scroll offset.
    pub fn total_length(&self) -> f64 {
        (self.max - self.min) as f64 * self.tick_gap
    }

    /// Clamp an offset into `[0, total_length]`.
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.total_length())
    }

    /// Whether a value in tenth-units lies on the scale.  NaN never does.
    pub fn contains(&self, tenths: f64) -> bool {
        (self.min as f64..=self.max as f64).contains(&tenths)
    }

    /// Offset that puts the given tenth-unit value under the indicator.
    pub fn offset_for(&self, tenths: f64) -> f64 {
        (tenths - self.min as f64) * self.tick_gap
    }

    /// Unrounded value (in whole units) under the indicator at `offset`.
    pub fn value_at(&self, offset: f64) -> f64 {
        (offset / self.tick_gap + self.min as f64) / 10.0
    }

    /// Round an offset to the nearest tick boundary.
    ///
    /// A remainder of at least half a gap rounds up.  This is a plain float
    /// rule and is intentionally separate from the decimal rounding used for
    /// the displayed value; the two may disagree at an exact half boundary.
    pub fn snap(&self, offset: f64) -> f64 {
        let remain = offset % self.tick_gap;
        // Re-derive the boundary from a whole tick count so a snapped
        // offset is an exact multiple of the gap.
        let below = ((offset - remain) / self.tick_gap).round();
        let ticks = if remain >= self.tick_gap / 2.0 {
            below + 1.0
        } else {
            below
        };
        self.clamp_offset(ticks * self.tick_gap)
    }

    /// Ticks visible in a viewport of `width` columns scrolled to `offset`.
    pub fn visible_ticks(&self, offset: f64, width: f64) -> VisibleTicks {
        let center = width / 2.0;
        let (x, index) = if offset >= center {
            // The scale's start lies left of the viewport: find the first
            // tick just outside the left edge.
            let hidden = offset - center;
            let index = (hidden / self.tick_gap + self.min as f64) as i64 - 1;
            (-(hidden % self.tick_gap) - self.tick_gap, index)
        } else {
            (center - offset, self.min)
        };
        VisibleTicks {
            scale: *self,
            width,
            x,
            index,
        }
    }
}

// ───────────────────────────────────────── ticks ─────────────

/// Whether a tick carries a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Minor,
    /// Whole-unit tick, labelled with `index / 10`.
    Major,
}

/// One tick positioned in viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Tenth-unit index on the scale.
    pub index: i64,
    /// Horizontal position relative to the viewport's left edge.
    pub x: f64,
    pub kind: TickKind,
}

impl Tick {
    /// Label text for major ticks.
    pub fn label(&self) -> Option<String> {
        match self.kind {
            TickKind::Major => Some((self.index / 10).to_string()),
            TickKind::Minor => None,
        }
    }
}

/// Iterator over visible ticks, stepping one gap at a time.
#[derive(Debug, Clone)]
pub struct VisibleTicks {
    scale: Scale,
    width: f64,
    x: f64,
    index: i64,
}

impl Iterator for VisibleTicks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        loop {
            if self.x >= self.width + self.scale.tick_gap || self.index > self.scale.max {
                return None;
            }
            let tick = Tick {
                index: self.index,
                x: self.x,
                kind: if self.index % 10 == 0 {
                    TickKind::Major
                } else {
                    TickKind::Minor
                },
            };
            self.x += self.scale.tick_gap;
            self.index += 1;
            if tick.index >= self.scale.min {
                return Some(tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> Scale {
        Scale::new(10, 50, 10.0).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            Scale::new(50, 10, 10.0),
            Err(RulerError::InvalidRange { min: 50, max: 10 })
        ));
        assert!(Scale::new(10, 10, 10.0).is_err());
    }

    #[test]
    fn rejects_bounds_too_large_for_tenths() {
        assert!(matches!(
            Scale::new(1_000_000_000_000_000_000, 1_000_000_000_000_000_001, 2.0),
            Err(RulerError::InvalidRange { .. })
        ));
        assert!(Scale::new(i64::MIN, 0, 2.0).is_err());
        // Each end fits, but the distance between them does not.
        assert!(Scale::new(-900_000_000_000_000_000, 900_000_000_000_000_000, 2.0).is_err());

        let wide = Scale::new(-400_000_000_000_000_000, 400_000_000_000_000_000, 2.0).unwrap();
        assert!(wide.total_length() > 0.0);
    }

    #[test]
    fn rejects_bad_gap() {
        assert!(Scale::new(0, 10, 0.0).is_err());
        assert!(Scale::new(0, 10, f64::NAN).is_err());
    }

    #[test]
    fn value_stays_in_range_for_every_legal_offset() {
        let s = scale();
        let total = s.total_length();
        let mut offset = 0.0;
        while offset <= total {
            let v = s.value_at(offset);
            assert!((10.0..=50.0).contains(&v), "offset {offset} gave {v}");
            offset += 3.7;
        }
        assert_eq!(s.value_at(total), 50.0);
        assert_eq!(s.value_at(0.0), 10.0);
    }

    #[test]
    fn offset_for_inverts_value_at() {
        let s = scale();
        assert_eq!(s.offset_for(123.0), 230.0);
        assert!((s.value_at(230.0) - 12.3).abs() < 1e-9);
    }

    #[test]
    fn snap_rounds_to_nearest_boundary() {
        let s = scale();
        assert_eq!(s.snap(34.0), 30.0);
        assert_eq!(s.snap(35.0), 40.0);
        assert_eq!(s.snap(39.9), 40.0);
        assert_eq!(s.snap(0.0), 0.0);
        assert_eq!(s.snap(s.total_length()), s.total_length());
    }

    #[test]
    fn snap_is_idempotent() {
        let s = scale();
        for raw in [0.0, 4.99, 5.0, 17.3, 1234.5, 3999.0] {
            let once = s.snap(raw);
            assert_eq!(s.snap(once), once);
        }
    }

    #[test]
    fn origin_visible_starts_at_min() {
        let s = scale();
        let ticks: Vec<_> = s.visible_ticks(20.0, 100.0).collect();
        assert_eq!(ticks[0].index, 100);
        assert_eq!(ticks[0].x, 30.0);
        assert_eq!(ticks[0].kind, TickKind::Major);
        assert_eq!(ticks[0].label().as_deref(), Some("10"));
        assert_eq!(ticks[1].kind, TickKind::Minor);
        assert!(ticks.last().unwrap().x < 110.0);
    }

    #[test]
    fn origin_hidden_starts_left_of_viewport() {
        let s = scale();
        // Center at 50, offset 125: value under the indicator is 11.25.
        let ticks: Vec<_> = s.visible_ticks(125.0, 100.0).collect();
        assert_eq!(ticks[0].index, 106);
        assert_eq!(ticks[0].x, -15.0);
        // The tick under the center column is 11.2 at x = 45.
        let under = ticks.iter().find(|t| t.index == 112).unwrap();
        assert_eq!(under.x, 45.0);
    }

    #[test]
    fn never_yields_ticks_past_the_ends() {
        let s = scale();
        let ticks: Vec<_> = s.visible_ticks(s.total_length(), 100.0).collect();
        assert_eq!(ticks.last().unwrap().index, 500);
        assert_eq!(ticks.last().unwrap().x, 50.0);

        let ticks: Vec<_> = s.visible_ticks(50.0, 100.0).collect();
        assert!(ticks.iter().all(|t| t.index >= 100));
        assert_eq!(ticks[0].x, 0.0);
    }
}
