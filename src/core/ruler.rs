//! The ruler component: scroll state, gesture handling and notification.
//!
//! Everything is driven by the host.  Pointer events go to
//! [`Ruler::pointer_down`], [`Ruler::pointer_move`] and [`Ruler::pointer_up`];
//! once per frame the host calls [`Ruler::compute_scroll`] and redraws when
//! [`Ruler::take_redraw_request`] says so.  Rendering calls
//! [`Ruler::publish_value`], which is the only place observers are notified.

use std::fmt;
use std::time::{Duration, Instant};

use super::error::RulerError;
use super::motion::{Curve, Gesture, InertiaRun, Motion, MotionConfig, MotionState};
use super::observer::ValueObserver;
use super::scale::{Scale, VisibleTicks};
use super::value::format_value;
use super::velocity::VelocityTracker;

/// Velocities are measured per second.
const VELOCITY_UNITS: Duration = Duration::from_millis(1000);

/// A scrollable ruler with a fixed center indicator.
pub struct Ruler {
    scale: Scale,
    /// Distance from the scale's left edge to the viewport center.
    offset: f64,
    motion: Motion,
    tracker: VelocityTracker,
    config: MotionConfig,
    observer: Option<Box<dyn ValueObserver>>,
    redraw_requested: bool,
}

impl fmt::Debug for Ruler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ruler")
            .field("scale", &self.scale)
            .field("offset", &self.offset)
            .field("motion", &self.motion)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl Ruler {
    /// Create a ruler positioned at `initial` (in whole units).
    pub fn new(scale: Scale, initial: f64, config: MotionConfig) -> Result<Self, RulerError> {
        let tenths = initial * 10.0;
        if !scale.contains(tenths) {
            return Err(RulerError::InitialValueOutOfRange {
                value: initial,
                min: scale.min() / 10,
                max: scale.max() / 10,
            });
        }
        Ok(Self {
            offset: scale.clamp_offset(scale.offset_for(tenths)),
            scale,
            motion: Motion::Idle,
            tracker: VelocityTracker::new(),
            config,
            observer: None,
            redraw_requested: true,
        })
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn state(&self) -> MotionState {
        self.motion.state()
    }

    /// Unrounded value under the indicator.
    pub fn current_value(&self) -> f64 {
        self.scale.value_at(self.offset)
    }

    /// Value under the indicator with one decimal place, rounded half up.
    pub fn formatted_value(&self) -> String {
        format_value(self.current_value())
    }

    /// Ticks to draw in a viewport `width` columns wide.
    pub fn visible_ticks(&self, width: f64) -> VisibleTicks {
        self.scale.visible_ticks(self.offset, width)
    }

    /// Whether a redraw is pending; clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // ── notification ────────────────────────────────────────────

    /// Register the value observer, replacing any previous one.
    /// `None` turns notification off.
    pub fn set_value_observer(&mut self, observer: Option<Box<dyn ValueObserver>>) {
        self.observer = observer;
    }

    /// Recompute the current value and hand it to the observer.
    /// Called by the renderer on every draw.
    pub fn publish_value(&mut self) -> String {
        let value = self.formatted_value();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_value_change(&value);
        }
        value
    }

    // ── programmatic control ────────────────────────────────────

    /// Animate to `value` (whole units).  Fails without touching any state
    /// when the value is not on the scale.
    pub fn set_current_value(&mut self, value: f64, now: Instant) -> Result<(), RulerError> {
        let tenths = value * 10.0;
        if !self.scale.contains(tenths) {
            return Err(RulerError::ValueOutOfRange {
                value,
                min: self.scale.min() as f64 / 10.0,
                max: self.scale.max() as f64 / 10.0,
            });
        }

        let target = self.scale.clamp_offset(self.scale.offset_for(tenths));
        let distance = (target - self.offset).abs();
        let duration = self
            .config
            .full_scroll_duration
            .mul_f64(distance / self.scale.total_length());
        tracing::debug!(value, from = self.offset, to = target, ?duration, "scroll to value");

        self.motion = Motion::Flinging(InertiaRun::new(
            self.offset,
            target,
            now,
            duration,
            Curve::EaseOut,
        ));
        self.redraw_requested = true;
        Ok(())
    }

    // ── pointer input ───────────────────────────────────────────

    /// Start a gesture.  Any running animation stops where it is.
    pub fn pointer_down(&mut self, x: f64, y: f64, now: Instant) {
        if matches!(self.motion, Motion::Flinging(_) | Motion::SnapAnimating(_)) {
            tracing::debug!(offset = self.offset, "animation interrupted by pointer");
        }
        self.tracker.clear();
        self.tracker.add(now, x);
        self.motion = Motion::Dragging(Gesture::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: Instant) {
        let Motion::Dragging(gesture) = &mut self.motion else {
            return;
        };
        self.tracker.add(now, x);

        let dx = x - gesture.last_x;
        let dy = y - gesture.last_y;
        gesture.last_x = x;
        gesture.last_y = y;

        if !gesture.committed {
            // Mostly-vertical motion and jitter inside the slop are not drags.
            if dx.abs() < dy.abs() || (x - gesture.down_x).abs() < self.config.touch_slop {
                return;
            }
            gesture.committed = true;
        }

        self.offset = self.scale.clamp_offset(self.offset - dx);
        self.redraw_requested = true;
    }

    /// Finish a gesture: fling if released fast enough, otherwise snap.
    pub fn pointer_up(&mut self, x: f64, y: f64, now: Instant) {
        if !matches!(self.motion, Motion::Dragging(_)) {
            return;
        }
        self.pointer_move(x, y, now);
        self.offset = self.scale.clamp_offset(self.offset);

        let velocity = self
            .tracker
            .velocity(VELOCITY_UNITS, self.config.max_fling_velocity);
        if velocity.abs() >= self.config.min_fling_velocity {
            // The scale moves against the pointer.
            let run = InertiaRun::fling(
                self.offset,
                -velocity,
                self.config.fling_deceleration,
                (0.0, self.scale.total_length()),
                now,
            );
            tracing::debug!(velocity, from = run.from, to = run.to, "fling");
            self.motion = Motion::Flinging(run);
            self.redraw_requested = true;
        } else {
            self.start_snap(now);
        }
    }

    // ── animation ───────────────────────────────────────────────

    /// Advance the running animation to `now`.  Returns `true` while an
    /// animation is in progress (each such call requests one redraw).
    pub fn compute_scroll(&mut self, now: Instant) -> bool {
        match self.motion {
            Motion::Flinging(run) => {
                if run.is_finished(now) {
                    self.offset = self.scale.clamp_offset(run.to);
                    self.start_snap(now);
                } else {
                    self.offset = self.scale.clamp_offset(run.position(now));
                }
            }
            Motion::SnapAnimating(run) => {
                self.offset = self.scale.clamp_offset(run.position(now));
                if run.is_finished(now) {
                    tracing::debug!(offset = self.offset, "settled");
                    self.motion = Motion::Idle;
                }
            }
            Motion::Idle | Motion::Dragging(_) => return false,
        }
        self.redraw_requested = true;
        true
    }

    fn start_snap(&mut self, now: Instant) {
        let target = self.scale.snap(self.offset);
        let duration = if target == self.offset {
            Duration::ZERO
        } else {
            self.config.snap_duration
        };
        self.motion = Motion::SnapAnimating(InertiaRun::new(
            self.offset,
            target,
            now,
            duration,
            Curve::Linear,
        ));
        self.redraw_requested = true;
    }
}
