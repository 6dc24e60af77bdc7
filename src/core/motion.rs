//! Motion state machine and the timed scroll runs that drive animation.
//!
//! A run is a closed-form curve from one offset to another over a fixed
//! duration.  Nothing ticks on its own: the host asks for the position at the
//! current instant once per frame.

use std::time::{Duration, Instant};

// ───────────────────────────────────────── tuning ────────────

/// Physical constants of the controller, in viewport units (cells).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Horizontal travel before a press becomes a drag.
    pub touch_slop: f64,
    /// Release speeds below this (units/s) snap instead of flinging.
    pub min_fling_velocity: f64,
    /// Release speeds are capped to this (units/s).
    pub max_fling_velocity: f64,
    /// Friction applied during a fling (units/s²).
    pub fling_deceleration: f64,
    /// Length of the settle animation onto the nearest tick.
    pub snap_duration: Duration,
    /// Time a programmatic scroll takes to cross the whole scale.
    pub full_scroll_duration: Duration,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            touch_slop: 1.0,
            min_fling_velocity: 20.0,
            max_fling_velocity: 400.0,
            fling_deceleration: 300.0,
            snap_duration: Duration::from_millis(120),
            full_scroll_duration: Duration::from_millis(2000),
        }
    }
}

// ───────────────────────────────────────── runs ──────────────

/// Shape of a run's progress over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Constant speed (snap settling).
    Linear,
    /// Quadratic ease-out (programmatic scrolls).
    EaseOut,
    /// Constant deceleration from an initial velocity (flings).
    Friction { velocity: f64, deceleration: f64 },
}

/// A timed scroll from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaRun {
    pub from: f64,
    pub to: f64,
    pub started: Instant,
    pub duration: Duration,
    pub curve: Curve,
}

impl InertiaRun {
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration, curve: Curve) -> Self {
        Self {
            from,
            to,
            started,
            duration,
            curve,
        }
    }

    /// A fling from `from` at `velocity` that coasts to a stop under
    /// `deceleration`, stopping early at the edges of `[lower, upper]`.
    pub fn fling(
        from: f64,
        velocity: f64,
        deceleration: f64,
        (lower, upper): (f64, f64),
        started: Instant,
    ) -> Self {
        let speed = velocity.abs();
        let coast = speed * speed / (2.0 * deceleration);
        let to = (from + coast.copysign(velocity)).clamp(lower, upper);
        let travel = (to - from).abs();
        // Time at which v·t - a·t²/2 covers `travel`.
        let secs = (speed - (speed * speed - 2.0 * deceleration * travel).max(0.0).sqrt())
            / deceleration;
        Self::new(
            from,
            to,
            started,
            Duration::from_secs_f64(secs.max(0.0)),
            Curve::Friction {
                velocity,
                deceleration,
            },
        )
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Offset at `now`.  Exactly `to` once the run is finished.
    pub fn position(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let frac = elapsed / self.duration.as_secs_f64();
        match self.curve {
            Curve::Linear => self.from + (self.to - self.from) * frac,
            Curve::EaseOut => {
                let rest = 1.0 - frac;
                self.from + (self.to - self.from) * (1.0 - rest * rest)
            }
            Curve::Friction {
                velocity,
                deceleration,
            } => {
                let travelled = velocity.abs() * elapsed - deceleration * elapsed * elapsed / 2.0;
                self.from + travelled.copysign(velocity)
            }
        }
    }
}

// ───────────────────────────────────────── gestures ──────────

/// Pointer bookkeeping for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub down_x: f64,
    pub last_x: f64,
    pub last_y: f64,
    /// Set once the pointer has travelled far enough, mostly horizontally.
    pub committed: bool,
}

impl Gesture {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            down_x: x,
            last_x: x,
            last_y: y,
            committed: false,
        }
    }
}

/// Controller state.  Programmatic scrolls share `Flinging` with real flings;
/// the run's curve tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Motion {
    #[default]
    Idle,
    Dragging(Gesture),
    Flinging(InertiaRun),
    SnapAnimating(InertiaRun),
}

/// Payload-free view of [`Motion`] for callers that only need the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Dragging,
    Flinging,
    SnapAnimating,
}

impl MotionState {
    /// Short description for status displays; empty when idle.
    pub fn label(self) -> &'static str {
        match self {
            MotionState::Idle => "",
            MotionState::Dragging => "dragging",
            MotionState::Flinging => "scrolling",
            MotionState::SnapAnimating => "settling",
        }
    }
}

impl Motion {
    pub fn state(&self) -> MotionState {
        match self {
            Motion::Idle => MotionState::Idle,
            Motion::Dragging(_) => MotionState::Dragging,
            Motion::Flinging(_) => MotionState::Flinging,
            Motion::SnapAnimating(_) => MotionState::SnapAnimating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn linear_run_interpolates_and_lands_exactly() {
        let t0 = Instant::now();
        let run = InertiaRun::new(0.0, 10.0, t0, ms(100), Curve::Linear);
        assert_eq!(run.position(t0), 0.0);
        assert!((run.position(t0 + ms(50)) - 5.0).abs() < 1e-9);
        assert!(!run.is_finished(t0 + ms(99)));
        assert_eq!(run.position(t0 + ms(100)), 10.0);
        assert_eq!(run.position(t0 + ms(5000)), 10.0);
    }

    #[test]
    fn ease_out_is_ahead_of_linear() {
        let t0 = Instant::now();
        let run = InertiaRun::new(100.0, 0.0, t0, ms(200), Curve::EaseOut);
        let mid = run.position(t0 + ms(100));
        assert!(mid < 50.0 && mid > 0.0, "{mid}");
    }

    #[test]
    fn zero_length_run_is_already_finished() {
        let t0 = Instant::now();
        let run = InertiaRun::new(3.0, 7.0, t0, Duration::ZERO, Curve::EaseOut);
        assert!(run.is_finished(t0));
        assert_eq!(run.position(t0), 7.0);
    }

    #[test]
    fn fling_coasts_to_a_stop() {
        let t0 = Instant::now();
        // v²/2a = 100²/200 = 25 units of travel over v/a = 1s.
        let run = InertiaRun::fling(50.0, 100.0, 100.0, (0.0, 1000.0), t0);
        assert!((run.to - 75.0).abs() < 1e-9);
        assert!((run.duration.as_secs_f64() - 1.0).abs() < 1e-6);
        // 100·0.5 - 100·0.25/2 = 37.5 travelled after half a second.
        assert!((run.position(t0 + ms(500)) - 87.5).abs() < 1e-6);
    }

    #[test]
    fn fling_stops_at_the_wall() {
        let t0 = Instant::now();
        let run = InertiaRun::fling(10.0, -100.0, 100.0, (0.0, 1000.0), t0);
        assert_eq!(run.to, 0.0);
        // Reaches the wall before it would have stopped on its own.
        assert!(run.duration < ms(1000));
        assert_eq!(run.position(t0 + run.duration), 0.0);
        let early = run.position(t0 + ms(10));
        assert!(early < 10.0 && early > 0.0);
    }
}
