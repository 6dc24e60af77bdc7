//! Pointer velocity estimation over the trailing part of a gesture.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Only samples this recent (relative to the newest one) count.
const HORIZON: Duration = Duration::from_millis(100);

/// Records horizontal pointer positions and estimates release velocity.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f64)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all samples (called on pointer down).
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, at: Instant, x: f64) {
        self.samples.push_back((at, x));
        while let Some(&(oldest, _)) = self.samples.front() {
            if at.saturating_duration_since(oldest) > HORIZON {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in units per `units` of time, clamped to `±max`.
    ///
    /// Uses the oldest and newest sample inside the horizon.  Fewer than two
    /// samples, or samples with no time between them, give zero.  So does a
    /// `max` that is negative or not finite.
    pub fn velocity(&self, units: Duration, max: f64) -> f64 {
        if !max.is_finite() || max < 0.0 {
            return 0.0;
        }
        let (Some(&(t0, x0)), Some(&(t1, x1))) = (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = t1.saturating_duration_since(t0);
        if dt.is_zero() {
            return 0.0;
        }
        let v = (x1 - x0) / dt.as_secs_f64() * units.as_secs_f64();
        v.clamp(-max, max)
    }
}
