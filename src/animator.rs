//! Spin animation: a cubic ease-out from rest to several full turns, then a
//! snap to the resting angle that puts the selected slice under the pointer.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::{Duration, Instant};

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

pub fn slice_angle(item_count: usize) -> f64 {
    TAU / item_count.max(1) as f64
}

/// Resting rotation once the spin is over.
pub fn final_rotation(selected_index: usize, item_count: usize) -> f64 {
    -(selected_index as f64) * slice_angle(item_count) + FRAC_PI_2
}

/// Total angle covered while easing; `turns = 5` gives `10π + index * slice`.
pub fn spin_travel(selected_index: usize, item_count: usize, turns: u32) -> f64 {
    turns as f64 * TAU + selected_index as f64 * slice_angle(item_count)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    started_at: Instant,
    duration: Duration,
    selected_index: usize,
    item_count: usize,
    turns: u32,
}

impl SpinAnimation {
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    pub fn rotation_at(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            final_rotation(self.selected_index, self.item_count)
        } else {
            spin_travel(self.selected_index, self.item_count, self.turns)
                * ease_out_cubic(self.progress(now))
        }
    }
}

/// Frame-driven wheel rotation. At most one animation runs at a time.
#[derive(Debug, Clone)]
pub struct SpinAnimator {
    duration: Duration,
    turns: u32,
    rotation: f64,
    active: Option<SpinAnimation>,
}

impl SpinAnimator {
    pub fn new(duration: Duration, turns: u32) -> Self {
        Self {
            duration,
            turns,
            rotation: 0.0,
            active: None,
        }
    }

    /// Starts from rotation zero and calls `on_started` before returning.
    pub fn start<F>(
        &mut self,
        now: Instant,
        selected_index: usize,
        item_count: usize,
        on_started: F,
    ) where
        F: FnOnce(&SpinAnimation),
    {
        let animation = SpinAnimation {
            started_at: now,
            duration: self.duration,
            selected_index,
            item_count,
            turns: self.turns,
        };
        self.rotation = 0.0;
        self.active = Some(animation);
        on_started(&animation);
    }

    /// Advances to `now` and returns the rotation to draw.
    pub fn frame(&mut self, now: Instant) -> f64 {
        if let Some(animation) = self.active {
            self.rotation = animation.rotation_at(now);
            if animation.is_finished(now) {
                self.active = None;
            }
        }
        self.rotation
    }

    /// Stops the running animation where it is. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&SpinAnimation> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_hits_endpoints_and_decelerates() {
        assert!(close(ease_out_cubic(0.0), 0.0));
        assert!(close(ease_out_cubic(1.0), 1.0));
        assert!(close(ease_out_cubic(0.5), 0.875));
        assert!(close(ease_out_cubic(2.0), 1.0));
        let first_half = ease_out_cubic(0.5) - ease_out_cubic(0.0);
        let second_half = ease_out_cubic(1.0) - ease_out_cubic(0.5);
        assert!(first_half > second_half);
    }

    #[test]
    fn final_rotation_puts_selected_slice_at_rest_angle() {
        assert!(close(final_rotation(0, 4), PI / 2.0));
        assert!(close(final_rotation(2, 4), -PI / 2.0));
    }

    #[test]
    fn travel_is_five_turns_plus_offset() {
        assert!(close(spin_travel(0, 4, 5), 10.0 * PI));
        assert!(close(spin_travel(1, 4, 5), 10.0 * PI + PI / 2.0));
    }

    #[test]
    fn frames_follow_the_eased_curve_then_snap() {
        let t0 = Instant::now();
        let mut animator = SpinAnimator::new(Duration::from_millis(2000), 5);
        animator.start(t0, 2, 4, |_| {});

        assert!(close(animator.frame(t0), 0.0));
        let mid = animator.frame(t0 + Duration::from_millis(1000));
        assert!(close(mid, (10.0 * PI + PI) * 0.875));
        assert!(animator.is_running());

        let end = animator.frame(t0 + Duration::from_millis(2000));
        assert!(close(end, -PI / 2.0));
        assert!(!animator.is_running());
        assert!(close(animator.frame(t0 + Duration::from_secs(10)), -PI / 2.0));
    }

    #[test]
    fn start_calls_back_synchronously() {
        let t0 = Instant::now();
        let mut animator = SpinAnimator::new(Duration::from_millis(2000), 5);
        let mut seen = None;
        animator.start(t0, 3, 7, |animation| {
            seen = Some((animation.selected_index(), animation.item_count()));
        });
        assert_eq!(seen, Some((3, 7)));
    }

    #[test]
    fn cancel_freezes_rotation() {
        let t0 = Instant::now();
        let mut animator = SpinAnimator::new(Duration::from_millis(2000), 5);
        animator.start(t0, 1, 4, |_| {});
        let frozen = animator.frame(t0 + Duration::from_millis(500));
        assert!(animator.cancel());
        assert!(!animator.cancel());
        assert!(close(animator.frame(t0 + Duration::from_secs(5)), frozen));
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let t0 = Instant::now();
        let mut animator = SpinAnimator::new(Duration::ZERO, 5);
        animator.start(t0, 0, 4, |_| {});
        assert!(close(animator.frame(t0), PI / 2.0));
    }
}
