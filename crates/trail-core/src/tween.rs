use crate::easing::Easing;
use glam::Vec2;
use std::time::Duration;

/// Types that can be interpolated by a [`Tween`].
pub trait Lerp: Copy {
    /// `t = 0` returns `from`, `t = 1` returns `to`.
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}

/// A single time-bounded interpolation on the session clock.
///
/// Before `start_at` the tween holds `from`; after `start_at + duration` it
/// holds `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Lerp> {
    pub from: T,
    pub to: T,
    pub start_at: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_at: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_at,
            duration,
            easing,
        }
    }

    /// A tween that already sits at `value`.
    pub fn settled(value: T) -> Self {
        Self::new(value, value, Duration::ZERO, Duration::ZERO, Easing::Linear)
    }

    pub fn end_at(&self) -> Duration {
        self.start_at.saturating_add(self.duration)
    }

    /// Linear progress in \[0, 1\] at `now`.
    pub fn progress(&self, now: Duration) -> f32 {
        if now <= self.start_at {
            return if self.duration.is_zero() && now == self.start_at {
                1.0
            } else {
                0.0
            };
        }
        if self.duration.is_zero() || now >= self.end_at() {
            return 1.0;
        }
        let elapsed = (now - self.start_at).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()) as f32
    }

    pub fn sample(&self, now: Duration) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        if p <= 0.0 {
            return self.from;
        }
        T::lerp(self.from, self.to, self.easing.evaluate(p))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end_at()
    }

    /// Replace this tween with one that starts from its value at `now`.
    pub fn retarget(&mut self, now: Duration, to: T, duration: Duration) {
        let from = self.sample(now);
        *self = Self::new(from, to, now, duration, self.easing);
    }
}
