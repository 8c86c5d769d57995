//! Easing curves for time-proportional tweens.
//!
//! Every curve maps progress `t` in \[0, 1\] to a monotonic non-decreasing
//! factor with `f(0) = 0` and `f(1) = 1`, so a tween never overshoots its
//! target and never moves backwards.

/// Curve applied to the normalised progress of a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// CSS-style cubic bezier (x1, y1, x2, y2). Keep y1/y2 in \[0, 1\] to
    /// stay monotonic.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Standard platform ease-in-out used by default for trail motion.
    pub const STANDARD: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Evaluate the curve at `t`. Input is clamped to \[0, 1\].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                cubic_bezier(t, x1, y1, x2, y2).clamp(0.0, 1.0)
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::STANDARD
    }
}

// Newton-Raphson on x(u) = t, then evaluate y(u)
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut u = t;
    for _ in 0..8 {
        let x = bezier_component(u, x1, x2) - t;
        if x.abs() < 1e-6 {
            break;
        }
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u = (u - x / slope).clamp(0.0, 1.0);
    }
    bezier_component(u, y1, y2)
}

fn bezier_component(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let mu = 1.0 - u;
    3.0 * mu * mu * p1 + 6.0 * mu * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}
