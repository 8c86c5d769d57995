use std::time::Duration;
use thiserror::Error;

/// Configuration problems detected before a session starts.
///
/// Runtime operations never fail: out-of-range speeds clamp, cancelling an
/// idle timer is a no-op and a new gesture simply supersedes the running batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("speed range is inverted: min {min} > max {max}")]
    InvertedSpeedRange { min: f32, max: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("trail must contain at least one element")]
    EmptyTrail,

    #[error("trail of {count} elements exceeds the limit of {max}")]
    TrailTooLong { count: usize, max: usize },

    #[error("{field} must not exceed {max:?}, got {value:?}")]
    DurationTooLong {
        field: &'static str,
        value: Duration,
        max: Duration,
    },

    #[error("speed range max {value} exceeds {limit} (one unit per millisecond)")]
    SpeedRangeTooWide { value: f32, limit: f32 },

    #[error("{field} decay ratio must lie in (0, 1], got {value}")]
    InvalidDecay { field: &'static str, value: f32 },

    #[error("unrecognised colour token {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, MotionError>;
