//! Speed control value, duration mapping and speed labels.
//!
//! The raw control value is measured in milliseconds. Which end of the range
//! produces the longer animation is fixed by [`DurationDirection`] when the
//! mapper is built.

use crate::constants::BUCKET_COUNT;
use std::fmt;
use std::time::Duration;

/// Closed interval of legal raw speed values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        // f32::clamp panics on reversed or NaN bounds.
        value.max(self.min).min(self.max)
    }
}

/// Raw speed control value, always inside its range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedValue {
    value: f32,
    range: SpeedRange,
}

impl SpeedValue {
    pub fn new(value: f32, range: SpeedRange) -> Self {
        Self {
            value: range.clamp(value),
            range,
        }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> SpeedRange {
        self.range
    }

    /// Store a new value, clamping silently. Returns the stored value.
    pub fn set(&mut self, value: f32) -> f32 {
        let clamped = self.range.clamp(value);
        if clamped != value {
            log::debug!("[speed] clamped {} -> {}", value, clamped);
        }
        self.value = clamped;
        clamped
    }
}

/// How the raw value maps to animation duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationDirection {
    /// `duration = max + min - value`: a higher control value is faster.
    #[default]
    Inverted,
    /// `duration = value`: a higher control value is slower.
    Direct,
}

/// Discrete speed label shown next to the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedBucket {
    Slowest = 0,
    Slow = 1,
    Medium = 2,
    Fast = 3,
    Fastest = 4,
}

impl SpeedBucket {
    pub const ALL: [SpeedBucket; BUCKET_COUNT] = [
        SpeedBucket::Slowest,
        SpeedBucket::Slow,
        SpeedBucket::Medium,
        SpeedBucket::Fast,
        SpeedBucket::Fastest,
    ];

    /// Bucket for an index, clamped to the last bucket.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(BUCKET_COUNT - 1)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedBucket::Slowest => "Slowest",
            SpeedBucket::Slow => "Slow",
            SpeedBucket::Medium => "Medium",
            SpeedBucket::Fast => "Fast",
            SpeedBucket::Fastest => "Fastest",
        }
    }
}

impl fmt::Display for SpeedBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure mapping from raw speed to duration and label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurationMapper {
    pub range: SpeedRange,
    pub direction: DurationDirection,
}

impl DurationMapper {
    pub fn new(range: SpeedRange, direction: DurationDirection) -> Self {
        Self { range, direction }
    }

    /// Animation duration in milliseconds for a raw value. Out-of-range input
    /// is clamped first, so the result always lies in `[min, max]`.
    pub fn duration_ms(&self, speed: f32) -> f32 {
        let v = self.range.clamp(speed);
        match self.direction {
            DurationDirection::Inverted => self.range.max + self.range.min - v,
            DurationDirection::Direct => v,
        }
    }

    pub fn duration(&self, speed: f32) -> Duration {
        millis_to_duration(self.duration_ms(speed))
    }

    /// Shortest and longest durations the mapper can produce.
    pub fn duration_bounds(&self) -> (Duration, Duration) {
        (
            millis_to_duration(self.range.min),
            millis_to_duration(self.range.max),
        )
    }

    /// Position of `speed` along the control, as a bucket index in 0..=4.
    /// A zero-width range always sits in the middle bucket.
    pub fn raw_bucket_index(&self, speed: f32) -> usize {
        let width = self.range.width();
        if width <= 0.0 {
            return SpeedBucket::Medium.index();
        }
        let step = width / (BUCKET_COUNT - 1) as f32;
        let v = self.range.clamp(speed);
        let idx = ((v - self.range.min) / step).round();
        (idx.max(0.0) as usize).min(BUCKET_COUNT - 1)
    }

    /// Perceived speed label. With `Direct` mapping the control is mirrored
    /// so that the shortest duration is always `Fastest`.
    pub fn bucket(&self, speed: f32) -> SpeedBucket {
        let raw = self.raw_bucket_index(speed);
        if self.range.width() <= 0.0 {
            return SpeedBucket::from_index(raw);
        }
        match self.direction {
            DurationDirection::Inverted => SpeedBucket::from_index(raw),
            DurationDirection::Direct => SpeedBucket::from_index(BUCKET_COUNT - 1 - raw),
        }
    }
}

// Microsecond rounding keeps whole-millisecond inputs exact.
fn millis_to_duration(ms: f32) -> Duration {
    let micros = (ms as f64 * 1000.0).round().max(0.0);
    Duration::from_micros(micros as u64)
}
