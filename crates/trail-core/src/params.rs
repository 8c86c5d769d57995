use crate::constants::*;
use crate::easing::Easing;
use crate::error::{MotionError, Result};
use crate::speed::{DurationDirection, SpeedRange};
use glam::Vec2;
use std::time::Duration;

/// Every adjustable value of a session. Defaults come from `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionParams {
    pub speed_range: SpeedRange,
    pub direction: DurationDirection,
    /// Speed the control starts at.
    pub initial_speed: f32,
    pub trail_count: usize,
    pub stagger: Duration,
    pub auto_hide: Duration,
    pub element_size: f32,
    pub size_decay: f32,
    pub opacity_decay: f32,
    pub initial_position: Vec2,
    pub easing: Easing,
    pub zoom_duration: Duration,
    pub zoom_active_scale: f32,
    pub slide_duration: Duration,
    pub closed_offset: f32,
    pub open_offset: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            speed_range: SpeedRange::new(MIN_SPEED, MAX_SPEED),
            direction: DurationDirection::Inverted,
            initial_speed: MIN_SPEED,
            trail_count: TRAIL_COUNT,
            stagger: Duration::from_millis(STAGGER_MS),
            auto_hide: Duration::from_millis(AUTO_HIDE_MS),
            element_size: ELEMENT_SIZE,
            size_decay: SIZE_DECAY,
            opacity_decay: OPACITY_DECAY,
            initial_position: initial_position_vec2(),
            easing: Easing::STANDARD,
            zoom_duration: Duration::from_millis(ZOOM_MS),
            zoom_active_scale: ZOOM_ACTIVE_SCALE,
            slide_duration: Duration::from_millis(SLIDE_MS),
            closed_offset: -SLIDER_WIDTH,
            open_offset: SLIDER_OPEN_OFFSET,
        }
    }
}

impl MotionParams {
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = SpeedRange::new(min, max);
        self
    }

    pub fn with_direction(mut self, direction: DurationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_trail_count(mut self, count: usize) -> Self {
        self.trail_count = count;
        self
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_auto_hide(mut self, delay: Duration) -> Self {
        self.auto_hide = delay;
        self
    }

    pub fn with_decay(mut self, size_decay: f32, opacity_decay: f32) -> Self {
        self.size_decay = size_decay;
        self.opacity_decay = opacity_decay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_initial_position(mut self, position: Vec2) -> Self {
        self.initial_position = position;
        self
    }

    /// Check value ranges. Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        let SpeedRange { min, max } = self.speed_range;
        finite("speed_range.min", min)?;
        finite("speed_range.max", max)?;
        if min > max {
            return Err(MotionError::InvertedSpeedRange { min, max });
        }
        if min < 0.0 {
            return Err(MotionError::NonPositive {
                field: "speed_range.min",
                value: min,
            });
        }
        if max > MAX_TIMING_MS as f32 {
            return Err(MotionError::SpeedRangeTooWide {
                value: max,
                limit: MAX_TIMING_MS as f32,
            });
        }
        finite("initial_speed", self.initial_speed)?;
        if self.trail_count == 0 {
            return Err(MotionError::EmptyTrail);
        }
        if self.trail_count > MAX_TRAIL_COUNT {
            return Err(MotionError::TrailTooLong {
                count: self.trail_count,
                max: MAX_TRAIL_COUNT,
            });
        }
        within_limit("stagger", self.stagger)?;
        within_limit("auto_hide", self.auto_hide)?;
        within_limit("zoom_duration", self.zoom_duration)?;
        within_limit("slide_duration", self.slide_duration)?;
        decay("size_decay", self.size_decay)?;
        decay("opacity_decay", self.opacity_decay)?;
        finite("element_size", self.element_size)?;
        if self.element_size <= 0.0 {
            return Err(MotionError::NonPositive {
                field: "element_size",
                value: self.element_size,
            });
        }
        finite("initial_position.x", self.initial_position.x)?;
        finite("initial_position.y", self.initial_position.y)?;
        finite("zoom_active_scale", self.zoom_active_scale)?;
        if self.zoom_active_scale <= 0.0 {
            return Err(MotionError::NonPositive {
                field: "zoom_active_scale",
                value: self.zoom_active_scale,
            });
        }
        finite("closed_offset", self.closed_offset)?;
        finite("open_offset", self.open_offset)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonFinite { field, value })
    }
}

fn within_limit(field: &'static str, value: Duration) -> Result<()> {
    let max = Duration::from_millis(MAX_TIMING_MS);
    if value <= max {
        Ok(())
    } else {
        Err(MotionError::DurationTooLong { field, value, max })
    }
}

fn decay(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MotionError::InvalidDecay { field, value })
    }
}
