//! A single interactive session: gesture intake, speed control and trail
//! animation on one clock.
//!
//! Every inbound event first brings timers and animations up to the current
//! time, then applies its own transition, so events are processed strictly in
//! arrival order. All methods return the [`SessionEvent`]s they caused in
//! chronological order.

use crate::animator::{Animator, AnimatorEvent};
use crate::clock::Clock;
use crate::error::Result;
use crate::frame::{ElementFrame, ElementInstance, FrameSnapshot};
use crate::palette::ColorToken;
use crate::params::MotionParams;
use crate::slider::{SliderState, SliderTiming, SliderTransition, SpeedControl};
use crate::speed::{DurationMapper, SpeedBucket, SpeedValue};
use crate::trail::{BatchId, ElementStyle, TrailBatch};
use glam::Vec2;
use std::time::Duration;

/// Inbound events from the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    SurfaceTouch { x: f32, y: f32 },
    SpeedControlChange(f32),
    SpeedControlComplete,
    ToggleControlVisibility,
    ColorSelected(ColorToken),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    Trail(AnimatorEvent),
    Slider(SliderTransition),
}

impl SessionEvent {
    pub fn at(&self) -> Duration {
        match self {
            SessionEvent::Trail(e) => e.at(),
            SessionEvent::Slider(t) => t.at,
        }
    }
}

pub struct MotionSession<C: Clock> {
    params: MotionParams,
    mapper: DurationMapper,
    speed: SpeedValue,
    control: SpeedControl,
    animator: Animator,
    color: ColorToken,
    clock: C,
    now: Duration,
    next_batch: u64,
    last_target: Option<Vec2>,
}

impl<C: Clock> MotionSession<C> {
    pub fn new(params: MotionParams, clock: C) -> Result<Self> {
        params.validate()?;
        let mapper = DurationMapper::new(params.speed_range, params.direction);
        let speed = SpeedValue::new(params.initial_speed, params.speed_range);
        let styles = (0..params.trail_count)
            .map(|i| {
                ElementStyle::for_index(
                    i,
                    params.element_size,
                    params.size_decay,
                    params.opacity_decay,
                )
            })
            .collect();
        let animator = Animator::new(styles, params.initial_position, params.easing);
        let control = SpeedControl::new(SliderTiming {
            auto_hide: params.auto_hide,
            zoom_duration: params.zoom_duration,
            zoom_active_scale: params.zoom_active_scale,
            slide_duration: params.slide_duration,
            closed_offset: params.closed_offset,
            open_offset: params.open_offset,
            easing: params.easing,
        });
        let now = clock.now();
        log::info!(
            "[session] trail={} stagger={:?} speed={} ({:?})",
            params.trail_count,
            params.stagger,
            speed.get(),
            params.direction
        );
        Ok(Self {
            params,
            mapper,
            speed,
            control,
            animator,
            color: ColorToken::default(),
            clock,
            now,
            next_batch: 0,
            last_target: None,
        })
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn mapper(&self) -> &DurationMapper {
        &self.mapper
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time the session was last brought up to date.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    /// Duration every job of the next gesture will use.
    pub fn duration(&self) -> Duration {
        self.mapper.duration(self.speed.get())
    }

    pub fn speed_bucket(&self) -> SpeedBucket {
        self.mapper.bucket(self.speed.get())
    }

    pub fn slider_state(&self) -> SliderState {
        self.control.state()
    }

    pub fn control(&self) -> &SpeedControl {
        &self.control
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn color(&self) -> &ColorToken {
        &self.color
    }

    pub fn last_target(&self) -> Option<Vec2> {
        self.last_target
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Vec<SessionEvent> {
        match event {
            InputEvent::SurfaceTouch { x, y } => self.on_surface_touch(x, y),
            InputEvent::SpeedControlChange(v) => self.on_speed_control_change(v),
            InputEvent::SpeedControlComplete => self.on_speed_control_complete(),
            InputEvent::ToggleControlVisibility => self.on_toggle_control_visibility(),
            InputEvent::ColorSelected(c) => self.on_color_selected(c),
        }
    }

    /// Advance timers and animations to the clock's current time.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);
        out
    }

    /// Close the control and launch a new trail batch toward `(x, y)`.
    pub fn on_surface_touch(&mut self, x: f32, y: f32) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);

        out.extend(self.control.surface_touch(now).map(SessionEvent::Slider));

        if !(x.is_finite() && y.is_finite()) {
            log::warn!("[touch] ignoring non-finite target ({}, {})", x, y);
            return out;
        }
        let target = Vec2::new(x, y);
        let duration = self.duration();
        let id = BatchId(self.next_batch);
        self.next_batch += 1;
        let batch = TrailBatch::new(
            id,
            now,
            target,
            duration,
            self.params.trail_count,
            self.params.stagger,
        );
        log::info!(
            "[touch] ({:.1}, {:.1}) -> {:?} duration={:?} completes at {:?}",
            x,
            y,
            id,
            duration,
            batch.completes_at()
        );
        self.last_target = Some(target);
        out.extend(
            self.animator
                .start_batch(&batch, now)
                .into_iter()
                .map(SessionEvent::Trail),
        );
        out
    }

    pub fn on_speed_control_change(&mut self, value: f32) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);

        let stored = self.speed.set(value);
        log::debug!(
            "[speed] {} -> {:?} ({})",
            stored,
            self.duration(),
            self.speed_bucket()
        );
        out.extend(self.control.change(now).map(SessionEvent::Slider));
        out
    }

    pub fn on_speed_control_complete(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);
        out.extend(self.control.complete(now).map(SessionEvent::Slider));
        out
    }

    pub fn on_toggle_control_visibility(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);
        out.extend(self.control.toggle(now).map(SessionEvent::Slider));
        out
    }

    pub fn on_color_selected(&mut self, color: ColorToken) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);
        log::info!("[color] {}", color);
        self.color = color;
        out
    }

    /// End of session. Cancels the auto-hide timer unconditionally.
    pub fn teardown(&mut self) -> Vec<SessionEvent> {
        let now = self.clock.now();
        let mut out = Vec::new();
        self.catch_up(now, &mut out);
        out.extend(self.control.teardown(now).map(SessionEvent::Slider));
        out
    }

    /// Outbound values at the time of the last update.
    pub fn frame(&self) -> FrameSnapshot {
        let elements = (0..self.animator.len())
            .filter_map(|i| {
                let style = self.animator.style(i)?;
                let position = self.animator.position(i)?;
                Some(ElementFrame {
                    position,
                    size: style.size,
                    opacity: style.opacity,
                })
            })
            .collect();
        FrameSnapshot {
            elements,
            rotation: self.animator.rotation(),
            control_offset: self.control.offset(self.now),
            control_scale: self.control.scale(self.now),
            slider_visible: self.control.slider_visible(),
            speed_bucket: self.speed_bucket(),
            color: self.color.clone(),
            animating: self.animator.is_animating(),
        }
    }

    /// GPU-ready instance records for the current frame. An unparsable
    /// colour falls back to the default.
    pub fn instances(&self) -> Vec<ElementInstance> {
        let rgba = self.color.to_rgba().unwrap_or_else(|e| {
            log::warn!("[color] {}; using default", e);
            ColorToken::default()
                .to_rgba()
                .unwrap_or([1.0, 1.0, 1.0, 1.0])
        });
        self.frame().instances(rgba)
    }

    fn catch_up(&mut self, now: Duration, out: &mut Vec<SessionEvent>) {
        let now = now.max(self.now);
        let first_new = out.len();
        out.extend(self.control.advance(now).map(SessionEvent::Slider));
        out.extend(
            self.animator
                .advance(now)
                .into_iter()
                .map(SessionEvent::Trail),
        );
        out[first_new..].sort_by_key(SessionEvent::at);
        self.now = now;
    }
}
