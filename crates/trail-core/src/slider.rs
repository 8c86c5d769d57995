//! Speed control visibility state machine with its auto-hide timer.
//!
//! ```text
//!            toggle                    change
//!  Closed ----------> OpenIdle ------------------> OpenAdjusting
//!    ^  <----------     |  ^  <------------------     |
//!    |  toggle/touch    |  |   complete (arms timer)  |
//!    |                  |                             |
//!    +---- timer -------+                             |
//!    +---------------- toggle / touch ----------------+
//! ```
//!
//! Every transition other than `complete` cancels the pending timer.

use crate::constants::{
    AUTO_HIDE_MS, SLIDER_OPEN_OFFSET, SLIDER_WIDTH, SLIDE_MS, ZOOM_ACTIVE_SCALE, ZOOM_IDLE_SCALE,
    ZOOM_MS,
};
use crate::easing::Easing;
use crate::tween::Tween;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderState {
    Closed,
    OpenIdle,
    OpenAdjusting,
}

impl SliderState {
    pub fn is_open(self) -> bool {
        !matches!(self, SliderState::Closed)
    }

    pub fn is_adjusting(self) -> bool {
        matches!(self, SliderState::OpenAdjusting)
    }
}

/// What caused a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderCause {
    Toggle,
    SurfaceTouch,
    Change,
    Complete,
    AutoHide,
    Teardown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderTransition {
    pub from: SliderState,
    pub to: SliderState,
    pub cause: SliderCause,
    pub at: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Single-shot cancellable timer. At most one deadline is armed at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoHideTimer {
    armed: Option<(TimerId, Duration)>,
    next_id: u64,
}

impl AutoHideTimer {
    /// Cancel any armed deadline and arm a new one.
    pub fn arm(&mut self, fires_at: Duration) -> TimerId {
        self.cancel();
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed = Some((id, fires_at));
        log::debug!("[timer] armed {:?} for {:?}", id, fires_at);
        id
    }

    /// No-op when nothing is armed.
    pub fn cancel(&mut self) {
        if let Some((id, _)) = self.armed.take() {
            log::debug!("[timer] cancelled {:?}", id);
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.armed.map(|(_, at)| at)
    }

    pub fn id(&self) -> Option<TimerId> {
        self.armed.map(|(id, _)| id)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Disarm and return the id if the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<(TimerId, Duration)> {
        match self.armed {
            Some((id, at)) if now >= at => {
                self.armed = None;
                Some((id, at))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderTiming {
    pub auto_hide: Duration,
    pub zoom_duration: Duration,
    pub zoom_active_scale: f32,
    pub slide_duration: Duration,
    pub closed_offset: f32,
    pub open_offset: f32,
    pub easing: Easing,
}

impl Default for SliderTiming {
    fn default() -> Self {
        Self {
            auto_hide: Duration::from_millis(AUTO_HIDE_MS),
            zoom_duration: Duration::from_millis(ZOOM_MS),
            zoom_active_scale: ZOOM_ACTIVE_SCALE,
            slide_duration: Duration::from_millis(SLIDE_MS),
            closed_offset: -SLIDER_WIDTH,
            open_offset: SLIDER_OPEN_OFFSET,
            easing: Easing::STANDARD,
        }
    }
}

pub struct SpeedControl {
    state: SliderState,
    timer: AutoHideTimer,
    timing: SliderTiming,
    offset: Tween<f32>,
    scale: Tween<f32>,
}

impl SpeedControl {
    pub fn new(timing: SliderTiming) -> Self {
        Self {
            state: SliderState::Closed,
            timer: AutoHideTimer::default(),
            offset: Tween {
                easing: timing.easing,
                ..Tween::settled(timing.closed_offset)
            },
            scale: Tween {
                easing: timing.easing,
                ..Tween::settled(ZOOM_IDLE_SCALE)
            },
            timing,
        }
    }

    pub fn state(&self) -> SliderState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The slider body is laid out only while open.
    pub fn slider_visible(&self) -> bool {
        self.state.is_open()
    }

    pub fn timer(&self) -> &AutoHideTimer {
        &self.timer
    }

    /// Scale the control is heading toward; enlarged only while dragging.
    pub fn zoom_target(&self) -> f32 {
        if self.state.is_adjusting() {
            self.timing.zoom_active_scale
        } else {
            ZOOM_IDLE_SCALE
        }
    }

    pub fn offset_target(&self) -> f32 {
        if self.state.is_open() {
            self.timing.open_offset
        } else {
            self.timing.closed_offset
        }
    }

    /// Horizontal translation of the control at `now`.
    pub fn offset(&self, now: Duration) -> f32 {
        self.offset.sample(now)
    }

    /// Presentation scale of the control at `now`.
    pub fn scale(&self, now: Duration) -> f32 {
        self.scale.sample(now)
    }

    pub fn toggle(&mut self, now: Duration) -> Option<SliderTransition> {
        self.timer.cancel();
        let to = match self.state {
            SliderState::Closed => SliderState::OpenIdle,
            SliderState::OpenIdle | SliderState::OpenAdjusting => SliderState::Closed,
        };
        self.transition(to, SliderCause::Toggle, now)
    }

    /// A gesture on the main surface always closes the control.
    pub fn surface_touch(&mut self, now: Duration) -> Option<SliderTransition> {
        self.timer.cancel();
        self.transition(SliderState::Closed, SliderCause::SurfaceTouch, now)
    }

    pub fn change(&mut self, now: Duration) -> Option<SliderTransition> {
        self.timer.cancel();
        self.transition(SliderState::OpenAdjusting, SliderCause::Change, now)
    }

    /// Drag released. Arms the auto-hide timer unless the control is closed.
    pub fn complete(&mut self, now: Duration) -> Option<SliderTransition> {
        if self.state == SliderState::Closed {
            log::debug!("[slider] completion while closed ignored");
            return None;
        }
        self.timer.arm(now.saturating_add(self.timing.auto_hide));
        self.transition(SliderState::OpenIdle, SliderCause::Complete, now)
    }

    /// Fire the auto-hide timer if it is due.
    pub fn advance(&mut self, now: Duration) -> Option<SliderTransition> {
        let (id, at) = self.timer.poll(now)?;
        log::debug!("[timer] {:?} fired", id);
        self.transition(SliderState::Closed, SliderCause::AutoHide, at)
    }

    /// End of session: cancel unconditionally.
    pub fn teardown(&mut self, now: Duration) -> Option<SliderTransition> {
        self.timer.cancel();
        self.transition(SliderState::Closed, SliderCause::Teardown, now)
    }

    fn transition(
        &mut self,
        to: SliderState,
        cause: SliderCause,
        at: Duration,
    ) -> Option<SliderTransition> {
        let from = self.state;
        if from == to {
            return None;
        }
        self.state = to;
        if from.is_open() != to.is_open() {
            let target = self.offset_target();
            self.offset.retarget(at, target, self.timing.slide_duration);
        }
        if from.is_adjusting() != to.is_adjusting() {
            let target = self.zoom_target();
            self.scale.retarget(at, target, self.timing.zoom_duration);
        }
        log::info!("[slider] {:?} -> {:?} ({:?})", from, to, cause);
        Some(SliderTransition {
            from,
            to,
            cause,
            at,
        })
    }
}
