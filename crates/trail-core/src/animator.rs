//! Position and rotation animation for the trail.
//!
//! The animator owns one track per trail element plus the shared rotation.
//! Batches are applied lazily as the clock advances: a job takes over its
//! element at exactly `issued_at + start_delay`, starting from wherever the
//! element is at that instant. A newer batch replaces every job that has not
//! started yet, and elements already moving keep their current tween until
//! their new job begins, so no position is ever discarded.

use crate::easing::Easing;
use crate::trail::{BatchId, ElementStyle, TrailBatch};
use crate::tween::Tween;
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorEvent {
    JobStarted {
        batch: BatchId,
        index: usize,
        from: Vec2,
        at: Duration,
    },
    JobFinished {
        batch: BatchId,
        index: usize,
        at: Duration,
    },
    /// A job of a newer batch took over the element before this job reached
    /// its target. Every `JobStarted` is paired with exactly one
    /// `JobFinished` or `JobInterrupted`.
    JobInterrupted {
        batch: BatchId,
        index: usize,
        at: Duration,
    },
    /// A newer batch took over before this one completed. Its completion
    /// will never be reported.
    BatchSuperseded { batch: BatchId, at: Duration },
    /// Every job of the batch reached its target; rotation is back at 0.
    BatchCompleted { batch: BatchId, at: Duration },
}

impl AnimatorEvent {
    pub fn at(&self) -> Duration {
        match *self {
            AnimatorEvent::JobStarted { at, .. }
            | AnimatorEvent::JobFinished { at, .. }
            | AnimatorEvent::JobInterrupted { at, .. }
            | AnimatorEvent::BatchSuperseded { at, .. }
            | AnimatorEvent::BatchCompleted { at, .. } => at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    Animating {
        batch: BatchId,
        completes_at: Duration,
    },
}

#[derive(Clone, Copy, Debug)]
struct PendingJob {
    batch: BatchId,
    start_at: Duration,
    target: Vec2,
    duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct ActiveJob {
    batch: BatchId,
    ends_at: Duration,
}

#[derive(Clone, Debug)]
struct ElementTrack {
    style: ElementStyle,
    tween: Tween<Vec2>,
    pending: Option<PendingJob>,
    active: Option<ActiveJob>,
}

pub struct Animator {
    elements: Vec<ElementTrack>,
    rotation: Tween<f32>,
    easing: Easing,
    phase: AnimatorPhase,
    now: Duration,
}

impl Animator {
    /// One track per style, all resting at `initial`.
    pub fn new(styles: Vec<ElementStyle>, initial: Vec2, easing: Easing) -> Self {
        let elements = styles
            .into_iter()
            .map(|style| ElementTrack {
                style,
                tween: Tween::settled(initial),
                pending: None,
                active: None,
            })
            .collect();
        Self {
            elements,
            rotation: Tween::settled(0.0),
            easing,
            phase: AnimatorPhase::Idle,
            now: Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Animating { .. })
    }

    /// Time the animator was last advanced to.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn style(&self, index: usize) -> Option<ElementStyle> {
        self.elements.get(index).map(|e| e.style)
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.elements.get(index).map(|e| e.tween.sample(self.now))
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.elements
            .iter()
            .map(|e| e.tween.sample(self.now))
            .collect()
    }

    /// Start value of the tween the element is currently following.
    pub fn origin(&self, index: usize) -> Option<Vec2> {
        self.elements.get(index).map(|e| e.tween.from)
    }

    /// Whether the element still waits for a job of the current batch.
    pub fn is_pending(&self, index: usize) -> bool {
        self.elements
            .get(index)
            .is_some_and(|e| e.pending.is_some())
    }

    /// Shared rotation in \[0, 1\].
    pub fn rotation(&self) -> f32 {
        match self.phase {
            AnimatorPhase::Idle => 0.0,
            AnimatorPhase::Animating { .. } => self.rotation.sample(self.now),
        }
    }

    /// Install a batch issued at `now`. Any running batch is superseded.
    pub fn start_batch(&mut self, batch: &TrailBatch, now: Duration) -> Vec<AnimatorEvent> {
        let mut events = Vec::new();
        self.advance_into(now, &mut events);

        if let AnimatorPhase::Animating { batch: old, .. } = self.phase {
            log::debug!("[batch] {:?} superseded by {:?}", old, batch.id);
            events.push(AnimatorEvent::BatchSuperseded { batch: old, at: now });
        }

        let count = self.elements.len();
        for job in &batch.jobs {
            let Some(track) = self.elements.get_mut(job.index) else {
                log::warn!(
                    "[batch] job for element {} ignored; trail has {} elements",
                    job.index,
                    count
                );
                continue;
            };
            track.pending = Some(PendingJob {
                batch: batch.id,
                start_at: now.saturating_add(job.start_delay),
                target: job.target,
                duration: job.duration,
            });
        }

        // Rotation restarts from 0 for every gesture, paced by the lead job.
        self.rotation = Tween::new(0.0, 1.0, now, batch.lead_duration(), self.easing);
        let completes_at = now.saturating_add(batch.completion_offset());
        self.phase = AnimatorPhase::Animating {
            batch: batch.id,
            completes_at,
        };
        log::debug!(
            "[batch] {:?} started: {} jobs, completes at {:?}",
            batch.id,
            batch.jobs.len(),
            completes_at
        );

        // Jobs with no delay take over immediately.
        self.advance_into(now, &mut events);
        events
    }

    /// Move every track to `now`, starting due jobs in index order and
    /// reporting completions. Events are returned in chronological order.
    pub fn advance(&mut self, now: Duration) -> Vec<AnimatorEvent> {
        let mut events = Vec::new();
        self.advance_into(now, &mut events);
        events
    }

    fn advance_into(&mut self, now: Duration, events: &mut Vec<AnimatorEvent>) {
        let now = now.max(self.now);
        let first_new = events.len();

        for (index, track) in self.elements.iter_mut().enumerate() {
            if let Some(job) = track.pending.filter(|p| p.start_at <= now) {
                finish_active(track, index, job.start_at, events);
                if let Some(old) = track.active.take() {
                    events.push(AnimatorEvent::JobInterrupted {
                        batch: old.batch,
                        index,
                        at: job.start_at,
                    });
                }
                let from = track.tween.sample(job.start_at);
                track.tween = Tween::new(from, job.target, job.start_at, job.duration, self.easing);
                track.pending = None;
                track.active = Some(ActiveJob {
                    batch: job.batch,
                    ends_at: job.start_at.saturating_add(job.duration),
                });
                events.push(AnimatorEvent::JobStarted {
                    batch: job.batch,
                    index,
                    from,
                    at: job.start_at,
                });
            }
            finish_active(track, index, now, events);
        }

        if let AnimatorPhase::Animating {
            batch,
            completes_at,
        } = self.phase
        {
            if now >= completes_at {
                self.rotation = Tween::settled(0.0);
                self.phase = AnimatorPhase::Idle;
                log::debug!("[batch] {:?} completed", batch);
                events.push(AnimatorEvent::BatchCompleted {
                    batch,
                    at: completes_at,
                });
            }
        }

        // Stable sort keeps index order among simultaneous events.
        events[first_new..].sort_by_key(AnimatorEvent::at);
        self.now = now;
    }
}

fn finish_active(
    track: &mut ElementTrack,
    index: usize,
    until: Duration,
    events: &mut Vec<AnimatorEvent>,
) {
    if let Some(active) = track.active.filter(|a| a.ends_at <= until) {
        track.active = None;
        events.push(AnimatorEvent::JobFinished {
            batch: active.batch,
            index,
            at: active.ends_at,
        });
    }
}
