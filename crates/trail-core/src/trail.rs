//! Trail scheduling: one gesture becomes a batch of staggered per-element jobs.

use glam::Vec2;
use smallvec::SmallVec;
use std::time::Duration;

/// Jobs for a typical trail fit inline.
pub type JobList = SmallVec<[TrailJob; 16]>;

/// Monotonic identifier of a batch within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(pub u64);

/// One element's share of a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailJob {
    pub index: usize,
    /// Offset from the batch's issue time.
    pub start_delay: Duration,
    pub target: Vec2,
    pub duration: Duration,
}

impl TrailJob {
    pub fn finish_offset(&self) -> Duration {
        self.start_delay.saturating_add(self.duration)
    }
}

/// Build `count` jobs toward `target`. Job `i` starts at `i * stagger`; all
/// jobs share `duration`. Start offsets saturate at `Duration::MAX`.
pub fn schedule(target: Vec2, duration: Duration, count: usize, stagger: Duration) -> JobList {
    (0..count)
        .map(|index| TrailJob {
            index,
            start_delay: stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
            target,
            duration,
        })
        .collect()
}

/// The jobs produced by a single gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBatch {
    pub id: BatchId,
    pub issued_at: Duration,
    pub target: Vec2,
    pub jobs: JobList,
}

impl TrailBatch {
    pub fn new(
        id: BatchId,
        issued_at: Duration,
        target: Vec2,
        duration: Duration,
        count: usize,
        stagger: Duration,
    ) -> Self {
        Self {
            id,
            issued_at,
            target,
            jobs: schedule(target, duration, count, stagger),
        }
    }

    /// Duration of the lead job, which also paces the shared rotation.
    pub fn lead_duration(&self) -> Duration {
        self.jobs.first().map(|j| j.duration).unwrap_or_default()
    }

    /// Offset at which the longest-running job ends.
    pub fn completion_offset(&self) -> Duration {
        self.jobs
            .iter()
            .map(TrailJob::finish_offset)
            .max()
            .unwrap_or_default()
    }

    pub fn completes_at(&self) -> Duration {
        self.issued_at.saturating_add(self.completion_offset())
    }

    pub fn job_start(&self, job: &TrailJob) -> Duration {
        self.issued_at.saturating_add(job.start_delay)
    }
}

/// Per-index presentation of a trail element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementStyle {
    pub size: f32,
    pub opacity: f32,
}

impl ElementStyle {
    /// Size and opacity shrink geometrically with `index`.
    pub fn for_index(index: usize, base_size: f32, size_decay: f32, opacity_decay: f32) -> Self {
        let i = i32::try_from(index).unwrap_or(i32::MAX);
        Self {
            size: base_size * size_decay.powi(i),
            opacity: opacity_decay.powi(i),
        }
    }

    /// Offset from the element centre to its top-left corner.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::splat(self.size / 2.0)
    }
}
