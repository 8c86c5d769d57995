//! Time sources for a session.
//!
//! All engine timing is expressed as a [`Duration`] elapsed since the session
//! origin. Tests and scripted replays drive a [`VirtualClock`] by hand; live
//! frame loops use [`SystemClock`].

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// Manually advanced clock.
///
/// Clones share the same time cell, so a test can keep a handle while the
/// session owns another.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now: Rc<Cell<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get().saturating_add(dt));
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jump to `t`. Earlier times are ignored; the clock is monotonic.
    pub fn set(&self, t: Duration) {
        if t > self.now.get() {
            self.now.set(t);
        }
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Wall clock anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        Instant::now().duration_since(self.origin)
    }
}
