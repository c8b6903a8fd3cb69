//! Display-refresh scheduling and the animation loop built on it.

use crate::foundation::error::{CoverError, CoverResult};

/// Handle of one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// Source of "call me at the next display refresh" callbacks.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a pending request. Unknown or already fired requests are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Callbacks due on one simulated refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub now_ms: f64,
    pub requests: Vec<FrameRequest>,
}

/// Offline refresh source firing at a fixed rate on a simulated monotonic clock.
#[derive(Clone, Debug)]
pub struct FixedRateScheduler {
    period_ms: f64,
    frame: u64,
    next_id: u64,
    pending: Vec<FrameRequest>,
    cancelled: u64,
}

impl FixedRateScheduler {
    pub fn new(fps: f64) -> CoverResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(CoverError::validation("fps must be finite and > 0"));
        }
        Ok(Self {
            period_ms: 1000.0 / fps,
            frame: 0,
            next_id: 0,
            pending: Vec::new(),
            cancelled: 0,
        })
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance the clock by one refresh and hand out every request pending at that moment.
    pub fn advance(&mut self) -> Tick {
        self.frame += 1;
        Tick {
            now_ms: self.frame as f64 * self.period_ms,
            requests: std::mem::take(&mut self.pending),
        }
    }

    pub fn pending(&self) -> &[FrameRequest] {
        &self.pending
    }

    /// Number of requests withdrawn before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let req = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.push(req);
        req
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let before = self.pending.len();
        self.pending.retain(|r| *r != request);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Self-rescheduling loop that keeps exactly one request in flight while active.
///
/// Callbacks for any request other than the current one are stale and rejected. `stop` cancels
/// the outstanding request once; later calls and the eventual drop do nothing more.
#[derive(Debug)]
pub struct AnimationLoop<F: FrameScheduler> {
    scheduler: F,
    pending: Option<FrameRequest>,
}

impl<F: FrameScheduler> AnimationLoop<F> {
    pub fn new(scheduler: F) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request the first frame. No-op while already active.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept a fired callback and schedule the next one.
    ///
    /// Returns `false` for stale requests and while stopped.
    pub fn accept(&mut self, request: FrameRequest) -> bool {
        if self.pending != Some(request) {
            tracing::trace!(?request, "stale frame callback ignored");
            return false;
        }
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            tracing::debug!(?request, "animation loop cancelled");
        }
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<F: FrameScheduler> Drop for AnimationLoop<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../tests/unit/scheduler.rs"]
mod tests;
