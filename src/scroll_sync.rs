//! Header/body horizontal scroll synchronization
//!
//! Body scroll events can arrive many times per frame. Writing the header's
//! `scroll_left` on each one causes redundant layout work, so writes are
//! coalesced: each event cancels the pending frame (if any) and schedules a new
//! one, and only the latest value is applied when a frame fires.
//!
//! # Design
//!
//! - [`Coalescer`] is the runtime-agnostic two-state machine
//!   (`Idle` / `FramePending`). Hosts with their own frame clock drive it
//!   directly with [`Coalescer::push`] and [`Coalescer::fire`].
//! - [`HeaderScrollSync`] specializes it to `scroll_left` and a
//!   [`ScrollTarget`].
//! - [`FrameScheduler`] drives a coalescer on a tokio runtime, using one
//!   sleeping task per pending frame.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Identifies one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// State of a [`Coalescer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing scheduled
    Idle,
    /// A frame is scheduled and will apply the latest value
    FramePending,
}

/// What the host has to do after [`Coalescer::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Previously scheduled frame to cancel, if one was pending
    pub cancel: Option<FrameToken>,
    /// Frame to schedule now
    pub schedule: FrameToken,
}

/// Cancel-and-reschedule coalescing of values into single frame writes
pub struct Coalescer<T> {
    pending: Option<(FrameToken, T)>,
    next_token: u64,
    applied: u64,
    superseded: u64,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_token: 0,
            applied: 0,
            superseded: 0,
        }
    }
}

impl<T> fmt::Debug for Coalescer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coalescer")
            .field("state", &self.state())
            .field("pending_token", &self.pending_token())
            .field("applied", &self.applied)
            .field("superseded", &self.superseded)
            .finish()
    }
}

impl<T> Coalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        if self.pending.is_some() {
            SyncState::FramePending
        } else {
            SyncState::Idle
        }
    }

    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending.as_ref().map(|(token, _)| *token)
    }

    /// Record a new value
    ///
    /// Idle moves to FramePending. When a frame is already pending it is
    /// superseded: its token is returned for cancellation and a fresh token
    /// is issued.
    pub fn push(&mut self, value: T) -> FrameRequest {
        let token = FrameToken(self.next_token);
        self.next_token += 1;

        let cancel = self.pending.replace((token, value)).map(|(old, _)| old);
        if cancel.is_some() {
            self.superseded += 1;
        }
        FrameRequest {
            cancel,
            schedule: token,
        }
    }

    /// A scheduled frame fired
    ///
    /// Returns the value to apply when `token` is the pending frame and moves
    /// back to Idle. Stale or cancelled tokens return `None` and leave the
    /// state untouched.
    pub fn fire(&mut self, token: FrameToken) -> Option<T> {
        match self.pending.take() {
            Some((pending, value)) if pending == token => {
                self.applied += 1;
                Some(value)
            }
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending value, returning the token to cancel
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take().map(|(token, _)| token)
    }

    /// Number of frames that applied a value
    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    /// Number of pending frames replaced by a later push
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }
}

/// Something whose horizontal scroll offset can be set (the timeline header)
pub trait ScrollTarget {
    fn set_scroll_left(&mut self, scroll_left: f64);
}

/// Coalesced header sync for hosts that own their frame loop
#[derive(Debug, Default)]
pub struct HeaderScrollSync {
    coalescer: Coalescer<f64>,
}

impl HeaderScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        self.coalescer.state()
    }

    /// Body scrolled horizontally; the host must honour the returned request
    pub fn on_body_scroll(&mut self, scroll_left: f64) -> FrameRequest {
        self.coalescer.push(scroll_left)
    }

    /// A frame fired; copies the latest offset to `header` if `token` is current
    pub fn on_frame(&mut self, token: FrameToken, header: &mut impl ScrollTarget) -> bool {
        match self.coalescer.fire(token) {
            Some(scroll_left) => {
                header.set_scroll_left(scroll_left);
                true
            }
            None => false,
        }
    }

    pub fn writes(&self) -> u64 {
        self.coalescer.applied_count()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct SchedulerInner<T> {
    coalescer: Coalescer<T>,
    task: Option<JoinHandle<()>>,
}

type ApplyFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Drives a [`Coalescer`] on a tokio runtime
///
/// Each push aborts the sleeping task of the previous frame (if any) and
/// spawns a new one that sleeps for `frame` and then applies the latest
/// value. [`FrameScheduler::push`] must be called from within a tokio runtime.
pub struct FrameScheduler<T> {
    inner: Arc<Mutex<SchedulerInner<T>>>,
    frame: Duration,
    apply: ApplyFn<T>,
}

impl<T> fmt::Debug for FrameScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("frame", &self.frame)
            .field("coalescer", &lock(&self.inner).coalescer)
            .finish()
    }
}

impl<T: Send + 'static> FrameScheduler<T> {
    /// Create a scheduler applying values with `apply` once per frame
    pub fn new(frame: Duration, apply: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                coalescer: Coalescer::new(),
                task: None,
            })),
            frame,
            apply: Arc::new(apply),
        }
    }

    pub fn state(&self) -> SyncState {
        lock(&self.inner).coalescer.state()
    }

    /// Number of values actually applied so far
    pub fn applied_count(&self) -> u64 {
        lock(&self.inner).coalescer.applied_count()
    }

    /// Record a new value and (re)schedule the frame
    pub fn push(&self, value: T) {
        let mut inner = lock(&self.inner);
        let request = inner.coalescer.push(value);

        if let Some(task) = inner.task.take() {
            trace!(cancelled = ?request.cancel, "rescheduling scroll sync frame");
            task.abort();
        }

        let shared = Arc::clone(&self.inner);
        let apply = Arc::clone(&self.apply);
        let frame = self.frame;
        let token = request.schedule;

        inner.task = Some(tokio::spawn(async move {
            tokio::time::sleep(frame).await;
            let value = {
                let mut inner = lock(&shared);
                let value = inner.coalescer.fire(token);
                if value.is_some() {
                    inner.task = None;
                }
                value
            };
            if let Some(value) = value {
                apply(value);
            }
        }));
    }

    /// Cancel the pending frame without applying it
    pub fn cancel(&self) {
        let mut inner = lock(&self.inner);
        inner.coalescer.cancel();
        if let Some(task) = inner.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for FrameScheduler<T> {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.inner).task.take() {
            task.abort();
        }
    }
}
