//! UI Timers
//!
//! One-shot cancellable timers for browser UI code.
//! `BrowserScheduler` runs tasks on `setTimeout`, `ManualScheduler` runs them
//! on a virtual clock that tests advance by hand.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Anything that can run a task after a delay
pub trait Scheduler {
    /// Run `task` no earlier than `delay_ms` from now
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle;
}

/// Handle to a scheduled task.
///
/// Dropping the handle detaches the timer: the task still runs.
/// Call [`TimerHandle::cancel`] to stop it.
pub struct TimerHandle {
    canceller: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(canceller: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    /// Stop the task if it has not run yet. Cancelling a spent timer is a no-op.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.canceller.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.canceller.is_some())
            .finish()
    }
}

// ========================
// Browser
// ========================

/// Keep a started timer alive until it fires or is cancelled.
///
/// `start` receives the wrapped task and returns the timer, which must stop
/// and release that task when dropped (as gloo's `Timeout` does). The slot
/// owning the timer is freed when the task runs or the handle cancels.
fn arm<T: 'static>(task: Task, start: impl FnOnce(Task) -> T) -> TimerHandle {
    let slot: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
    let fired = slot.clone();
    let timer = start(Box::new(move || {
        let spent = fired.borrow_mut().take();
        task();
        drop(spent);
    }));
    *slot.borrow_mut() = Some(timer);
    TimerHandle::new(move || {
        let timer = slot.borrow_mut().take();
        drop(timer);
    })
}

/// `setTimeout`-backed scheduler
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        arm(task, |run| Timeout::new(delay_ms, run))
    }
}

// ========================
// Manual (virtual clock)
// ========================

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    queue: Vec<Pending>,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`]
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed so far
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Move the clock forward, running due tasks in (due, schedule order).
    /// Tasks scheduled while advancing run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let idx = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let pending = clock.queue.swap_remove(i);
                        clock.now = pending.due;
                        Some(pending.task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let seq = {
            let mut clock = self.clock.borrow_mut();
            clock.seq += 1;
            let seq = clock.seq;
            let due = clock.now + u64::from(delay_ms);
            clock.queue.push(Pending { due, seq, task });
            seq
        };
        let clock = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                let removed: Vec<Pending> = {
                    let mut clock = clock.borrow_mut();
                    let (gone, kept) = std::mem::take(&mut clock.queue)
                        .into_iter()
                        .partition(|p| p.seq == seq);
                    clock.queue = kept;
                    gone
                };
                drop(removed);
            }
        })
    }
}

// ========================
// Debounce
// ========================

/// Runs only the last task triggered within a quiet window.
///
/// Every `trigger` cancels the pending task and restarts the window.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    pending: Rc<RefCell<Option<TimerHandle>>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        self.cancel();
        let slot = Rc::downgrade(&self.pending);
        let handle = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                if let Some(slot) = slot.upgrade() {
                    slot.borrow_mut().take();
                }
                task();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        let handle = self.pending.borrow_mut().take();
        if let Some(handle) = handle {
            handle.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}
