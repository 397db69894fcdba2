//! Timer scheduler
//!
//! One-shot deferred callbacks on a clock the host drives. Components never
//! sleep or spawn threads: the host calls [`TimerScheduler::tick`] from its
//! event loop (or [`TimerScheduler::advance`] with an explicit step), and every
//! timer whose deadline has passed fires, in deadline order.
//!
//! Timers are cancellable through their [`TimerId`]. Components hold them in
//! a [`ScopedTimer`] or a [`TimerSlot`], both of which cancel on drop, so a
//! torn-down component never leaves a callback behind.
//!
//! ```ignore
//! use std::time::Duration;
//! use lumen_core::timer::TimerScheduler;
//!
//! let scheduler = TimerScheduler::new();
//! let id = scheduler.schedule_after(Duration::from_millis(200), || println!("show"));
//!
//! scheduler.advance(Duration::from_millis(100)); // nothing yet
//! scheduler.cancel(id);                          // superseded
//! scheduler.advance(Duration::from_millis(500)); // never prints
//! ```

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to a pending timer
    pub struct TimerId;
}

/// Callback run once when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send>;

struct PendingTimer {
    deadline: Duration,
    /// Scheduling order, breaks ties between equal deadlines
    seq: u64,
    callback: TimerCallback,
}

/// Internal state of the timer scheduler
struct SchedulerInner {
    timers: SlotMap<TimerId, PendingTimer>,
    /// Virtual time elapsed since the scheduler was created
    now: Duration,
    next_seq: u64,
    last_tick: Instant,
}

impl SchedulerInner {
    /// Remove and return the earliest timer due at or before `until`
    fn pop_due(&mut self, until: Duration) -> Option<(Duration, TimerCallback)> {
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(id, _)| id)?;
        self.timers.remove(id).map(|t| (t.deadline, t.callback))
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that owns every pending timer
///
/// Typically held by the [`LumenContext`](crate::context::LumenContext) and
/// shared with components via [`TimerHandle`].
pub struct TimerScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timers: SlotMap::with_key(),
                now: Duration::ZERO,
                next_seq: 0,
                last_tick: Instant::now(),
            })),
        }
    }

    /// Get a weak handle for components
    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.inner).now
    }

    /// Number of timers still waiting to fire
    pub fn pending_count(&self) -> usize {
        lock(&self.inner).timers.len()
    }

    /// Deadline of the next timer to fire, if any
    ///
    /// Hosts can use this to sleep exactly until there's work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        lock(&self.inner).timers.values().map(|t| t.deadline).min()
    }

    /// Whether a timer is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        lock(&self.inner).timers.contains_key(id)
    }

    /// Schedule `callback` to run once `delay` from now
    pub fn schedule_after<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + Send + 'static,
    {
        schedule(&self.inner, delay, Box::new(callback))
    }

    /// Cancel a pending timer
    ///
    /// Returns `false` if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let removed = lock(&self.inner).timers.remove(id);
        removed.is_some()
    }

    /// Move the clock forward by `dt`, firing every timer that comes due
    ///
    /// Callbacks run without the scheduler lock held, so they may schedule or
    /// cancel timers; new timers that fall inside the window fire in the same
    /// call. Returns how many callbacks ran.
    pub fn advance(&self, dt: Duration) -> usize {
        let until = {
            let inner = lock(&self.inner);
            inner.now.saturating_add(dt)
        };

        let mut fired = 0;
        loop {
            let due = {
                let mut inner = lock(&self.inner);
                let due = inner.pop_due(until);
                if let Some((deadline, _)) = due.as_ref() {
                    inner.now = inner.now.max(*deadline);
                }
                due
            };
            let Some((deadline, callback)) = due else {
                break;
            };
            tracing::trace!("timer fired at {:?}", deadline);
            callback();
            fired += 1;
        }

        lock(&self.inner).now = until;
        fired
    }

    /// Advance by the real time elapsed since the previous tick
    pub fn tick(&self) -> usize {
        let dt = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = now.saturating_duration_since(inner.last_tick);
            inner.last_tick = now;
            dt
        };
        self.advance(dt)
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("TimerScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.timers.len())
            .finish()
    }
}

fn schedule(inner: &Mutex<SchedulerInner>, delay: Duration, callback: TimerCallback) -> TimerId {
    let mut guard = lock(inner);
    let deadline = guard.now.saturating_add(delay);
    let seq = guard.next_seq;
    guard.next_seq += 1;
    guard.timers.insert(PendingTimer {
        deadline,
        seq,
        callback,
    })
}

/// A weak handle to the timer scheduler
///
/// Passed to components that schedule timers. It won't keep the scheduler
/// alive; once the scheduler is dropped every operation is a no-op.
#[derive(Clone)]
pub struct TimerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl TimerHandle {
    /// Schedule a timer, returning `None` if the scheduler is gone
    pub fn schedule_after<F>(&self, delay: Duration, callback: F) -> Option<TimerId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner
            .upgrade()
            .map(|inner| schedule(&inner, delay, Box::new(callback)))
    }

    /// Schedule a timer that is cancelled when the returned guard drops
    pub fn schedule_scoped<F>(&self, delay: Duration, callback: F) -> Option<ScopedTimer>
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_after(delay, callback).map(|id| ScopedTimer {
            id,
            handle: self.clone(),
        })
    }

    /// Cancel a pending timer
    pub fn cancel(&self, id: TimerId) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        // The callback's captures drop after the scheduler lock
        let removed = lock(&inner).timers.remove(id);
        removed.is_some()
    }

    /// Whether a timer is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timers.contains_key(id))
            .unwrap_or(false)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// A pending timer that is cancelled when dropped
#[derive(Debug)]
pub struct ScopedTimer {
    id: TimerId,
    handle: TimerHandle,
}

impl ScopedTimer {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the timer is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.handle.is_pending(self.id)
    }

    /// Cancel now instead of at drop
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if self.handle.cancel(self.id) {
            tracing::trace!("timer {:?} cancelled", self.id);
        }
    }
}

/// Holds at most one pending timer
///
/// Scheduling into an occupied slot cancels the previous timer first. A
/// component keeps one slot per kind of deferred action (show, hide,
/// dismiss), which bounds it to a single pending timer of each kind.
#[derive(Debug)]
pub struct TimerSlot {
    handle: TimerHandle,
    current: Option<ScopedTimer>,
}

impl TimerSlot {
    pub fn new(handle: TimerHandle) -> Self {
        Self {
            handle,
            current: None,
        }
    }

    /// Cancel whatever is pending and schedule `callback` after `delay`
    pub fn schedule<F>(&mut self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.current = self.handle.schedule_scoped(delay, callback);
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// Whether a timer in this slot is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.current.as_ref().is_some_and(ScopedTimer::is_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let make = move || {
            let c = c.clone();
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[test]
    fn test_timer_fires_at_deadline() {
        let scheduler = TimerScheduler::new();
        let (count, make) = counter();

        scheduler.schedule_after(Duration::from_millis(200), make());

        assert_eq!(scheduler.advance(Duration::from_millis(199)), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(200));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let scheduler = TimerScheduler::new();
        let (count, make) = counter();

        let id = scheduler.schedule_after(Duration::from_millis(50), make());
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fire_order_by_deadline_then_schedule_order() {
        let scheduler = TimerScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (name, ms) in [("c", 30u64), ("a", 10), ("b1", 20), ("b2", 20)] {
            let order = order.clone();
            scheduler.schedule_after(Duration::from_millis(ms), move || {
                order.lock().unwrap().push(name);
            });
        }

        assert_eq!(scheduler.advance(Duration::from_millis(100)), 4);
        assert_eq!(*order.lock().unwrap(), vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_callback_can_schedule_within_window() {
        let scheduler = Arc::new(TimerScheduler::new());
        let (count, make) = counter();
        let handle = scheduler.handle();

        let follow_up = make();
        scheduler.schedule_after(Duration::from_millis(10), move || {
            handle.schedule_after(Duration::from_millis(10), follow_up);
        });

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let scheduler = TimerScheduler::new();
        let (count, make) = counter();

        scheduler.schedule_after(Duration::ZERO, make());
        assert_eq!(scheduler.next_deadline(), Some(Duration::ZERO));
        scheduler.advance(Duration::ZERO);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_timer_cancels_on_drop() {
        let scheduler = TimerScheduler::new();
        let (count, make) = counter();

        let scoped = scheduler
            .handle()
            .schedule_scoped(Duration::from_millis(10), make())
            .unwrap();
        assert!(scoped.is_pending());
        drop(scoped);

        assert_eq!(scheduler.pending_count(), 0);
        scheduler.advance(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_slot_replaces_previous_timer() {
        let scheduler = TimerScheduler::new();
        let (count, make) = counter();
        let mut slot = TimerSlot::new(scheduler.handle());

        slot.schedule(Duration::from_millis(10), make());
        slot.schedule(Duration::from_millis(10), make());
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = TimerScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle
            .schedule_after(Duration::from_millis(1), || {})
            .is_none());
        assert!(!handle.cancel(TimerId::default()));
    }
}
