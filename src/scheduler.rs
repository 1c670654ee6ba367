//! Virtual-clock interval timers.
//!
//! Nothing here sleeps: the runtime moves the clock forward and pops the timers
//! that came due, in order, dispatching each before popping the next. A timer
//! cleared while others are being dispatched never fires again.

use std::collections::BTreeMap;
use std::time::Duration;

/// What a timer tick should drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Autorun,
    Step,
}

/// The widget and concern a timer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTarget {
    pub widget: usize,
    pub kind: TimerKind,
}

/// Cancellation handle of a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer {
    due: Duration,
    period: Duration,
    target: TimerTarget,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub target: TimerTarget,
    pub at: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fires every `period`, starting one period from now.
    pub fn set_interval(&mut self, period: Duration, target: TimerTarget) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(handle, Timer { due: self.now + period, period, target });
        handle
    }

    /// Cancels a timer. Unknown or already cleared handles are ignored.
    pub fn clear(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_of(&self, kind: TimerKind) -> usize {
        self.timers.values().filter(|t| t.target.kind == kind).count()
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to its
    /// due time and rescheduling it one period later. Ties go to the older timer.
    ///
    /// Returns `None` once nothing is due; the clock is left where it is, see
    /// [`settle`](Self::settle).
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let (&handle, _) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(handle, timer)| (timer.due, **handle))?;

        let timer = self.timers.get_mut(&handle)?;
        let at = timer.due;
        let target = timer.target;
        timer.due += timer.period;
        self.now = self.now.max(at);
        Some(Fired { handle, target, at })
    }

    /// Moves the clock without firing anything. Never goes backwards.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
