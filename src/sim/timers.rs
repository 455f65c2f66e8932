use std::collections::{BTreeSet, HashMap};

use crate::model::UnixTime;

/// Handle to one armed timer. Disarming a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due, identifying the building it was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTimer {
    pub handle: TimerHandle,
    pub building_id: u32,
    pub at: UnixTime,
}

/// Construction timers for one village.
///
/// Ordered by due time, then by arm order. Each armed timer is returned by
/// [`TimerQueue::pop_due`] at most once.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_handle: u64,
    queue: BTreeSet<(UnixTime, TimerHandle)>,
    armed: HashMap<TimerHandle, (UnixTime, u32)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, at: UnixTime, building_id: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.queue.insert((at, handle));
        self.armed.insert(handle, (at, building_id));
        tracing::debug!(building_id, at = at.as_secs(), "timer armed");
        handle
    }

    /// Returns whether the handle was still armed.
    pub fn disarm(&mut self, handle: TimerHandle) -> bool {
        match self.armed.remove(&handle) {
            Some((at, building_id)) => {
                self.queue.remove(&(at, handle));
                tracing::debug!(building_id, "timer disarmed");
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.armed.contains_key(&handle)
    }

    /// Remove and return every timer due at or before `now`.
    pub fn pop_due(&mut self, now: UnixTime) -> Vec<DueTimer> {
        let mut due = Vec::new();
        while let Some(&(at, handle)) = self.queue.first() {
            if at > now {
                break;
            }
            self.queue.pop_first();
            if let Some((_, building_id)) = self.armed.remove(&handle) {
                due.push(DueTimer {
                    handle,
                    building_id,
                    at,
                });
            }
        }
        due
    }

    /// Earliest armed due time.
    pub fn next_due(&self) -> Option<UnixTime> {
        self.queue.first().map(|&(at, _)| at)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.armed.clear();
    }
}
