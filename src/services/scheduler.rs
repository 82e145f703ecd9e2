//! Timer queue for the controller's deferred work.
//!
//! All deferred tasks (recovery reloads, pressure samples, heap probes) live
//! here so the event loop can sleep until `next_deadline()` and cancel any
//! entry by id when the state it refers to goes away.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::types::surface::SurfaceId;

/// Handle of a scheduled task; valid until the task fires or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deferred controller work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Reload a crashed or failed surface.
    Recover(SurfaceId),
    /// Sample system memory and mitigate pressure.
    PressureSample,
    /// Ask the active surface for its heap usage.
    HeapProbe,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    // Ordered by (due, id) so equal deadlines fire in scheduling order.
    entries: BTreeMap<(Instant, TimerId), Task>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert((due, id), task);
        id
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.entries.keys().find(|(_, tid)| *tid == id).copied();
        match key {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.keys().any(|(_, tid)| *tid == id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Removes and returns every task due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<(TimerId, Task)> {
        let mut due = Vec::new();
        loop {
            let Some(&(at, id)) = self.entries.keys().next() else {
                break;
            };
            if at > now {
                break;
            }
            if let Some(task) = self.entries.remove(&(at, id)) {
                due.push((id, task));
            }
        }
        due
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&Task) -> bool) -> usize {
        self.entries.values().filter(|t| predicate(t)).count()
    }
}
