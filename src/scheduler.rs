//! Single-threaded timer queue.
//!
//! Stands in for `setInterval`/`setTimeout` style primitives without owning
//! a thread or reading the clock: callers pass `now` and drain due tasks
//! with [`Scheduler::pop_due`]. Ordering is by due time, then by
//! registration order, so a virtual clock replays identically every time.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Millis;

/// Handle to a registered timer. Never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A task whose due time has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// When the task was due (not when it was drained).
    pub due: Millis,
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    due: Millis,
    period: Option<Millis>,
    task: T,
}

/// Timer queue holding periodic and one-shot tasks of type `T`.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: BTreeMap<TimerId, Entry<T>>,
    queue: BTreeSet<(Millis, TimerId)>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            entries: BTreeMap::new(),
            queue: BTreeSet::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` every `period` ms, first at `now + period`.
    ///
    /// `period` must be non-zero; a zero period would fire forever within
    /// one `pop_due` drain.
    pub fn every(&mut self, now: Millis, period: Millis, task: T) -> TimerId {
        debug_assert!(period > 0, "periodic timer needs a non-zero period");
        self.insert(now.saturating_add(period), Some(period.max(1)), task)
    }

    /// Run `task` once at `now + delay`.
    pub fn after(&mut self, now: Millis, delay: Millis, task: T) -> TimerId {
        self.insert(now.saturating_add(delay), None, task)
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.remove(&id) {
            Some(entry) => {
                self.queue.remove(&(entry.due, id));
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer. Returns how many were pending.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        self.queue.clear();
        n
    }

    /// Take the earliest task due at or before `now`.
    ///
    /// One-shot tasks are removed; periodic tasks are re-armed at
    /// `due + period` and a clone of the task is returned.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<T>> {
        let &(due, id) = self.queue.first()?;
        if due > now {
            return None;
        }
        self.queue.remove(&(due, id));

        let period = self.entries.get(&id)?.period;
        match period {
            Some(period) => {
                let entry = self.entries.get_mut(&id)?;
                let next = due.saturating_add(period);
                entry.due = next;
                self.queue.insert((next, id));
                Some(Fired {
                    due,
                    task: entry.task.clone(),
                })
            }
            None => {
                let entry = self.entries.remove(&id)?;
                Some(Fired {
                    due,
                    task: entry.task,
                })
            }
        }
    }

    /// Number of timers still pending.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.first().map(|&(due, _)| due)
    }

    fn insert(&mut self, due: Millis, period: Option<Millis>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { due, period, task });
        self.queue.insert((due, id));
        id
    }
}

// ============================================================================
// TESTS
// ============================================================================
