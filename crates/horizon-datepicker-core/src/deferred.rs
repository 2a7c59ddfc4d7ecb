//! Deferred task queue for Horizon Datepicker.
//!
//! Widgets often need to act "a little later": move keyboard focus once the
//! next render has produced the target element, close a dropdown after a
//! short confirmation delay, validate after focus has settled. Those actions
//! are queued here as plain data and handed back to the owner when they come
//! due; the queue never runs code on its own.
//!
//! Every task is scheduled into a *slot*. Each slot carries a generation
//! counter: scheduling into a slot, cancelling a slot, or cancelling
//! everything bumps the generation, and a task only fires if its generation
//! is still current when it comes due. A newer event of the same kind
//! therefore always supersedes an older one.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use horizon_datepicker_core::DeferredQueue;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Slot { Focus }
//!
//! let mut queue = DeferredQueue::new();
//! let start = Instant::now();
//! queue.schedule_at(Slot::Focus, "first", start + Duration::from_millis(10));
//! queue.schedule_at(Slot::Focus, "second", start + Duration::from_millis(10));
//!
//! let fired = queue.process_expired(start + Duration::from_millis(20));
//! assert_eq!(fired, vec!["second"]);
//! ```

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::error::DeferredError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a deferred task.
    pub struct DeferredId;
}

/// Internal task data.
#[derive(Debug)]
struct DeferredEntry<S, T> {
    slot: S,
    task: T,
    generation: u64,
}

/// An entry in the fire queue (min-heap by fire time, then by schedule order).
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: DeferredId,
    fire_at: Instant,
    seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Slot-keyed queue of cancelable one-shot tasks.
///
/// `S` names the slot (the kind of deferred work), `T` is the task payload
/// returned by [`process_expired`](Self::process_expired).
pub struct DeferredQueue<S, T> {
    /// Scheduled tasks, including superseded ones not yet reaped.
    entries: SlotMap<DeferredId, DeferredEntry<S, T>>,
    /// Pending fires.
    queue: BinaryHeap<QueueEntry>,
    /// Current generation per slot.
    generations: HashMap<S, u64>,
    /// Monotonic schedule counter, keeps equal fire times in FIFO order.
    next_seq: u64,
}

impl<S, T> Default for DeferredQueue<S, T>
where
    S: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> DeferredQueue<S, T>
where
    S: Copy + Eq + Hash + Debug,
{
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            generations: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` into `slot`, due `delay` from now.
    ///
    /// Any task still pending in the same slot is superseded.
    pub fn schedule(&mut self, slot: S, task: T, delay: Duration) -> DeferredId {
        self.schedule_at(slot, task, Instant::now() + delay)
    }

    /// Schedule `task` into `slot`, due at `fire_at`.
    ///
    /// Any task still pending in the same slot is superseded.
    pub fn schedule_at(&mut self, slot: S, task: T, fire_at: Instant) -> DeferredId {
        let generation = self.bump(slot);
        let id = self.entries.insert(DeferredEntry {
            slot,
            task,
            generation,
        });
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(QueueEntry { id, fire_at, seq });

        tracing::trace!(target: targets::DEFERRED, ?slot, generation, "task scheduled");
        id
    }

    /// Cancel one task by id.
    pub fn cancel(&mut self, id: DeferredId) -> Result<(), DeferredError> {
        match self.entries.remove(id) {
            Some(entry) => {
                tracing::trace!(target: targets::DEFERRED, slot = ?entry.slot, "task cancelled");
                Ok(())
            }
            None => Err(DeferredError::InvalidTaskId),
        }
    }

    /// Invalidate whatever is pending in `slot`.
    ///
    /// Returns `true` if a live task was superseded.
    pub fn cancel_slot(&mut self, slot: S) -> bool {
        let had_live = self.is_slot_pending(slot);
        self.bump(slot);
        had_live
    }

    /// Invalidate every pending task.
    ///
    /// Returns the number of live tasks that were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let live = self.pending_count();
        for generation in self.generations.values_mut() {
            *generation += 1;
        }
        self.entries.clear();
        self.queue.clear();
        if live > 0 {
            tracing::trace!(target: targets::DEFERRED, dropped = live, "all tasks cancelled");
        }
        live
    }

    /// Current generation of `slot` (0 if nothing was ever scheduled there).
    pub fn generation(&self, slot: S) -> u64 {
        self.generations.get(&slot).copied().unwrap_or(0)
    }

    /// Check whether the task with `id` is still going to fire.
    pub fn is_pending(&self, id: DeferredId) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| self.is_current(entry))
    }

    /// Check whether `slot` has a live task.
    pub fn is_slot_pending(&self, slot: S) -> bool {
        self.entries
            .values()
            .any(|entry| entry.slot == slot && self.is_current(entry))
    }

    /// Number of live tasks.
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| self.is_current(entry))
            .count()
    }

    /// Duration from `now` until the next live task is due.
    ///
    /// Returns `None` if nothing is pending.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.reap_front();
        self.queue
            .peek()
            .map(|entry| entry.fire_at.saturating_duration_since(now))
    }

    /// Remove and return every live task due at or before `now`, in due order.
    #[tracing::instrument(skip_all, target = "horizon_datepicker_core::deferred", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<T> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_at > now {
                break;
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };
            let Some(data) = self.entries.remove(entry.id) else {
                continue;
            };
            if !self.is_current(&data) {
                tracing::trace!(target: targets::DEFERRED, slot = ?data.slot, "stale task dropped");
                continue;
            }
            tracing::trace!(target: targets::DEFERRED, slot = ?data.slot, "task fired");
            fired.push(data.task);
        }

        fired
    }

    fn bump(&mut self, slot: S) -> u64 {
        match self.generations.entry(slot) {
            Entry::Occupied(mut occupied) => {
                *occupied.get_mut() += 1;
                *occupied.get()
            }
            Entry::Vacant(vacant) => *vacant.insert(1),
        }
    }

    fn is_current(&self, entry: &DeferredEntry<S, T>) -> bool {
        self.generation(entry.slot) == entry.generation
    }

    /// Drop cancelled or superseded entries from the front of the queue.
    fn reap_front(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .entries
                .get(entry.id)
                .is_some_and(|data| self.is_current(data));
            if live {
                break;
            }
            let id = entry.id;
            self.queue.pop();
            self.entries.remove(id);
        }
    }
}
