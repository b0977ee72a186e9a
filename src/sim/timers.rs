//! Delayed game effects
//!
//! Hit recovery, message dismissal, particle expiry and level advance are
//! fire-and-forget timers on the engine's virtual clock. Every timer is
//! stamped with the run generation that scheduled it; a restart bumps the
//! generation, so anything still queued from the previous run is dropped
//! instead of mutating the new one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerKind {
    /// End of the post-hit invincibility window
    ClearInvincibility,
    /// Hide the reward message of this item (if it is still showing)
    DismissMessage { item_id: u32 },
    /// Remove one particle batch
    ExpireParticles { batch: u64 },
    /// Move on from a completed level
    AdvanceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    /// Scheduling order, keeps same-deadline timers FIFO
    seq: u64,
    generation: u64,
    kind: TimerKind,
}

/// A timer that came due for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub due_ms: u64,
    pub kind: TimerKind,
}

/// Min-heap of pending timers keyed by run generation
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    generation: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current run generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `kind` to fire at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, kind: TimerKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due_ms,
            seq,
            generation: self.generation,
            kind,
        }));
    }

    /// Invalidate everything scheduled so far and start a new generation
    ///
    /// Stale entries stay queued and are discarded when they reach the front.
    pub fn reset(&mut self) {
        self.generation += 1;
    }

    /// Deadline of the earliest live timer
    pub fn next_due(&mut self) -> Option<u64> {
        self.discard_stale();
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Pop the earliest live timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        self.discard_stale();
        match self.queue.peek() {
            Some(Reverse(entry)) if entry.due_ms <= now_ms => {
                let Reverse(entry) = self.queue.pop()?;
                Some(Fired {
                    due_ms: entry.due_ms,
                    kind: entry.kind,
                })
            }
            _ => None,
        }
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(e)| e.generation == self.generation)
            .count()
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(entry)) = self.queue.peek() {
            if entry.generation == self.generation {
                break;
            }
            log::debug!("Dropping stale timer {:?}", entry.kind);
            self.queue.pop();
        }
    }
}
