use std::time::Duration;

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    Tick,
    Resolve {
        first: usize,
        second: usize,
        matched: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due: Duration,
    pub epoch: u64,
    pub task: SessionTask,
    seq: u64,
}

/// Virtual-time queue of deferred session callbacks.
///
/// Nothing runs on its own: the host advances time and the session executes
/// whatever came due. Each task carries the epoch it was scheduled in so the
/// session can discard callbacks that belong to a replaced board.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, epoch: u64, task: SessionTask) {
        let due = self.now + delay;
        trace!(target: "session", "Scheduling {:?} at {:?} (epoch {})", task, due, epoch);
        self.queue.push(ScheduledTask {
            due,
            epoch,
            task,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Removes and returns the earliest task due at or before `deadline`, moving
    /// the clock to its due time. Ties run in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<ScheduledTask> {
        let position = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= deadline)
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
            .map(|(position, _)| position)?;
        let scheduled = self.queue.remove(position);
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }

    /// Moves the clock forward without running anything.
    pub fn settle_at(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    pub fn cancel_where<F>(&mut self, predicate: F)
    where
        F: Fn(&ScheduledTask) -> bool,
    {
        self.queue.retain(|scheduled| !predicate(scheduled));
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.iter()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
