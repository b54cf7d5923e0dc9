//! Deterministic task scheduling for the round countdown.
//!
//! The scheduler never reads a wall clock. Whoever owns it moves time forward
//! and pops due tasks one at a time, so a task that fires can still cancel the
//! ones queued behind it.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// One-second countdown step of the running round.
    Tick,
    /// Delayed start of the next round after a round ended.
    StartNextRound,
}

#[derive(Debug)]
struct PendingTask {
    handle: TaskHandle,
    task: ScheduledTask,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct RoundScheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<PendingTask>,
}

impl RoundScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, task: ScheduledTask, delay: Duration) -> TaskHandle {
        self.push(task, delay, None)
    }

    pub fn schedule_repeating(&mut self, task: ScheduledTask, period: Duration) -> TaskHandle {
        // A zero period would fire forever within a single advance
        let period = period.max(Duration::from_millis(1));
        self.push(task, period, Some(period))
    }

    /// Removes a task. Cancelling an unknown or already fired handle is a no-op.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its due time.
    /// Repeating tasks are re-armed for their next period instead of being removed.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, ScheduledTask)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle.0))
            .map(|(i, _)| i)?;

        let entry = &mut self.pending[index];
        let fired = (entry.handle, entry.task);
        self.now = self.now.max(entry.due);

        if let Some(period) = entry.period {
            entry.due += period;
        } else {
            self.pending.remove(index);
        }

        Some(fired)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn push(&mut self, task: ScheduledTask, delay: Duration, period: Option<Duration>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(PendingTask {
            handle,
            task,
            due: self.now + delay,
            period,
        });
        handle
    }
}
