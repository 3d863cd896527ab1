//! Cancellable repeating tasks on a host-supplied millisecond clock
//!
//! A task only remembers when it is next due. The period is supplied each
//! time it is rescheduled, so a period change lands on the following run
//! rather than the one already pending.

/// A pending periodic action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingTask {
    next_due_ms: f64,
}

impl RepeatingTask {
    /// First run one `period_ms` from `now_ms` (interval semantics)
    pub fn after(now_ms: f64, period_ms: f64) -> Self {
        Self {
            next_due_ms: now_ms + period_ms,
        }
    }

    /// First run as soon as the clock is checked
    pub fn immediately(now_ms: f64) -> Self {
        Self { next_due_ms: now_ms }
    }

    #[inline]
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        self.next_due_ms <= now_ms
    }

    /// Schedule the next run one period after the run just taken
    pub fn reschedule(&mut self, period_ms: f64) {
        self.next_due_ms += period_ms;
    }

    /// Forget any backlog and run next one period from now
    pub fn resync(&mut self, now_ms: f64, period_ms: f64) {
        self.next_due_ms = now_ms + period_ms;
    }
}

/// Earliest due time among optional tasks, if any is due by `now_ms`
pub fn due_at(task: Option<RepeatingTask>, now_ms: f64) -> Option<f64> {
    task.filter(|t| t.is_due(now_ms)).map(|t| t.next_due_ms())
}
