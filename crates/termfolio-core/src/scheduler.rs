//! Cooperative repeat-task scheduler.
//!
//! Every timer in the session (typing reveal, matrix frames, snake ticks) is
//! a repeat task registered here. The event loop advances the scheduler by
//! the elapsed wall time and dispatches the fire counts it returns. A task
//! runs until its [`TaskHandle`] is passed to [`Scheduler::cancel`].

/// Identifies one scheduled task. Doubles as its disposer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Task {
    handle: TaskHandle,
    interval_ms: u32,
    /// Time until the next fire.
    remaining_ms: u32,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task that first fires `initial_delay_ms + interval_ms`
    /// from now, then every `interval_ms`.
    pub fn schedule_repeat(&mut self, initial_delay_ms: u32, interval_ms: u32) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let interval_ms = interval_ms.max(1);
        self.tasks.push(Task {
            handle,
            interval_ms,
            remaining_ms: initial_delay_ms.saturating_add(interval_ms),
        });
        handle
    }

    /// Remove a task. Returns `false` if it was not registered.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Advance time by `dt_ms`. Returns each task that fired with the
    /// number of intervals that elapsed, in registration order.
    pub fn advance(&mut self, dt_ms: u32) -> Vec<(TaskHandle, u32)> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if dt_ms < task.remaining_ms {
                task.remaining_ms -= dt_ms;
                continue;
            }
            let overshoot = dt_ms - task.remaining_ms;
            let count = 1 + overshoot / task.interval_ms;
            task.remaining_ms = task.interval_ms - overshoot % task.interval_ms;
            fired.push((task.handle, count));
        }
        fired
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_fire_after_delay_plus_interval() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeat(200, 40);
        assert!(s.advance(239).is_empty());
        assert_eq!(s.advance(1), vec![(h, 1)]);
        assert!(s.advance(39).is_empty());
        assert_eq!(s.advance(1), vec![(h, 1)]);
    }

    #[test]
    fn large_step_reports_multiple_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeat(0, 10);
        assert_eq!(s.advance(35), vec![(h, 3)]);
        assert_eq!(s.advance(5), vec![(h, 1)]);
    }

    #[test]
    fn cancel_stops_fires() {
        let mut s = Scheduler::new();
        let a = s.schedule_repeat(0, 10);
        let b = s.schedule_repeat(0, 10);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(!s.is_active(a));
        assert!(s.is_active(b));
        assert_eq!(s.advance(10), vec![(b, 1)]);
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeat(0, 0);
        assert_eq!(s.advance(3), vec![(h, 3)]);
    }

    #[test]
    fn handles_are_unique() {
        let mut s = Scheduler::new();
        let a = s.schedule_repeat(0, 1);
        s.cancel(a);
        let b = s.schedule_repeat(0, 1);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn fire_count_matches_elapsed_time(steps in proptest::collection::vec(0u32..100, 1..50), interval in 1u32..50) {
            let mut s = Scheduler::new();
            let h = s.schedule_repeat(0, interval);
            let mut total_fires = 0u32;
            let mut elapsed = 0u32;
            for dt in steps {
                elapsed += dt;
                for (fired, count) in s.advance(dt) {
                    prop_assert_eq!(fired, h);
                    total_fires += count;
                }
            }
            prop_assert_eq!(total_fires, elapsed / interval);
        }
    }
}
