//! Deferred events keyed by absolute simulation time
//!
//! Delayed effects (a dash impulse, the end of a dash, a jump becoming ready
//! again) are queued with the time they become due and polled once per tick.
//! Entries are never removed early: whoever handles a fired event re-checks
//! its own preconditions.

/// A queued event waiting for its due time
#[derive(Debug, Clone)]
struct Scheduled<E> {
    due: f64,
    seq: u64,
    event: E,
}

/// Queue of events ordered by due time, then by scheduling order
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    pending: Vec<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Scheduler<E> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue an event to fire at an absolute time
    pub fn schedule_at(&mut self, due: f64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled { due, seq, event });
    }

    /// Queue an event to fire `delay` seconds after `now`
    pub fn schedule_after(&mut self, now: f64, delay: f32, event: E) {
        self.schedule_at(now + delay.max(0.0) as f64, event);
    }

    /// Remove and return every event due at or before `now`.
    ///
    /// Events come back sorted by due time; ties keep scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|entry| entry.due <= now);
        self.pending = rest;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.event).collect()
    }

    /// Number of events still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending event
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|entry| entry.due)
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_fires_early() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(1.0, "late");

        assert!(scheduler.drain_due(0.5).is_empty());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.drain_due(1.0), vec!["late"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(0.3, 3);
        scheduler.schedule_at(0.1, 1);
        scheduler.schedule_at(0.2, 2);

        assert_eq!(scheduler.drain_due(1.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(0.5, "first");
        scheduler.schedule_at(0.5, "second");
        scheduler.schedule_at(0.25, "earlier");
        scheduler.schedule_at(0.5, "third");

        assert_eq!(
            scheduler.drain_due(0.5),
            vec!["earlier", "first", "second", "third"]
        );
    }

    #[test]
    fn test_schedule_after_is_relative() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(2.0, 0.25, ());
        assert_eq!(scheduler.next_due(), Some(2.25));
        assert!(scheduler.drain_due(2.2).is_empty());
        assert_eq!(scheduler.drain_due(2.25).len(), 1);
    }
}
