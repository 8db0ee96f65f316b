//! Timer Queue
//!
//! Cancelable, pausable timers on a host-driven millisecond clock.
//!
//! The queue never reads a clock itself: every call takes `now_ms` from the
//! caller, so the host decides whether time is wall-clock or simulated.
//! Components own their queue and cancel what they scheduled when their
//! state is superseded, so a stale timer can never fire into a newer state.

/// Handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct PendingTimer<E> {
    id: TimerId,
    due_ms: u64,
    event: E,
}

/// Timers carrying an event payload of type `E`
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    pending: Vec<PendingTimer<E>>,
    next_id: u64,
    paused_at: Option<u64>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
            paused_at: None,
        }
    }

    /// Schedule `event` to fire `delay_ms` after `now_ms`.
    ///
    /// While paused, the delay starts counting from the moment of the pause,
    /// which after `resume` means from the moment of the resume.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let base = self.paused_at.unwrap_or(now_ms);
        self.pending.push(PendingTimer {
            id,
            due_ms: base.saturating_add(delay_ms),
            event,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every timer whose event matches
    pub fn cancel_where(&mut self, mut matches: impl FnMut(&E) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| !matches(&t.event));
        before - self.pending.len()
    }

    /// Cancel everything and leave the paused state
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.paused_at = None;
        count
    }

    /// Freeze all deadlines. Returns false if already paused.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now_ms);
        true
    }

    /// Thaw deadlines, shifting them by the time spent paused
    pub fn resume(&mut self, now_ms: u64) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        let frozen = now_ms.saturating_sub(paused_at);
        for timer in &mut self.pending {
            timer.due_ms = timer.due_ms.saturating_add(frozen);
        }
        true
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Remove and return the earliest timer due at `now_ms`.
    ///
    /// Timers come out one at a time so a handler can cancel the rest of a
    /// batch before it is delivered. Ties fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<E> {
        if self.paused_at.is_some() {
            return None;
        }

        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        Some(self.pending.remove(index).event)
    }

    /// Earliest deadline, if any (ignores pausing)
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_ms).min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, now: u64) -> Vec<&'static str> {
        std::iter::from_fn(|| queue.pop_due(now)).collect()
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 300, "late");
        queue.schedule(0, 100, "early");
        queue.schedule(50, 50, "tie");

        assert!(drain(&mut queue, 99).is_empty());
        assert_eq!(drain(&mut queue, 100), vec!["early", "tie"]);
        assert_eq!(drain(&mut queue, 1000), vec!["late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(0, 10, "a");
        queue.schedule(0, 10, "b");

        assert!(queue.is_pending(id));
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(drain(&mut queue, 10), vec!["b"]);
    }

    #[test]
    fn test_cancel_where() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 10, "tick");
        queue.schedule(0, 20, "tick");
        queue.schedule(0, 30, "start");

        assert_eq!(queue.cancel_where(|e| *e == "tick"), 2);
        assert_eq!(drain(&mut queue, 100), vec!["start"]);
    }

    #[test]
    fn test_pause_shifts_deadlines() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 1000, "open");

        assert!(queue.pause(400));
        assert!(!queue.pause(500));
        assert!(drain(&mut queue, 5000).is_empty());

        // Paused for 600ms, so the deadline moves from 1000 to 1600
        assert!(queue.resume(1000));
        assert!(drain(&mut queue, 1599).is_empty());
        assert_eq!(drain(&mut queue, 1600), vec!["open"]);
    }

    #[test]
    fn test_schedule_while_paused_counts_from_resume() {
        let mut queue = TimerQueue::new();
        queue.pause(100);
        queue.schedule(300, 50, "later");
        queue.resume(1000);

        assert!(drain(&mut queue, 1049).is_empty());
        assert_eq!(drain(&mut queue, 1050), vec!["later"]);
    }

    #[test]
    fn test_cancel_all_clears_pause() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 10, "x");
        queue.pause(5);
        assert_eq!(queue.cancel_all(), 1);
        assert!(!queue.is_paused());
        assert_eq!(queue.next_due(), None);
    }
}
