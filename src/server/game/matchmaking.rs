use std::collections::VecDeque;

use uuid::Uuid;

/// The ordered waiting list of clients seeking an opponent.
///
/// Pairing is strict FIFO by insertion order. A client id appears at most
/// once; insertion and removal keep that invariant rather than callers.
pub struct WaitingQueue {
    waiting: VecDeque<Uuid>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self {
            waiting: VecDeque::new(),
        }
    }

    pub fn contains(&self, client_id: Uuid) -> bool {
        self.waiting.contains(&client_id)
    }

    /// Insert at the back. Returns false if the client was already waiting.
    pub fn enqueue(&mut self, client_id: Uuid) -> bool {
        if self.contains(client_id) {
            return false;
        }
        self.waiting.push_back(client_id);
        true
    }

    /// Pop the earliest-inserted entry.
    pub fn pop_earliest(&mut self) -> Option<Uuid> {
        self.waiting.pop_front()
    }

    /// Remove the client wherever it sits. Returns whether it was present.
    /// Idempotent; called on disconnect, timeout, and explicit cancel.
    pub fn remove(&mut self, client_id: Uuid) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|id| *id != client_id);
        self.waiting.len() != before
    }

    /// Snapshot of the waiting ids, earliest first. Used for debug logging.
    pub fn snapshot(&self) -> Vec<Uuid> {
        self.waiting.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_fifo_by_insertion_order() {
        let mut queue = WaitingQueue::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert!(queue.enqueue(a));
        assert!(queue.enqueue(b));
        assert!(queue.enqueue(c));
        assert_eq!(queue.pop_earliest(), Some(a));
        assert_eq!(queue.pop_earliest(), Some(b));
        assert_eq!(queue.pop_earliest(), Some(c));
        assert_eq!(queue.pop_earliest(), None);
    }

    #[test]
    fn enqueue_is_deduplicated() {
        let mut queue = WaitingQueue::new();
        let a = Uuid::new_v4();
        assert!(queue.enqueue(a));
        assert!(!queue.enqueue(a));
        assert_eq!(queue.snapshot(), vec![a]);
    }

    #[test]
    fn fifo_order_survives_interleaved_removals() {
        let mut queue = WaitingQueue::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        queue.enqueue(a);
        queue.enqueue(b);
        queue.enqueue(c);
        assert!(queue.remove(b));
        assert!(!queue.remove(b));
        assert_eq!(queue.pop_earliest(), Some(a));
        assert_eq!(queue.pop_earliest(), Some(c));
        assert_eq!(queue.pop_earliest(), None);
    }
}
