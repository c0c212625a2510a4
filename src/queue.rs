//! Min-priority queue with priority updates.
//!
//! A `BinaryHeap` cannot reprioritize an interior element, so the queue keeps an
//! arena of entries addressed by slot index plus a map from item to its live slot.
//! Updating an item tombstones its old entry and pushes a fresh one; tombstones are
//! skipped when they reach the top of the heap. Every entry carries an insertion
//! sequence number so that equal priorities come out first-in first-out.
use crate::error::QueueError;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[derive(Debug)]
struct Entry<T, P> {
    priority: P,
    // `None` once the entry has been superseded or dequeued.
    item: Option<T>,
}

#[derive(Debug, PartialEq, Eq)]
struct HeapRef<P> {
    priority: P,
    seq: u64,
    slot: usize,
}

impl<P: Ord> Ord for HeapRef<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<P: Ord> PartialOrd for HeapRef<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Indexed min-priority queue.
///
/// # Examples
/// ```
/// use sliding_tile_solver::queue::IndexedPriorityQueue;
/// let mut queue = IndexedPriorityQueue::new();
/// queue.enqueue("x", 5);
/// queue.enqueue("x", 2);
/// assert_eq!(queue.dequeue(), Ok((2, "x")));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug)]
pub struct IndexedPriorityQueue<T, P> {
    entries: Vec<Entry<T, P>>,
    free_slots: Vec<usize>,
    heap: BinaryHeap<Reverse<HeapRef<P>>>,
    index: HashMap<T, usize>,
    counter: u64,
}

impl<T, P> Default for IndexedPriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> IndexedPriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord + Copy,
{
    pub fn new() -> Self {
        IndexedPriorityQueue {
            entries: Vec::new(),
            free_slots: Vec::new(),
            heap: BinaryHeap::new(),
            index: HashMap::new(),
            counter: 0,
        }
    }

    /// Inserts `item`, or moves it to `priority` if it is already queued.
    ///
    /// The new priority may be higher or lower than the old one. An updated item
    /// queues behind items that already hold the same priority.
    pub fn enqueue(&mut self, item: T, priority: P) {
        if let Some(&old_slot) = self.index.get(&item) {
            self.entries[old_slot].item = None;
        }

        let entry = Entry {
            priority,
            item: Some(item.clone()),
        };
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.entries[slot] = entry;
                slot
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };

        self.heap.push(Reverse(HeapRef {
            priority,
            seq: self.counter,
            slot,
        }));
        self.counter += 1;
        self.index.insert(item, slot);
    }

    /// Removes and returns the lowest-priority item.
    ///
    /// # Errors
    /// Returns `QueueError::Empty` if no live item is queued.
    pub fn dequeue(&mut self) -> Result<(P, T), QueueError> {
        while let Some(Reverse(top)) = self.heap.pop() {
            // Each slot has exactly one heap reference, so it can be recycled now.
            self.free_slots.push(top.slot);
            let Some(item) = self.entries[top.slot].item.take() else {
                continue;
            };
            self.index.remove(&item);
            return Ok((top.priority, item));
        }
        Err(QueueError::Empty)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of `item`, if queued.
    pub fn peek_priority(&self, item: &T) -> Option<P> {
        self.index.get(item).map(|&slot| self.entries[slot].priority)
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_in_priority_order() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue('c', 3);
        q.enqueue('a', 1);
        q.enqueue('b', 2);
        assert_eq!(q.len(), 3);
        assert_eq!(q.dequeue(), Ok((1, 'a')));
        assert_eq!(q.dequeue(), Ok((2, 'b')));
        assert_eq!(q.dequeue(), Ok((3, 'c')));
        assert!(q.is_empty());
    }

    #[test]
    fn test_update_replaces_instead_of_duplicating() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("x", 5);
        q.enqueue("x", 2);
        assert_eq!(q.len(), 1);
        assert_eq!(q.peek_priority(&"x"), Some(2));
        assert_eq!(q.dequeue(), Ok((2, "x")));
        assert!(!q.contains(&"x"));
        assert_eq!(q.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn test_update_can_raise_priority() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("x", 1);
        q.enqueue("y", 4);
        q.enqueue("x", 9);
        assert_eq!(q.dequeue(), Ok((4, "y")));
        assert_eq!(q.dequeue(), Ok((9, "x")));
    }

    #[test]
    fn test_ties_are_first_in_first_out() {
        let mut q = IndexedPriorityQueue::new();
        for name in ["first", "second", "third"] {
            q.enqueue(name, 7);
        }
        // Re-queueing at the same priority moves the item to the back.
        q.enqueue("first", 7);
        let order: Vec<&str> = std::iter::from_fn(|| q.dequeue().ok())
            .map(|(_, name)| name)
            .collect();
        assert_eq!(order, vec!["second", "third", "first"]);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut q: IndexedPriorityQueue<u32, u32> = IndexedPriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.dequeue(), Err(QueueError::Empty));
        assert_eq!(q.peek_priority(&1), None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut q = IndexedPriorityQueue::new();
        for round in 0..100u32 {
            q.enqueue(round % 3, round);
            q.enqueue(round % 3, round + 1);
            q.dequeue().unwrap();
        }
        assert!(q.entries.len() <= 4);
        assert!(q.is_empty());
    }
}
