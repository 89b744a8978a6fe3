use std::cmp::Ordering;

use crate::error::{Error, Result};

struct HeapEntry<P, T> {
    priority: P,
    sequence: u64,
    item: T,
}

impl<P: Ord, T> HeapEntry<P, T> {
    // Equal priorities fall back to insertion order, which keeps pops deterministic.
    fn precedes(&self, other: &Self) -> bool {
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => self.sequence < other.sequence,
            o => o == Ordering::Less,
        }
    }
}

/// Binary min-heap keyed on `P`. Items with equal priority are popped first in, first out.
pub struct PriorityQueue<P, T> {
    heap: Vec<HeapEntry<P, T>>,
    next_sequence: u64,
}

impl<P: Ord, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<P: Ord, T> PriorityQueue<P, T> {
    pub fn new() -> PriorityQueue<P, T> {
        PriorityQueue::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> PriorityQueue<P, T> {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, priority: P, item: T) {
        self.heap.push(HeapEntry {
            priority,
            sequence: self.next_sequence,
            item,
        });
        self.next_sequence += 1;
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes the entry with the smallest priority.
    pub fn pop(&mut self) -> Result<(P, T)> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let entry = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.priority, entry.item))
    }

    pub fn peek(&self) -> Option<(&P, &T)> {
        self.heap.first().map(|e| (&e.priority, &e.item))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if !self.heap[ix].precedes(&self.heap[parent]) {
                break;
            }
            self.heap.swap(ix, parent);
            ix = parent;
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < n && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < n && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.heap.swap(ix, smallest);
            ix = smallest;
        }
    }
}
