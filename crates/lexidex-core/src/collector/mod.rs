//! Min-heap collector for ranked prefix results.
//!
//! A bounded collector keeps only the K best records it has been offered, with
//! the worst of them at the root so that a better arrival can replace it in
//! O(log K). An unbounded collector keeps everything and is used for averages
//! and full listings.


use crate::word::WordImportance;

const PREALLOC_LIMIT: usize = 64;

/// How many records a [`PriorityCollector`] retains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorBound {
    /// Keep only the `k` best records.
    Top(usize),
    /// Keep every record.
    All,
}

impl CollectorBound {
    /// Map the conventional `k` argument: any negative value (usually `-1`)
    /// means "all".
    pub fn from_k(k: i64) -> Self {
        if k < 0 {
            CollectorBound::All
        } else {
            CollectorBound::Top(k as usize)
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriorityCollector {
    /// Binary min-heap by rank; `heap[0]` is the worst record held.
    heap: Vec<WordImportance>,
    capacity: usize,
    bounded: bool,
}

impl PriorityCollector {
    pub fn new(bound: CollectorBound) -> Self {
        match bound {
            // `k` is only a bound; the heap grows with the matches offered.
            CollectorBound::Top(k) => Self {
                heap: Vec::with_capacity(k.min(PREALLOC_LIMIT)),
                capacity: k,
                bounded: true,
            },
            CollectorBound::All => Self {
                heap: Vec::with_capacity(1),
                capacity: 1,
                bounded: false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Current slot capacity. Fixed at `k` when bounded; doubles on demand
    /// when unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// The worst record currently held.
    pub fn peek_min(&self) -> Option<&WordImportance> {
        self.heap.first()
    }

    /// Offer a record.
    ///
    /// A full bounded collector drops `item` unless it outranks the current
    /// minimum, in which case the minimum is evicted.
    pub fn insert(&mut self, item: WordImportance) {
        if self.bounded {
            if self.capacity == 0 {
                return;
            }
            if self.heap.len() == self.capacity {
                if item <= self.heap[0] {
                    return;
                }
                self.heap[0] = item;
                self.sift_down(0);
                return;
            }
        } else if self.heap.len() == self.capacity {
            self.capacity *= 2;
            self.heap.reserve_exact(self.capacity - self.heap.len());
        }
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the worst record.
    pub fn pop_min(&mut self) -> Option<WordImportance> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Mean importance of the records held, `0.0` when empty.
    pub fn average(&self) -> f64 {
        if self.heap.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.iter().map(|w| u64::from(w.importance)).sum();
        sum as f64 / self.heap.len() as f64
    }

    /// Records in heap order.
    pub fn iter(&self) -> impl Iterator<Item = &WordImportance> {
        self.heap.iter()
    }

    /// Copy of the records, best first. Leaves the collector untouched.
    pub fn to_sorted_desc(&self) -> Vec<WordImportance> {
        let mut out = self.heap.clone();
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    pub fn into_sorted_desc(self) -> Vec<WordImportance> {
        let mut out = self.heap;
        out.sort_unstable_by(|a, b| b.cmp(a));
        out
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx] >= self.heap[parent] {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };
            if self.heap[idx] <= self.heap[child] {
                break;
            }
            self.heap.swap(idx, child);
            idx = child;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2] <= self.heap[i])
    }
}
