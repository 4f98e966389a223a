//! Per-node edge storage: an open-addressed table keyed by the first letter of
//! each edge label, using Robin Hood displacement.
//!
//! - `home(key) = (key - 'a') mod capacity`
//! - An inserting entry that has probed farther than the occupant of a slot
//!   takes the slot and the occupant continues probing.
//! - Growth walks 3, 7, 11, 17, 23, 29 and then the next prime at or above
//!   twice the current capacity, rebuilding the table from scratch.
//! - Removal uses backward-shift deletion, so there are no tombstones and
//!   `max_probe_length` stays a valid upper bound.

use std::iter;
use std::mem;

use tracing::debug;

use super::TrieNode;
use crate::settings::settings;

const GROWTH_PRIMES: [usize; 6] = [3, 7, 11, 17, 23, 29];

pub const INITIAL_CAPACITY: usize = GROWTH_PRIMES[0];

/// Capacity to grow to from `capacity`.
pub fn next_capacity(capacity: usize) -> usize {
    match GROWTH_PRIMES.iter().position(|&p| p == capacity) {
        Some(i) if i + 1 < GROWTH_PRIMES.len() => GROWTH_PRIMES[i + 1],
        _ => next_prime(capacity.saturating_mul(2)),
    }
}

fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[inline]
fn home_slot(key: u8, capacity: usize) -> usize {
    key.wrapping_sub(b'a') as usize % capacity
}

/// Circular distance from `home` forward to `idx`.
#[inline]
fn probe_distance(home: usize, idx: usize, capacity: usize) -> usize {
    (idx + capacity - home) % capacity
}

fn empty_slots(capacity: usize) -> Vec<Option<Edge>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// A compressed path segment and the node it leads to.
#[derive(Debug)]
pub struct Edge {
    pub(crate) label: String,
    pub(crate) child: TrieNode,
}

impl Edge {
    pub(crate) fn new(label: impl Into<String>, child: TrieNode) -> Self {
        let label = label.into();
        debug_assert!(!label.is_empty(), "edge label must be non-empty");
        Self { label, child }
    }

    /// First byte of the label; the table key.
    #[inline]
    pub fn key(&self) -> u8 {
        self.label.as_bytes()[0]
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn child(&self) -> &TrieNode {
        &self.child
    }
}

#[derive(Debug)]
pub struct EdgeTable {
    slots: Vec<Option<Edge>>,
    len: usize,
    max_probe_length: usize,
}

impl Default for EdgeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeTable {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            len: 0,
            max_probe_length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_probe_length(&self) -> usize {
        self.max_probe_length
    }

    pub fn get(&self, key: u8) -> Option<&Edge> {
        let idx = self.find_slot(key)?;
        self.slots[idx].as_ref()
    }

    pub fn get_mut(&mut self, key: u8) -> Option<&mut Edge> {
        let idx = self.find_slot(key)?;
        self.slots[idx].as_mut()
    }

    /// Occupied edges in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.slots.iter().flatten()
    }

    /// Add an edge whose first letter is not yet present.
    pub fn insert(&mut self, edge: Edge) {
        debug_assert!(
            self.find_slot(edge.key()).is_none(),
            "two edges starting with {:?}",
            edge.key() as char
        );
        self.place(edge);
        self.len += 1;
        if self.len >= self.grow_threshold() {
            self.grow();
        }
    }

    pub fn remove(&mut self, key: u8) -> Option<Edge> {
        let idx = self.find_slot(key)?;
        let removed = self.slots[idx].take();
        let capacity = self.slots.len();
        let mut hole = idx;
        loop {
            let next = (hole + 1) % capacity;
            let shift = self.slots[next]
                .as_ref()
                .is_some_and(|e| probe_distance(home_slot(e.key(), capacity), next, capacity) > 0);
            if !shift {
                break;
            }
            self.slots.swap(hole, next);
            hole = next;
        }
        self.len -= 1;
        removed
    }

    /// Remove and return the sole edge of a single-edge table.
    pub(crate) fn take_only(&mut self) -> Option<Edge> {
        if self.len != 1 {
            return None;
        }
        let key = self.iter().next()?.key();
        self.remove(key)
    }

    fn find_slot(&self, key: u8) -> Option<usize> {
        let capacity = self.slots.len();
        let home = home_slot(key, capacity);
        for dist in 0..=self.max_probe_length.min(capacity - 1) {
            let idx = (home + dist) % capacity;
            let edge = self.slots[idx].as_ref()?;
            if edge.key() == key {
                return Some(idx);
            }
            // An occupant closer to its home than we are to ours means the
            // key would have displaced it.
            if probe_distance(home_slot(edge.key(), capacity), idx, capacity) < dist {
                return None;
            }
        }
        None
    }

    fn place(&mut self, mut edge: Edge) {
        let capacity = self.slots.len();
        let mut idx = home_slot(edge.key(), capacity);
        let mut dist = 0;
        loop {
            let slot = &mut self.slots[idx];
            let Some(occupant) = slot.as_mut() else {
                *slot = Some(edge);
                self.max_probe_length = self.max_probe_length.max(dist);
                return;
            };
            let occupant_dist = probe_distance(home_slot(occupant.key(), capacity), idx, capacity);
            if dist > occupant_dist {
                mem::swap(occupant, &mut edge);
                self.max_probe_length = self.max_probe_length.max(dist);
                dist = occupant_dist;
            }
            idx = (idx + 1) % capacity;
            dist += 1;
        }
    }

    fn grow_threshold(&self) -> usize {
        let threshold = (self.slots.len() as f64 * settings().table.max_load_factor) as usize;
        threshold.max(1)
    }

    fn grow(&mut self) {
        let new_capacity = next_capacity(self.slots.len());
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.max_probe_length = 0;
        for edge in old.into_iter().flatten() {
            self.place(edge);
        }
        debug!(
            capacity = new_capacity,
            len = self.len,
            max_probe_length = self.max_probe_length,
            "edge table grown"
        );
    }

    /// Heap bytes owned directly by this table (slots and labels, not children).
    pub(crate) fn heap_bytes(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Option<Edge>>()
            + self.iter().map(|e| e.label.capacity()).sum::<usize>()
    }

    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let capacity = self.slots.len();
        if self.len >= capacity {
            return Err(format!("len {} >= capacity {}", self.len, capacity));
        }
        let mut seen = [false; 256];
        let mut occupied = 0;
        for (idx, edge) in self.slots.iter().enumerate() {
            let Some(edge) = edge else { continue };
            occupied += 1;
            if edge.label.is_empty() {
                return Err(format!("empty label at slot {idx}"));
            }
            let key = edge.key();
            if mem::replace(&mut seen[key as usize], true) {
                return Err(format!("duplicate first letter {:?}", key as char));
            }
            let dist = probe_distance(home_slot(key, capacity), idx, capacity);
            if dist > self.max_probe_length {
                return Err(format!(
                    "{:?} at probe distance {dist} > max_probe_length {}",
                    edge.label, self.max_probe_length
                ));
            }
            if self.find_slot(key) != Some(idx) {
                return Err(format!("{:?} unreachable by lookup", edge.label));
            }
        }
        if occupied != self.len {
            return Err(format!("len {} but {occupied} occupied slots", self.len));
        }
        Ok(())
    }
}
