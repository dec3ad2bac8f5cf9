//! Min-priority open list shared by every search in the crate.
//!
//! There is no decrease-key: a cheaper route to an index is recorded by pushing a fresh
//! entry, and the caller drops entries on pop whose cost is worse than the best cost it
//! already recorded for that index.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: u64,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so the estimate comparison is reversed. Equal estimates
        // favour the node with the larger cost so far (the deeper one), and remaining ties
        // go to the earliest push, which keeps runs on identical input reproducible.
        let by_estimate = other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal);
        let by_cost = self
            .cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal);
        by_estimate
            .then(by_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// An entry handed back by [PriorityFrontier::pop].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrontierEntry<K> {
    pub index: usize,
    pub priority: K,
    pub cost: K,
}

pub struct PriorityFrontier<K> {
    heap: BinaryHeap<SmallestCostHolder<K>>,
    pushed: u64,
}

impl<K: PartialOrd + Copy> Default for PriorityFrontier<K> {
    fn default() -> Self {
        PriorityFrontier::new()
    }
}

impl<K: PartialOrd + Copy> PriorityFrontier<K> {
    pub fn new() -> PriorityFrontier<K> {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> PriorityFrontier<K> {
        PriorityFrontier {
            heap: BinaryHeap::with_capacity(capacity),
            pushed: 0,
        }
    }

    /// Queues `index` with the given priority (f for A*, g for Dijkstra) and accumulated
    /// cost. An index may be present several times.
    pub fn push(&mut self, index: usize, priority: K, cost: K) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: priority,
            cost,
            sequence: self.pushed,
            index,
        });
        self.pushed += 1;
    }

    pub fn pop(&mut self) -> Option<FrontierEntry<K>> {
        self.heap.pop().map(|holder| FrontierEntry {
            index: holder.index,
            priority: holder.estimated_cost,
            cost: holder.cost,
        })
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
