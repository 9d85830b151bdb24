use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<N, C> {
    estimated_cost: C,
    sequence: u64,
    node: N,
}

impl<N, C: PartialEq> Eq for SmallestCostHolder<N, C> {}

impl<N, C: PartialEq> PartialEq for SmallestCostHolder<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.sequence == other.sequence
    }
}

impl<N, C: Ord> PartialOrd for SmallestCostHolder<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, C: Ord> Ord for SmallestCostHolder<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the smallest estimate first, and among equal
        // estimates the entry that was inserted first.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Open set of a best-first search, keyed by `(estimated cost, insertion sequence)`.
///
/// A node may be pushed again after its estimate improves. The older entries stay in the heap
/// and are returned by [pop](Frontier::pop) like any other; telling them apart is up to the
/// caller, who knows the current best estimate of every node.
pub struct Frontier<N, C> {
    heap: BinaryHeap<SmallestCostHolder<N, C>>,
    entries: FxHashMap<N, usize>,
    sequence: u64,
}

impl<N, C> Frontier<N, C>
where
    N: Copy + Eq + Hash,
    C: Copy + Ord,
{
    pub fn new() -> Frontier<N, C> {
        Frontier {
            heap: BinaryHeap::new(),
            entries: FxHashMap::default(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, node: N, estimated_cost: C) {
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
        *self.entries.entry(node).or_insert(0) += 1;
    }

    /// Removes the entry with the smallest estimate, earliest insertion first.
    pub fn pop(&mut self) -> Option<(N, C)> {
        let SmallestCostHolder {
            estimated_cost,
            node,
            ..
        } = self.heap.pop()?;
        if let Some(count) = self.entries.get_mut(&node) {
            *count -= 1;
            if *count == 0 {
                self.entries.remove(&node);
            }
        }
        Some((node, estimated_cost))
    }

    /// Whether at least one entry for `node` is still queued.
    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Empties the frontier and restarts the insertion sequence.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.entries.clear();
        self.sequence = 0;
    }
}

impl<N, C> Default for Frontier<N, C>
where
    N: Copy + Eq + Hash,
    C: Copy + Ord,
{
    fn default() -> Frontier<N, C> {
        Frontier::new()
    }
}
