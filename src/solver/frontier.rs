use crate::common::{Cost, Node, NodeId};

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// Working set of nodes a tree search has generated but not yet examined.
pub trait Frontier {
    fn push(&mut self, id: NodeId, node: &Node);
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out frontier, giving breadth-first order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, id: NodeId, _node: &Node) {
        self.queue.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct CostEntry {
    key: (Cost, usize, usize),
    // Insertion order; equal keys leave in the order they arrived.
    sequence: u64,
    id: NodeId,
}

impl Ord for CostEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for CostEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier popping the node with the lowest
/// `(path cost, agent row, agent column)` first.
#[derive(Debug, Default)]
pub struct CostFrontier {
    heap: BinaryHeap<Reverse<CostEntry>>,
    pushed: u64,
}

impl Frontier for CostFrontier {
    fn push(&mut self, id: NodeId, node: &Node) {
        self.heap.push(Reverse(CostEntry {
            key: node.ordering_key(),
            sequence: self.pushed,
            id,
        }));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(entry)| entry.id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
