use super::{Action, Cost, State};

use std::cmp::Ordering;

/// Index of a node inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

// Search tree node. The action sequence is recovered by walking `parent`
// links through the arena, so a node only stores the action that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub state: State,
    pub action: Option<Action>,
    pub path_cost: Cost,
    pub depth: usize,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn root(state: State) -> Self {
        Node {
            state,
            action: None,
            path_cost: Cost::ZERO,
            depth: 0,
            parent: None,
        }
    }

    pub(crate) fn child(&self, parent: NodeId, action: Action, state: State) -> Self {
        Node {
            state,
            action: Some(action),
            path_cost: self.path_cost + action.cost(),
            depth: self.depth + 1,
            parent: Some(parent),
        }
    }

    /// Frontier ordering key: path cost, then agent row, then agent column.
    pub fn ordering_key(&self) -> (Cost, usize, usize) {
        let (row, col) = self.state.agent();
        (self.path_cost, row, col)
    }

    pub fn cmp_by_key(&self, other: &Self) -> Ordering {
        self.ordering_key().cmp(&other.ordering_key())
    }
}

/// Arena holding every node of one search run.
///
/// Parents are always pushed before their children, so every parent index is
/// smaller than its child's index and the links cannot form a cycle.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn with_root(state: State) -> (Self, NodeId) {
        let mut tree = SearchTree::default();
        let root = tree.push(Node::root(state));
        (tree, root)
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node pushed at or after `len`. Used by depth-first
    /// strategies to discard a finished subtree.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn actions(&self, id: NodeId) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.get(id).depth);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = node.action {
                actions.push(action);
            }
            current = node.parent;
        }
        actions.reverse();
        actions
    }

    pub fn snapshot(&self, id: NodeId) -> NodeSnapshot {
        let node = self.get(id);
        NodeSnapshot {
            state: node.state.clone(),
            actions: self.actions(id),
            path_cost: node.path_cost,
            depth: node.depth,
        }
    }
}

/// A node detached from its arena: the state reached, how it was reached and
/// what it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub state: State,
    pub actions: Vec<Action>,
    pub path_cost: Cost,
    pub depth: usize,
}

impl NodeSnapshot {
    /// Replays the actions from `initial` and checks that they reproduce this
    /// snapshot's state, cost and depth.
    pub fn verify(&self, initial: &State) -> bool {
        let cost = self
            .actions
            .iter()
            .fold(Cost::ZERO, |acc, action| acc + action.cost());

        initial.replay(&self.actions).is_some_and(|state| state == self.state)
            && cost == self.path_cost
            && self.actions.len() == self.depth
    }

    pub fn actions_string(&self) -> String {
        self.actions
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        State::new(3, 3, (2, 2), [(1, 2)]).unwrap()
    }

    #[test]
    fn test_actions_follow_parent_chain() {
        let (mut tree, root) = SearchTree::with_root(state());

        let up_state = tree.get(root).state.perform_action(Action::Up).unwrap();
        let up = tree.get(root).child(root, Action::Up, up_state);
        let up = tree.push(up);

        let suck_state = tree.get(up).state.perform_action(Action::Suck).unwrap();
        let suck = tree.get(up).child(up, Action::Suck, suck_state);
        let suck = tree.push(suck);

        assert!(tree.actions(root).is_empty());
        assert_eq!(tree.actions(suck), vec![Action::Up, Action::Suck]);

        let snapshot = tree.snapshot(suck);
        assert_eq!(snapshot.depth, 2);
        assert_eq!(snapshot.path_cost, Cost::from_tenths(14));
        assert!(snapshot.state.is_clean());
        assert!(snapshot.verify(&state()));
        assert_eq!(snapshot.actions_string(), "UP SUCK");
    }

    #[test]
    fn test_verify_rejects_wrong_cost() {
        let (mut tree, root) = SearchTree::with_root(state());
        let up_state = tree.get(root).state.perform_action(Action::Up).unwrap();
        let up = tree.get(root).child(root, Action::Up, up_state);
        let up = tree.push(up);

        let mut snapshot = tree.snapshot(up);
        snapshot.path_cost = Cost::from_tenths(7);
        assert!(!snapshot.verify(&state()));
    }

    #[test]
    fn test_ordering_key_breaks_ties_by_position() {
        let a = Node::root(State::new(3, 3, (2, 1), []).unwrap());
        let b = Node::root(State::new(3, 3, (1, 3), []).unwrap());
        let c = Node::root(State::new(3, 3, (2, 3), []).unwrap());
        assert_eq!(b.cmp_by_key(&a), Ordering::Less);
        assert_eq!(a.cmp_by_key(&c), Ordering::Less);

        let mut costly = Node::root(State::new(3, 3, (1, 1), []).unwrap());
        costly.path_cost = Cost::from_tenths(6);
        assert_eq!(a.cmp_by_key(&costly), Ordering::Less);
    }

    #[test]
    fn test_truncate_drops_subtree() {
        let (mut tree, root) = SearchTree::with_root(state());
        let mark = tree.len();
        let down_state = tree.get(root).state.perform_action(Action::Down).unwrap();
        let down = tree.get(root).child(root, Action::Down, down_state);
        tree.push(down);
        assert_eq!(tree.len(), 2);
        tree.truncate(mark);
        assert_eq!(tree.len(), 1);
    }
}
