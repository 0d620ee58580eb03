use crate::common::{Action, Node, NodeId, SearchTree};

use tracing::trace;

pub fn goal_test(node: &Node) -> bool {
    node.state.is_clean()
}

/// Generates the children of `id`, pushes them into `tree` and returns their
/// ids ordered by [`Node::ordering_key`].
///
/// With `prune_reversals` the move that would undo the node's own last move is
/// never generated. Once `Suck` qualifies no other action is considered.
pub fn expand(tree: &mut SearchTree, id: NodeId, prune_reversals: bool) -> Vec<NodeId> {
    let parent = tree.get(id);
    let excluded = if prune_reversals {
        parent.action.and_then(Action::opposite)
    } else {
        None
    };

    let mut children: Vec<Node> = Vec::with_capacity(Action::ALL.len());
    for action in Action::ALL {
        if Some(action) == excluded {
            continue;
        }
        let Some(state) = parent.state.perform_action(action) else {
            continue;
        };
        children.push(parent.child(id, action, state));

        if action == Action::Suck {
            break;
        }
    }

    children.sort_by(Node::cmp_by_key);
    children.dedup();
    trace!("expand {id:?}: {} children", children.len());

    children.into_iter().map(|child| tree.push(child)).collect()
}
