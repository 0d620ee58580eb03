use super::{
    CostFrontier, Diagnostics, FifoFrontier, Frontier, Outcome, SearchOptions, SearchReport,
    Solver, Strategy,
};
use crate::algorithm::{expand, goal_test};
use crate::common::{SearchTree, State};
use crate::stat::Stats;

use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Generic tree search: pops from `frontier` until a clean state comes out or
/// the frontier runs dry. With `memoize` a state is expanded at most once.
#[instrument(skip_all, name = "tree_search", fields(strategy = %strategy, start = %initial), level = "debug")]
pub(super) fn tree_search<F: Frontier>(
    strategy: Strategy,
    initial: &State,
    mut frontier: F,
    memoize: bool,
    options: &SearchOptions,
    stats: &mut Stats,
) -> SearchReport {
    let (mut tree, root) = SearchTree::with_root(initial.clone());
    frontier.push(root, tree.get(root));

    let mut visited: HashSet<State> = HashSet::new();
    let mut diagnostics = Diagnostics::default();

    let outcome = loop {
        let Some(id) = frontier.pop() else {
            debug!("frontier exhausted");
            break Outcome::Failed;
        };

        let node = tree.get(id);
        if goal_test(node) {
            debug!("goal reached at depth {} with cost {}", node.depth, node.path_cost);
            break Outcome::Solved(tree.snapshot(id));
        }

        if memoize && !visited.insert(node.state.clone()) {
            stats.revisits_skipped += 1;
            continue;
        }

        if options.budget_exhausted(stats) {
            debug!("expansion budget exhausted");
            break Outcome::Aborted;
        }

        trace!("expand node: {} cost {}", node.state, node.path_cost);
        let children = expand(&mut tree, id, options.prune_reversals);
        stats.expanded_nodes += 1;
        stats.generated_nodes += children.len();

        for child in children {
            diagnostics.record(&tree, child);
            frontier.push(child, tree.get(child));
        }
    };

    stats.frontier_remaining = frontier.len();

    SearchReport {
        strategy,
        outcome,
        stats: stats.clone(),
        first_generated: diagnostics.take(),
    }
}

/// Tree search over a first-in first-out frontier.
pub struct BreadthFirstSearch {
    initial: State,
    options: SearchOptions,
    stats: Stats,
}

impl BreadthFirstSearch {
    pub fn new(initial: State, options: SearchOptions) -> Self {
        BreadthFirstSearch {
            initial,
            options,
            stats: Stats::default(),
        }
    }
}

impl Solver for BreadthFirstSearch {
    fn solve(&mut self) -> SearchReport {
        self.stats = Stats::default();
        tree_search(
            Strategy::BreadthFirst,
            &self.initial,
            FifoFrontier::default(),
            false,
            &self.options,
            &mut self.stats,
        )
    }
}

/// Cost-ordered search, either as a plain tree search or as a graph search
/// that never expands the same state twice.
pub struct UniformCostSearch {
    initial: State,
    options: SearchOptions,
    memoize: bool,
    stats: Stats,
}

impl UniformCostSearch {
    pub fn tree(initial: State, options: SearchOptions) -> Self {
        UniformCostSearch {
            initial,
            options,
            memoize: false,
            stats: Stats::default(),
        }
    }

    pub fn graph(initial: State, options: SearchOptions) -> Self {
        UniformCostSearch {
            memoize: true,
            ..UniformCostSearch::tree(initial, options)
        }
    }
}

impl Solver for UniformCostSearch {
    fn solve(&mut self) -> SearchReport {
        self.stats = Stats::default();
        let strategy = if self.memoize {
            Strategy::UniformCostGraph
        } else {
            Strategy::UniformCostTree
        };
        tree_search(
            strategy,
            &self.initial,
            CostFrontier::default(),
            self.memoize,
            &self.options,
            &mut self.stats,
        )
    }
}
