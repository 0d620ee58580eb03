use super::{Diagnostics, Outcome, SearchOptions, SearchReport, Solver, Strategy};
use crate::algorithm::{expand, goal_test};
use crate::common::{NodeId, SearchTree, State};
use crate::stat::Stats;

use tracing::{debug, instrument, trace};

/// Result of one depth-limited pass below a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DepthLimited {
    Found(NodeId),
    /// The limit was hit somewhere below; a deeper pass may still succeed.
    Cutoff,
    /// The subtree was exhausted without touching the limit.
    Failure,
    Aborted,
}

/// Repeated depth-limited search with limits 0, 1, 2, ... until a pass ends
/// in anything other than a cutoff.
pub struct IterativeDeepeningSearch {
    initial: State,
    options: SearchOptions,
    stats: Stats,
    diagnostics: Diagnostics,
}

impl IterativeDeepeningSearch {
    pub fn new(initial: State, options: SearchOptions) -> Self {
        IterativeDeepeningSearch {
            initial,
            options,
            stats: Stats::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    // Nodes of a finished subtree are truncated from the arena, so it only ever
    // holds the current path plus the pending siblings along it.
    pub(crate) fn depth_limited(
        &mut self,
        tree: &mut SearchTree,
        id: NodeId,
        limit: usize,
    ) -> DepthLimited {
        self.diagnostics.record(tree, id);

        let node = tree.get(id);
        if goal_test(node) {
            return DepthLimited::Found(id);
        }
        if node.depth == limit {
            return DepthLimited::Cutoff;
        }
        if self.options.budget_exhausted(&self.stats) {
            return DepthLimited::Aborted;
        }

        let mark = tree.len();
        let children = expand(tree, id, self.options.prune_reversals);
        self.stats.expanded_nodes += 1;
        self.stats.generated_nodes += children.len();

        let mut cutoff = false;
        for child in children {
            match self.depth_limited(tree, child, limit) {
                DepthLimited::Found(goal) => return DepthLimited::Found(goal),
                DepthLimited::Cutoff => cutoff = true,
                DepthLimited::Failure => {}
                DepthLimited::Aborted => return DepthLimited::Aborted,
            }
        }
        tree.truncate(mark);

        if cutoff {
            DepthLimited::Cutoff
        } else {
            DepthLimited::Failure
        }
    }
}

impl Solver for IterativeDeepeningSearch {
    #[instrument(skip_all, name = "iterative_deepening", fields(start = %self.initial), level = "debug")]
    fn solve(&mut self) -> SearchReport {
        self.stats = Stats::default();
        self.diagnostics = Diagnostics::default();

        let mut limit = 0;
        let outcome = loop {
            let (mut tree, root) = SearchTree::with_root(self.initial.clone());
            self.stats.depth_limit = limit;

            match self.depth_limited(&mut tree, root, limit) {
                DepthLimited::Found(goal) => {
                    debug!("goal reached with depth limit {limit}");
                    break Outcome::Solved(tree.snapshot(goal));
                }
                DepthLimited::Cutoff => {
                    trace!("cutoff at depth limit {limit}");
                    limit += 1;
                }
                DepthLimited::Failure => {
                    debug!("no solution below depth limit {limit}");
                    break Outcome::Failed;
                }
                DepthLimited::Aborted => {
                    debug!("expansion budget exhausted at depth limit {limit}");
                    break Outcome::Aborted;
                }
            }
        };

        SearchReport {
            strategy: Strategy::IterativeDeepening,
            outcome,
            stats: self.stats.clone(),
            first_generated: self.diagnostics.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Action, Node};
    use crate::solver::test_support::*;
    use crate::solver::{BreadthFirstSearch, UniformCostSearch, DIAGNOSTIC_CAPACITY};

    #[test]
    fn test_iterative_deepening_instance_1() {
        init_tracing();
        let report = IterativeDeepeningSearch::new(instance_1(), SearchOptions::default()).solve();

        let solution = report.solution().unwrap();
        assert!(solution.state.is_clean());
        assert!(solution.verify(&instance_1()));
        // Six moves cover the three dirty cells, plus one suck each.
        assert_eq!(solution.depth, 9);
        assert_eq!(report.stats.depth_limit, 9);
        assert!(report.stats.expanded_nodes > 0);
        assert!(report.stats.generated_nodes > report.stats.expanded_nodes);
        assert_eq!(report.first_generated.len(), DIAGNOSTIC_CAPACITY);
    }

    #[test]
    fn test_cost_not_below_uniform_cost() {
        let deepening =
            IterativeDeepeningSearch::new(instance_1(), SearchOptions::default()).solve();
        let uniform = UniformCostSearch::tree(instance_1(), SearchOptions::default()).solve();

        assert!(deepening.solution().unwrap().path_cost >= uniform.solution().unwrap().path_cost);
    }

    #[test]
    fn test_depth_matches_breadth_first() {
        let initial = State::new(3, 3, (2, 2), [(1, 1), (3, 3)]).unwrap();
        let deepening =
            IterativeDeepeningSearch::new(initial.clone(), SearchOptions::default()).solve();
        let breadth = BreadthFirstSearch::new(initial.clone(), SearchOptions::default()).solve();

        assert_eq!(
            deepening.solution().unwrap().depth,
            breadth.solution().unwrap().depth
        );
    }

    #[test]
    fn test_diagnostics_reset_between_runs() {
        let mut search = IterativeDeepeningSearch::new(instance_1(), SearchOptions::default());
        let first = search.solve();
        let second = search.solve();

        assert_eq!(first.first_generated, second.first_generated);
        assert_eq!(first.stats.expanded_nodes, second.stats.expanded_nodes);
        // Limit 0 records the root, limit 1 records it again before its children.
        assert_eq!(first.first_generated[0].depth, 0);
        assert_eq!(first.first_generated[1].depth, 0);
        assert_eq!(first.first_generated[2].depth, 1);
    }

    #[test]
    fn test_dead_end_is_failure_not_cutoff() {
        // In a 1x2 corridor, after moving RIGHT the only move left is the
        // pruned LEFT, so the subtree is empty.
        let initial = State::new(1, 2, (1, 1), [(1, 1)]).unwrap();
        let mut search = IterativeDeepeningSearch::new(initial.clone(), SearchOptions::default());
        let (mut tree, root) = SearchTree::with_root(initial);

        let moved = tree.get(root).state.perform_action(Action::Right).unwrap();
        let mut node = Node::root(moved);
        node.action = Some(Action::Right);
        node.depth = 1;
        node.parent = Some(root);
        let dead_end = tree.push(node);

        assert_eq!(
            search.depth_limited(&mut tree, dead_end, 5),
            DepthLimited::Failure
        );
        assert_eq!(
            search.depth_limited(&mut tree, dead_end, 1),
            DepthLimited::Cutoff
        );
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_budget_aborts_deepening() {
        let options = SearchOptions {
            max_expansions: Some(10),
            ..SearchOptions::default()
        };
        let report = IterativeDeepeningSearch::new(instance_2(), options).solve();

        assert_eq!(report.outcome, Outcome::Aborted);
        assert_eq!(report.stats.expanded_nodes, 10);
    }
}
