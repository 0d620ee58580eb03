mod frontier;
mod iterative_deepening;
mod tree_search;

pub use frontier::{CostFrontier, FifoFrontier, Frontier};
pub use iterative_deepening::IterativeDeepeningSearch;
pub use tree_search::{BreadthFirstSearch, UniformCostSearch};

use crate::common::{NodeId, NodeSnapshot, SearchTree, State};
use crate::stat::Stats;

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Number of early nodes kept for diagnostics.
pub const DIAGNOSTIC_CAPACITY: usize = 5;

pub trait Solver {
    fn solve(&mut self) -> SearchReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BreadthFirst,
    UniformCostTree,
    UniformCostGraph,
    IterativeDeepening,
}

impl Strategy {
    pub fn build(self, initial: State, options: SearchOptions) -> Box<dyn Solver> {
        match self {
            Strategy::BreadthFirst => Box::new(BreadthFirstSearch::new(initial, options)),
            Strategy::UniformCostTree => Box::new(UniformCostSearch::tree(initial, options)),
            Strategy::UniformCostGraph => Box::new(UniformCostSearch::graph(initial, options)),
            Strategy::IterativeDeepening => {
                Box::new(IterativeDeepeningSearch::new(initial, options))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::UniformCostTree => "uniform-cost-tree",
            Strategy::UniformCostGraph => "uniform-cost-graph",
            Strategy::IterativeDeepening => "iterative-deepening",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Never generate the move that undoes the previous move.
    pub prune_reversals: bool,
    /// Stop with [`Outcome::Aborted`] once this many nodes have been expanded.
    pub max_expansions: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            prune_reversals: true,
            max_expansions: None,
        }
    }
}

impl SearchOptions {
    pub(crate) fn budget_exhausted(&self, stats: &Stats) -> bool {
        self.max_expansions
            .is_some_and(|limit| stats.expanded_nodes >= limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(NodeSnapshot),
    /// Every reachable node was examined without finding a clean state.
    Failed,
    /// The expansion budget ran out first.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub outcome: Outcome,
    pub stats: Stats,
    pub first_generated: Vec<NodeSnapshot>,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&NodeSnapshot> {
        match &self.outcome {
            Outcome::Solved(node) => Some(node),
            Outcome::Failed | Outcome::Aborted => None,
        }
    }
}

/// Run-scoped record of the first few nodes a strategy generates.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    nodes: Vec<NodeSnapshot>,
}

impl Diagnostics {
    pub(crate) fn is_full(&self) -> bool {
        self.nodes.len() >= DIAGNOSTIC_CAPACITY
    }

    pub(crate) fn record(&mut self, tree: &SearchTree, id: NodeId) {
        if !self.is_full() {
            self.nodes.push(tree.snapshot(id));
        }
    }

    pub(crate) fn take(&mut self) -> Vec<NodeSnapshot> {
        std::mem::take(&mut self.nodes)
    }
}
