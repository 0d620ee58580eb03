use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
    pub frontier_remaining: usize,
    pub revisits_skipped: usize,
    // Last depth limit tried; iterative deepening only.
    pub depth_limit: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Expanded nodes {:?} Generated nodes {:?} Frontier remaining {:?} Revisits skipped {:?} Depth limit {:?}",
            self.expanded_nodes,
            self.generated_nodes,
            self.frontier_remaining,
            self.revisits_skipped,
            self.depth_limit
        );
    }
}
