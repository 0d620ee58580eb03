use vacuum_search::config::{Cli, Config};
use vacuum_search::solver::Outcome;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = Config::load(&cli)?;
    let scenario = config.load_scenario()?;
    let initial = scenario.to_state()?;
    info!("Initial state {initial} on a {}x{} floor", initial.rows(), initial.columns());

    for &strategy in &config.strategies {
        // Each strategy gets its own copy of the initial state.
        let mut solver = strategy.build(initial.clone(), config.search_options());
        let report = solver.solve();

        match &report.outcome {
            Outcome::Solved(solution) => {
                assert!(solution.verify(&initial));
                info!(
                    "{strategy}: solved with cost {} at depth {}: {}",
                    solution.path_cost,
                    solution.depth,
                    solution.actions_string()
                );
            }
            Outcome::Failed => error!("{strategy}: no solution"),
            Outcome::Aborted => warn!("{strategy}: expansion budget exhausted"),
        }
        report.stats.print();

        for node in &report.first_generated {
            debug!(
                "{strategy}: early node {} g = {} [{}]",
                node.state,
                node.path_cost,
                node.actions_string()
            );
        }
    }

    Ok(())
}
