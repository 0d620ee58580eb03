use crate::scenario::Scenario;
use crate::solver::{SearchOptions, Strategy};

use anyhow::{anyhow, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Vacuum Search",
    about = "Uninformed search strategies for the vacuum world.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to a YAML scenario file")]
    pub scenario_path: Option<String>,

    #[arg(long, help = "Built-in instance to solve when no scenario is given")]
    pub instance: Option<usize>,

    #[arg(long, help = "Generate a random scenario with this many dirty cells")]
    pub random_dirt: Option<usize>,

    #[arg(long, help = "Rows of a randomly generated scenario")]
    pub rows: Option<usize>,

    #[arg(long, help = "Columns of a randomly generated scenario")]
    pub columns: Option<usize>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(
        long,
        value_enum,
        use_value_delimiter = true,
        help = "Strategies to run, comma separated"
    )]
    pub strategies: Vec<Strategy>,

    #[arg(
        long,
        help = "Allow the agent to immediately undo its last move",
        default_value_t = false
    )]
    pub no_prune_reversals: bool,

    #[arg(long, help = "Abort a strategy after expanding this many nodes")]
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scenario_path: Option<String>,
    pub instance: usize,
    pub random_dirt: Option<usize>,
    pub rows: usize,
    pub columns: usize,
    pub seed: u64,
    pub strategies: Vec<Strategy>,
    pub prune_reversals: bool,
    pub max_expansions: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scenario_path: None,
            instance: 1,
            random_dirt: None,
            rows: 4,
            columns: 5,
            seed: 0,
            strategies: vec![
                Strategy::UniformCostTree,
                Strategy::UniformCostGraph,
                Strategy::IterativeDeepening,
            ],
            prune_reversals: true,
            max_expansions: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads the config file named on the command line, if any, and applies
    /// every flag that was explicitly passed on top of it.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = if let Some(config_file) = cli.config.as_ref() {
            let config_str = std::fs::read_to_string(config_file)
                .with_context(|| format!("failed to read config file: {config_file}"))?;
            Config::from_yaml_str(&config_str)
                .with_context(|| format!("error with config file: {config_file}"))?
        } else {
            info!("No config file specified, using default config");
            Config::default()
        };
        config.override_from_command_line(cli)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(path) = &cli.scenario_path {
            self.scenario_path = Some(path.clone());
        }
        if let Some(instance) = cli.instance {
            self.instance = instance;
        }
        if let Some(dirt) = cli.random_dirt {
            self.random_dirt = Some(dirt);
        }
        if let Some(rows) = cli.rows {
            self.rows = rows;
        }
        if let Some(columns) = cli.columns {
            self.columns = columns;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if !cli.strategies.is_empty() {
            self.strategies = cli.strategies.clone();
        }
        if cli.no_prune_reversals {
            self.prune_reversals = false;
        }
        if let Some(limit) = cli.max_expansions {
            self.max_expansions = Some(limit);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.strategies.is_empty() {
            return Err(anyhow!("At least one strategy must be selected"));
        }

        if self.max_expansions == Some(0) {
            return Err(anyhow!("Expansion budget must be greater than 0"));
        }

        if let Some(dirt) = self.random_dirt {
            if self.rows == 0 || self.columns == 0 {
                return Err(anyhow!(
                    "Random grid must be at least 1x1, got {}x{}",
                    self.rows,
                    self.columns
                ));
            }
            if dirt > self.rows * self.columns {
                return Err(anyhow!(
                    "Cannot place {} dirty cells on a {}x{} grid",
                    dirt,
                    self.rows,
                    self.columns
                ));
            }
        } else if self.scenario_path.is_none() && Scenario::builtin(self.instance).is_none() {
            return Err(anyhow!("Unknown built-in instance {}", self.instance));
        }

        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            prune_reversals: self.prune_reversals,
            max_expansions: self.max_expansions,
        }
    }

    /// Scenario file first, then random generation, then the built-in instance.
    pub fn load_scenario(&self) -> anyhow::Result<Scenario> {
        if let Some(path) = &self.scenario_path {
            return Scenario::load_from_file(path);
        }

        if let Some(dirt) = self.random_dirt {
            let mut rng = StdRng::seed_from_u64(self.seed);
            return Scenario::generate_randomly(self.rows, self.columns, dirt, &mut rng);
        }

        Scenario::builtin(self.instance)
            .ok_or_else(|| anyhow!("Unknown built-in instance {}", self.instance))
    }
}
