use crate::common::{Position, State};

use anyhow::{bail, Context, Result};
use rand::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use tracing::info;

/// A vacuum world instance as written in a YAML file:
///
/// ```yaml
/// rows: 4
/// columns: 5
/// agent: [2, 2]
/// dirty: [[1, 2], [2, 4], [3, 5]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    pub rows: usize,
    pub columns: usize,
    pub agent: Position,
    #[serde(default)]
    pub dirty: Vec<Position>,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {path}"))?;
        Ok(scenario)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The two reference instances on a 4x5 floor.
    pub fn builtin(instance: usize) -> Option<Self> {
        match instance {
            1 => Some(Scenario {
                rows: 4,
                columns: 5,
                agent: (2, 2),
                dirty: vec![(1, 2), (2, 4), (3, 5)],
            }),
            2 => Some(Scenario {
                rows: 4,
                columns: 5,
                agent: (3, 2),
                dirty: vec![(1, 2), (2, 1), (2, 4), (3, 3)],
            }),
            _ => None,
        }
    }

    /// Places the agent and `dirt` distinct dirty cells uniformly at random.
    pub fn generate_randomly<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        dirt: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if dirt > rows * columns {
            bail!(
                "Cannot place {dirt} dirty cells on a {rows}x{columns} grid"
            );
        }

        let cells: Vec<Position> = (1..=rows)
            .flat_map(|row| (1..=columns).map(move |col| (row, col)))
            .collect();
        let Some(&agent) = cells.choose(rng) else {
            bail!("Grid must have at least one cell, got {rows}x{columns}");
        };
        let mut dirty: Vec<Position> = cells.choose_multiple(rng, dirt).copied().collect();
        dirty.sort();

        let scenario = Scenario {
            rows,
            columns,
            agent,
            dirty,
        };
        info!("Generate scenario: {scenario:?}");
        Ok(scenario)
    }

    pub fn to_state(&self) -> Result<State> {
        State::new(self.rows, self.columns, self.agent, self.dirty.iter().copied())
    }
}
