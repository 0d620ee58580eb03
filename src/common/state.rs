use super::Action;

use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 1-based `(row, column)` coordinate.
pub type Position = (usize, usize);

/// Immutable snapshot of the vacuum world.
///
/// Two states are equal when the agent stands on the same cell and the same
/// cells are dirty; the grid size is fixed for a run and is not compared.
#[derive(Debug, Clone)]
pub struct State {
    rows: usize,
    columns: usize,
    agent: Position,
    dirty: BTreeSet<Position>,
}

impl State {
    pub fn new(
        rows: usize,
        columns: usize,
        agent: Position,
        dirty: impl IntoIterator<Item = Position>,
    ) -> Result<Self> {
        if rows == 0 || columns == 0 {
            bail!("Grid must have at least one row and one column, got {rows}x{columns}");
        }

        let state = State {
            rows,
            columns,
            agent,
            dirty: dirty.into_iter().collect(),
        };

        if !state.contains(agent) {
            bail!("Agent position {agent:?} is outside the {rows}x{columns} grid");
        }
        if let Some(cell) = state.dirty.iter().find(|&&cell| !state.contains(cell)) {
            bail!("Dirty cell {cell:?} is outside the {rows}x{columns} grid");
        }

        Ok(state)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn dirty(&self) -> &BTreeSet<Position> {
        &self.dirty
    }

    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty()
    }

    pub fn contains(&self, (row, col): Position) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.columns).contains(&col)
    }

    pub fn is_action_possible(&self, action: Action) -> bool {
        let (row, col) = self.agent;
        match action {
            Action::Left => col != 1,
            Action::Right => col != self.columns,
            Action::Up => row != 1,
            Action::Down => row != self.rows,
            Action::Suck => self.dirty.contains(&self.agent),
        }
    }

    /// Returns the state reached by taking `action`, or `None` if the action
    /// is not possible here. `self` is left untouched.
    pub fn perform_action(&self, action: Action) -> Option<State> {
        if !self.is_action_possible(action) {
            return None;
        }

        let mut next = self.clone();
        let (row, col) = self.agent;
        match action {
            Action::Left => next.agent = (row, col - 1),
            Action::Right => next.agent = (row, col + 1),
            Action::Up => next.agent = (row - 1, col),
            Action::Down => next.agent = (row + 1, col),
            Action::Suck => {
                next.dirty.remove(&self.agent);
            }
        }
        Some(next)
    }

    /// Applies `actions` in order, failing on the first impossible one.
    pub fn replay<'a>(&self, actions: impl IntoIterator<Item = &'a Action>) -> Option<State> {
        actions
            .into_iter()
            .try_fold(self.clone(), |state, &action| state.perform_action(action))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.agent == other.agent && self.dirty == other.dirty
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.agent.hash(state);
        self.dirty.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[V{:?}", self.agent)?;
        for cell in &self.dirty {
            write!(f, ", d{cell:?}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_1() -> State {
        State::new(4, 5, (2, 2), [(1, 2), (2, 4), (3, 5)]).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert!(State::new(0, 5, (1, 1), []).is_err());
        assert!(State::new(4, 5, (5, 1), []).is_err());
        assert!(State::new(4, 5, (0, 1), []).is_err());
        assert!(State::new(4, 5, (1, 1), [(4, 6)]).is_err());
        assert!(State::new(1, 1, (1, 1), []).is_ok());
    }

    #[test]
    fn test_actions_blocked_at_walls() {
        let corner = State::new(4, 5, (1, 1), []).unwrap();
        assert!(!corner.is_action_possible(Action::Left));
        assert!(!corner.is_action_possible(Action::Up));
        assert!(corner.is_action_possible(Action::Right));
        assert!(corner.is_action_possible(Action::Down));
        assert!(!corner.is_action_possible(Action::Suck));

        let opposite = State::new(4, 5, (4, 5), [(4, 5)]).unwrap();
        assert!(!opposite.is_action_possible(Action::Right));
        assert!(!opposite.is_action_possible(Action::Down));
        assert!(opposite.is_action_possible(Action::Suck));
    }

    #[test]
    fn test_perform_action_does_not_mutate_input() {
        let state = instance_1();
        let moved = state.perform_action(Action::Up).unwrap();

        assert_eq!(state.agent(), (2, 2));
        assert_eq!(moved.agent(), (1, 2));

        let cleaned = moved.perform_action(Action::Suck).unwrap();
        assert_eq!(moved.dirty().len(), 3);
        assert_eq!(cleaned.dirty().len(), 2);
        assert!(!cleaned.dirty().contains(&(1, 2)));
    }

    #[test]
    fn test_impossible_action_is_rejected() {
        let state = instance_1();
        assert!(state.perform_action(Action::Suck).is_none());

        let corner = State::new(1, 1, (1, 1), []).unwrap();
        for action in Action::ALL {
            assert!(corner.perform_action(action).is_none());
        }
    }

    #[test]
    fn test_replay() {
        let state = instance_1();
        let end = state
            .replay(&[Action::Up, Action::Suck, Action::Down, Action::Right])
            .unwrap();
        assert_eq!(end.agent(), (2, 3));
        assert_eq!(end.dirty().len(), 2);

        assert!(state.replay(&[Action::Up, Action::Up]).is_none());
    }

    #[test]
    fn test_equality_ignores_history() {
        let state = instance_1();
        let there_and_back = state.replay(&[Action::Up, Action::Down]).unwrap();
        assert_eq!(state, there_and_back);
        assert_eq!(state.to_string(), "[V(2, 2), d(1, 2), d(2, 4), d(3, 5)]");
    }
}
