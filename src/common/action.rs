use std::fmt;
use std::ops::Add;

/// Path cost in tenths of a unit, so that sums stay exact and totally ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u32);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub const fn from_tenths(tenths: u32) -> Self {
        Cost(tenths)
    }

    pub fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0 + rhs.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Suck,
    Down,
    Up,
    Right,
    Left,
}

impl Action {
    /// Every action in declared order. Expansion walks this order, so `Suck`
    /// comes first and shadows all moves whenever it is possible.
    pub const ALL: [Action; 5] = [
        Action::Suck,
        Action::Down,
        Action::Up,
        Action::Right,
        Action::Left,
    ];

    pub fn cost(self) -> Cost {
        match self {
            Action::Suck => Cost(6),
            Action::Down => Cost(7),
            Action::Up => Cost(8),
            Action::Right => Cost(9),
            Action::Left => Cost(10),
        }
    }

    /// The move that undoes this one. `Suck` has none.
    pub fn opposite(self) -> Option<Action> {
        match self {
            Action::Suck => None,
            Action::Down => Some(Action::Up),
            Action::Up => Some(Action::Down),
            Action::Right => Some(Action::Left),
            Action::Left => Some(Action::Right),
        }
    }

    pub fn is_move(self) -> bool {
        self != Action::Suck
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Suck => "SUCK",
            Action::Down => "DOWN",
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Left => "LEFT",
        };
        f.write_str(name)
    }
}
