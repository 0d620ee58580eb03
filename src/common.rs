mod action;
mod node;
mod state;

pub use action::{Action, Cost};
pub use node::{Node, NodeId, NodeSnapshot, SearchTree};
pub use state::{Position, State};
