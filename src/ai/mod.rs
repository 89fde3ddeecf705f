//! The computer player: a reactive one-ply heuristic, not a tree search.

mod greedy;

pub use greedy::{ComputerMove, GreedyAgent, NoMoveAvailable};
