use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Board, Outcome, Piece, Player, Shape};

/// The computer's chosen move: where to drop and which shape to place.
///
/// The shape is part of the result so a move that was simulated as winning is
/// committed with the exact shape that won the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerMove {
    pub column: usize,
    pub shape: Shape,
}

/// Requested a computer move on a full board. The caller should have detected
/// the draw first; surface this instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no column available for the computer to play")]
pub struct NoMoveAvailable;

/// Two-tier greedy move selection: take an immediate win, otherwise block the
/// human's immediate win, otherwise play a random open column.
///
/// Lookahead is exactly one ply. Forks and double threats are invisible to it
/// on purpose; that is the behavioral baseline this agent preserves. All
/// simulation happens on scratch copies of the board, so the committed game
/// state is never touched during the search.
pub struct GreedyAgent {
    rng: StdRng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for tests and reproducible games.
    pub fn seeded(seed: u64) -> Self {
        GreedyAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose the computer's move given the current board and the shape the
    /// human would drop next.
    pub fn choose_move(
        &mut self,
        board: &Board,
        human_shape: Shape,
    ) -> Result<ComputerMove, NoMoveAvailable> {
        let open = board.open_columns();
        if open.is_empty() {
            return Err(NoMoveAvailable);
        }

        // Tier 1: win now. One shape draw per probed column; the draw that
        // wins the simulation is the shape that gets committed.
        for &col in &open {
            let shape = self.random_shape();
            if Self::would_win(board, col, Piece::new(Player::Computer, shape)) {
                debug!("computer wins at column {col} with {shape}");
                return Ok(ComputerMove { column: col, shape });
            }
        }

        // Tier 2: block the human's immediate win.
        let threat = Piece::new(Player::Human, human_shape);
        for &col in &open {
            if Self::would_win(board, col, threat) {
                let shape = self.random_shape();
                debug!("computer blocks column {col}");
                return Ok(ComputerMove { column: col, shape });
            }
        }

        // Fallback: uniform over open columns.
        let column = open[self.rng.random_range(0..open.len())];
        let shape = self.random_shape();
        debug!("computer plays random column {column}");
        Ok(ComputerMove { column, shape })
    }

    fn random_shape(&mut self) -> Shape {
        Shape::ALL[self.rng.random_range(0..Shape::ALL.len())]
    }

    /// Would dropping `piece` into `col` win the game for its owner?
    /// Runs on a scratch copy; the caller's board is untouched.
    fn would_win(board: &Board, col: usize, piece: Piece) -> bool {
        let mut scratch = board.clone();
        match scratch.drop_piece(col, piece) {
            Ok((row, col)) => matches!(
                scratch.check_outcome(row, col),
                Some(Outcome::Win { winner, .. }) if winner == piece.owner
            ),
            Err(_) => false,
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}
