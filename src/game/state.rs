use super::board::{Board, MoveError, Outcome, Piece, Shape, WinCondition, DEFAULT_SIZE};
use super::player::Player;

/// Authoritative session state: the board plus terminal-outcome bookkeeping
/// and the shape the human has selected for their next drop.
///
/// The outcome is sticky: once set, every further drop is rejected until
/// [`reset`](Self::reset). The shape selection is independent of board state
/// and survives a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    outcome: Option<Outcome>,
    selected_shape: Shape,
}

impl GameState {
    /// Create a fresh game on an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        GameState {
            board: Board::new(size),
            outcome: None,
            selected_shape: Shape::Circle,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Piece> {
        self.board.get(row, col)
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Winner, when the game ended in a win rather than a draw.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(Outcome::Win { winner, .. }) => Some(winner),
            _ => None,
        }
    }

    /// Attribute that completed the winning run, when the game ended in a win.
    pub fn win_condition(&self) -> Option<WinCondition> {
        match self.outcome {
            Some(Outcome::Win { condition, .. }) => Some(condition),
            _ => None,
        }
    }

    pub fn selected_shape(&self) -> Shape {
        self.selected_shape
    }

    pub fn set_selected_shape(&mut self, shape: Shape) {
        self.selected_shape = shape;
    }

    /// Drop a piece and record the resulting outcome, if any.
    ///
    /// Returns the landing `(row, col)`. Fails with `GameOver` once a terminal
    /// outcome has been recorded, and with the board's own errors for bad
    /// columns.
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<(usize, usize), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let (row, col) = self.board.drop_piece(col, piece)?;
        self.outcome = self.board.check_outcome(row, col);
        Ok((row, col))
    }

    /// Clear the board and outcome; the selected shape is left alone.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.size());
        self.outcome = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}
