use std::fmt;
use std::str::FromStr;

use super::player::Player;

/// Board dimension used by the standard game.
pub const DEFAULT_SIZE: usize = 7;

/// Run length required to win on any axis.
pub const CONNECT: usize = 4;

/// The shape attribute a piece carries, independent of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Diamond];

    /// Get shape name for display
    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
        }
    }

    /// Single-character glyph for text board rendering.
    pub fn glyph(self) -> char {
        match self {
            Shape::Circle => 'o',
            Shape::Square => '#',
            Shape::Triangle => '^',
            Shape::Diamond => '*',
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(Shape::Circle),
            "square" => Ok(Shape::Square),
            "triangle" => Ok(Shape::Triangle),
            "diamond" => Ok(Shape::Diamond),
            other => Err(format!(
                "unknown shape '{other}' (expected circle, square, triangle, or diamond)"
            )),
        }
    }
}

/// A placed piece: owner plus shape, nothing else. Screen position is the
/// presentation layer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub shape: Shape,
}

impl Piece {
    pub fn new(owner: Player, shape: Shape) -> Self {
        Piece { owner, shape }
    }
}

/// Which attribute completed the winning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinCondition {
    Color,
    Shape,
}

impl WinCondition {
    pub fn name(self) -> &'static str {
        match self {
            WinCondition::Color => "color",
            WinCondition::Shape => "shape",
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win {
        winner: Player,
        condition: WinCondition,
    },
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Alignment axes through a placed cell, scanned in fixed order: horizontal,
/// vertical, diagonal down-right, diagonal down-left.
const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// An N×N grid. Row 0 is the top, row N-1 is the bottom; gravity fills each
/// column from the bottom up, so a column's occupied cells always form a
/// contiguous bottom-anchored run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Create a new empty board of the given dimension.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `size - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells[row * self.size + col]
    }

    /// Cell lookup with signed coordinates: `None` when off the board or empty.
    fn at(&self, row: i32, col: i32) -> Option<Piece> {
        if row < 0 || col < 0 || row >= self.size as i32 || col >= self.size as i32 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.size {
            return true;
        }
        self.get(0, col).is_some()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.size).all(|col| self.is_column_full(col))
    }

    /// Columns that can still accept a piece, in increasing index order.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a piece in a column, returning the `(row, col)` where it landed.
    /// Does not evaluate the outcome; callers decide when to run
    /// [`check_outcome`](Self::check_outcome).
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<(usize, usize), MoveError> {
        if col >= self.size {
            return Err(MoveError::InvalidColumn(col));
        }

        // Find the lowest empty row in this column
        for row in (0..self.size).rev() {
            if self.get(row, col).is_none() {
                self.cells[row * self.size + col] = Some(piece);
                return Ok((row, col));
            }
        }

        Err(MoveError::ColumnFull(col))
    }

    /// Evaluate the board after a piece landed at `(row, col)` — the only cell
    /// that can have completed a new alignment.
    ///
    /// Each axis is walked outward in both directions over the contiguous run
    /// of non-empty cells, tracking color and shape matches as two independent
    /// counters. A neighbor that mismatches one attribute still extends the
    /// other and never stops the walk; only the grid edge or an empty cell
    /// does. Color is checked before shape on every axis, so an alignment
    /// satisfying both reports a color win.
    pub fn check_outcome(&self, row: usize, col: usize) -> Option<Outcome> {
        let piece = self.get(row, col)?;

        for &(dr, dc) in &AXES {
            let mut color_run = 1;
            let mut shape_run = 1;

            for dir in [1i32, -1] {
                let mut r = row as i32 + dr * dir;
                let mut c = col as i32 + dc * dir;
                while let Some(neighbor) = self.at(r, c) {
                    if neighbor.owner == piece.owner {
                        color_run += 1;
                    }
                    if neighbor.shape == piece.shape {
                        shape_run += 1;
                    }
                    r += dr * dir;
                    c += dc * dir;
                }
            }

            if color_run >= CONNECT {
                return Some(Outcome::Win {
                    winner: piece.owner,
                    condition: WinCondition::Color,
                });
            }
            if shape_run >= CONNECT {
                return Some(Outcome::Win {
                    winner: piece.owner,
                    condition: WinCondition::Shape,
                });
            }
        }

        if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human(shape: Shape) -> Piece {
        Piece::new(Player::Human, shape)
    }

    fn computer(shape: Shape) -> Piece {
        Piece::new(Player::Computer, shape)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(DEFAULT_SIZE);
        for row in 0..board.size() {
            for col in 0..board.size() {
                assert_eq!(board.get(row, col), None);
            }
        }
    }

    #[test]
    fn test_drop_piece_lands_at_bottom() {
        let mut board = Board::new(7);

        let pos = board.drop_piece(3, human(Shape::Circle)).unwrap();
        assert_eq!(pos, (6, 3));
        assert_eq!(board.get(6, 3), Some(human(Shape::Circle)));

        let pos = board.drop_piece(3, computer(Shape::Square)).unwrap();
        assert_eq!(pos, (5, 3));
        assert_eq!(board.get(5, 3), Some(computer(Shape::Square)));
    }

    #[test]
    fn test_gravity_invariant_after_mixed_drops() {
        let mut board = Board::new(7);
        let columns = [3, 3, 0, 6, 3, 0, 2, 2, 2, 2, 6, 1];
        for (i, &col) in columns.iter().enumerate() {
            let shape = Shape::ALL[i % Shape::ALL.len()];
            board.drop_piece(col, human(shape)).unwrap();
        }

        // Every occupied cell must sit on the bottom row or on another piece.
        for col in 0..board.size() {
            for row in 0..board.size() - 1 {
                if board.get(row, col).is_some() {
                    assert!(
                        board.get(row + 1, col).is_some(),
                        "piece at ({row}, {col}) is floating"
                    );
                }
            }
        }
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new(7);

        for _ in 0..board.size() {
            board.drop_piece(0, human(Shape::Circle)).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(
            board.drop_piece(0, computer(Shape::Square)),
            Err(MoveError::ColumnFull(0))
        );
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new(7);
        assert_eq!(
            board.drop_piece(7, human(Shape::Circle)),
            Err(MoveError::InvalidColumn(7))
        );
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(7);
        for col in 0..board.size() {
            for _ in 0..board.size() {
                board.drop_piece(col, human(Shape::Circle)).unwrap();
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_open_columns_shrink() {
        let mut board = Board::new(7);
        assert_eq!(board.open_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        for _ in 0..board.size() {
            board.drop_piece(2, human(Shape::Circle)).unwrap();
        }
        assert_eq!(board.open_columns(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_horizontal_color_win() {
        let mut board = Board::new(7);
        for col in 0..4 {
            board.drop_piece(col, human(Shape::Circle)).unwrap();
        }
        // Check from the middle of the line
        assert_eq!(
            board.check_outcome(6, 2),
            Some(Outcome::Win {
                winner: Player::Human,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_vertical_color_win() {
        let mut board = Board::new(7);
        let mut pos = (0, 0);
        for _ in 0..4 {
            pos = board.drop_piece(3, computer(Shape::Triangle)).unwrap();
        }
        assert_eq!(pos, (3, 3));
        assert_eq!(
            board.check_outcome(3, 3),
            Some(Outcome::Win {
                winner: Player::Computer,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_color_win_with_distinct_shapes() {
        // Four same-owner pieces, all four shapes: the color run reaches 4
        // even though no shape run does.
        let mut board = Board::new(7);
        for (col, &shape) in Shape::ALL.iter().enumerate() {
            board.drop_piece(col, human(shape)).unwrap();
        }
        assert_eq!(
            board.check_outcome(6, 3),
            Some(Outcome::Win {
                winner: Player::Human,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_shape_win_with_alternating_owners() {
        // Four same-shape pieces with alternating owners: a single-attribute
        // checker that stops on owner mismatch would miss this.
        let mut board = Board::new(7);
        board.drop_piece(0, human(Shape::Diamond)).unwrap();
        board.drop_piece(1, computer(Shape::Diamond)).unwrap();
        board.drop_piece(2, human(Shape::Diamond)).unwrap();
        let (row, col) = board.drop_piece(3, computer(Shape::Diamond)).unwrap();
        assert_eq!(
            board.check_outcome(row, col),
            Some(Outcome::Win {
                winner: Player::Computer,
                condition: WinCondition::Shape,
            })
        );
    }

    #[test]
    fn test_shape_run_counts_both_directions() {
        // Last piece lands in the middle of the run: two diamonds to the left,
        // one to the right, owners mixed throughout.
        let mut board = Board::new(7);
        board.drop_piece(1, human(Shape::Diamond)).unwrap();
        board.drop_piece(2, computer(Shape::Diamond)).unwrap();
        board.drop_piece(4, human(Shape::Diamond)).unwrap();
        let (row, col) = board.drop_piece(3, computer(Shape::Diamond)).unwrap();
        assert_eq!(
            board.check_outcome(row, col),
            Some(Outcome::Win {
                winner: Player::Computer,
                condition: WinCondition::Shape,
            })
        );
    }

    #[test]
    fn test_color_takes_priority_over_shape_on_same_axis() {
        // Same owner AND same shape four in a row: both thresholds met on the
        // horizontal axis; color is reported.
        let mut board = Board::new(7);
        for col in 0..3 {
            board.drop_piece(col, human(Shape::Square)).unwrap();
        }
        let (row, col) = board.drop_piece(3, human(Shape::Square)).unwrap();
        assert_eq!(
            board.check_outcome(row, col),
            Some(Outcome::Win {
                winner: Player::Human,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let mut board = Board::new(7);
        // Staircase sloping down to the right: squares land at (3,0), (4,1),
        // (5,2), (6,3) on top of computer fillers.
        for col in 0..3 {
            for _ in 0..(3 - col) {
                board.drop_piece(col, computer(Shape::Circle)).unwrap();
            }
        }
        board.drop_piece(3, human(Shape::Square)).unwrap();
        board.drop_piece(2, human(Shape::Square)).unwrap();
        board.drop_piece(1, human(Shape::Square)).unwrap();
        let (row, col) = board.drop_piece(0, human(Shape::Square)).unwrap();
        assert_eq!(row, 3);
        assert_eq!(
            board.check_outcome(row, col),
            Some(Outcome::Win {
                winner: Player::Human,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_diagonal_down_left_win() {
        let mut board = Board::new(7);
        for col in 4..7 {
            for _ in 0..(col - 3) {
                board.drop_piece(col, computer(Shape::Circle)).unwrap();
            }
        }
        board.drop_piece(3, human(Shape::Square)).unwrap();
        board.drop_piece(4, human(Shape::Square)).unwrap();
        board.drop_piece(5, human(Shape::Square)).unwrap();
        let (row, col) = board.drop_piece(6, human(Shape::Square)).unwrap();
        assert_eq!(row, 3);
        assert_eq!(
            board.check_outcome(row, col),
            Some(Outcome::Win {
                winner: Player::Human,
                condition: WinCondition::Color,
            })
        );
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new(7);
        for col in 0..3 {
            board.drop_piece(col, human(Shape::Circle)).unwrap();
        }
        assert_eq!(board.check_outcome(6, 1), None);
    }

    #[test]
    fn test_run_stops_at_empty_cell() {
        // Gap at column 2 splits the run: o o _ o o is not a win.
        let mut board = Board::new(7);
        board.drop_piece(0, human(Shape::Circle)).unwrap();
        board.drop_piece(1, human(Shape::Circle)).unwrap();
        board.drop_piece(3, human(Shape::Circle)).unwrap();
        let (row, col) = board.drop_piece(4, human(Shape::Circle)).unwrap();
        assert_eq!(board.check_outcome(row, col), None);
    }

    #[test]
    fn test_check_outcome_on_empty_cell_is_none() {
        let board = Board::new(7);
        assert_eq!(board.check_outcome(0, 0), None);
    }

    #[test]
    fn test_draw_on_full_board_without_alignment() {
        // Fill a 7x7 board with a pattern engineered to avoid any 4-run of
        // color or shape on any axis.
        let mut board = Board::new(7);
        for col in 0..7 {
            for slot in 0..7 {
                let owner = if (slot / 2 + col) % 2 == 0 {
                    Player::Human
                } else {
                    Player::Computer
                };
                let shape = Shape::ALL[(slot * 2 + col * 3) % Shape::ALL.len()];
                board.drop_piece(col, Piece::new(owner, shape)).unwrap();
            }
        }
        assert!(board.is_full());

        // No cell anywhere may report a win; the board as a whole is a draw.
        for row in 0..7 {
            for col in 0..7 {
                let outcome = board.check_outcome(row, col);
                assert_eq!(
                    outcome,
                    Some(Outcome::Draw),
                    "unexpected outcome at ({row}, {col}): {outcome:?}"
                );
            }
        }
    }

    #[test]
    fn test_shape_parsing() {
        assert_eq!("circle".parse::<Shape>(), Ok(Shape::Circle));
        assert_eq!("DIAMOND".parse::<Shape>(), Ok(Shape::Diamond));
        assert!("hexagon".parse::<Shape>().is_err());
    }
}
