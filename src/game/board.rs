use std::fmt;

use super::Player;

/// Number of lines in each direction of the square grid.
pub const BOARD_SIZE: usize = 15;

/// Stones in an unbroken line needed to win. Overlines count.
pub const WIN_LENGTH: usize = 5;

/// The four axes a line can run along: vertical, horizontal, and both
/// diagonals. Each is walked in both directions from the anchor.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// An intersection on the board. Row 0 is the top line, column 0 the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Whether the position lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Step by `(dr, dc)`, or `None` if the result falls off the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position { row, col };
        next.in_bounds().then_some(next)
    }
}

/// Board notation: column letter `A`..`O`, then the 1-based row.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.col) {
            Ok(col) if self.col < BOARD_SIZE => {
                write!(f, "{}{}", char::from(b'A' + col), self.row + 1)
            }
            _ => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    Occupied,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Get the cell at a specific position.
    /// Panics if the coordinates are off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Put a stone on an empty intersection.
    pub fn place_stone(&mut self, pos: Position, cell: Cell) -> Result<(), MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds);
        }

        if self.cells[pos.row][pos.col] != Cell::Empty {
            return Err(MoveError::Occupied);
        }

        self.cells[pos.row][pos.col] = cell;
        Ok(())
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.stone_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// Check whether `player` has an unbroken line of at least
    /// [`WIN_LENGTH`] stones passing through `anchor`.
    ///
    /// The anchor itself always counts as one stone, so this is meant to be
    /// called with the position of the move just made. Only the four lines
    /// through the anchor are scanned.
    pub fn check_win(&self, anchor: Position, player: Player) -> bool {
        if !anchor.in_bounds() {
            return false;
        }

        let cell = player.to_cell();
        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.walk(anchor, dr, dc, cell).len()
                + self.walk(anchor, -dr, -dc, cell).len();
            count >= WIN_LENGTH
        })
    }

    /// The stones of the first winning line through `anchor`, ordered along
    /// the line, or `None` if `player` has no such line.
    pub fn winning_line(&self, anchor: Position, player: Player) -> Option<Vec<Position>> {
        if !anchor.in_bounds() {
            return None;
        }

        let cell = player.to_cell();
        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            let mut line = self.walk(anchor, -dr, -dc, cell);
            line.reverse();
            line.push(anchor);
            line.extend(self.walk(anchor, dr, dc, cell));
            (line.len() >= WIN_LENGTH).then_some(line)
        })
    }

    /// Consecutive `cell` positions stepping away from `from` by `(dr, dc)`,
    /// not including `from`.
    fn walk(&self, from: Position, dr: isize, dc: isize, cell: Cell) -> Vec<Position> {
        let mut run = Vec::new();
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            if self.cells[next.row][next.col] != cell {
                break;
            }
            run.push(next);
            current = next;
        }
        run
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
