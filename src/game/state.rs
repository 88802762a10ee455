use super::board::{self, Board, Position};
use super::Player;

/// What an accepted placement did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The stone was placed and the turn passed to the other player.
    Continue,
    /// The stone completed a line; the placing player won.
    Win,
}

/// Why a placement was rejected. A rejected placement never changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    Occupied,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    last_move: Option<Position>,
    game_over: bool,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Black, // Black starts
            last_move: None,
            game_over: false,
        }
    }

    /// Get current player. Once the game is over this is the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The most recently placed stone, if any
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The winner, once the game is over
    pub fn winner(&self) -> Option<Player> {
        self.game_over.then_some(self.current_player)
    }

    /// Stones of the line that ended the game
    pub fn winning_line(&self) -> Option<Vec<Position>> {
        let anchor = self.last_move?;
        let winner = self.winner()?;
        self.board.winning_line(anchor, winner)
    }

    /// Number of stones placed so far
    pub fn move_count(&self) -> usize {
        self.board.stone_count()
    }

    /// Place a stone for the current player at `(row, col)`.
    ///
    /// On error nothing changes. On success the move is recorded as the last
    /// move and either ends the game (the turn stays with the winner) or
    /// hands the turn to the other player.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Placement, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }

        let pos = Position::new(row, col);
        self.board
            .place_stone(pos, self.current_player.to_cell())
            .map_err(|e| match e {
                board::MoveError::OutOfBounds => MoveError::OutOfBounds,
                board::MoveError::Occupied => MoveError::Occupied,
            })?;
        self.last_move = Some(pos);

        if self.board.check_win(pos, self.current_player) {
            self.game_over = true;
            Ok(Placement::Win)
        } else {
            self.current_player = self.current_player.other();
            Ok(Placement::Continue)
        }
    }

    /// Start over from an empty board with Black to move
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
