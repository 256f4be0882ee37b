//! Game state with an undo history: the mutable position searched by the engine.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::board::{Board, PrettyBoard};
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::{FenError, GameError};
use crate::make_move::Undo;
use crate::movegen::generate_legal_moves;
use crate::snapshot::BoardSnapshot;

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_LIMIT: u16 = 100;

/// Why a game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// The side to move has no legal moves and is not in check.
    Stalemate,
    /// A hundred halfmoves passed without a capture or pawn move.
    FiftyMoveRule,
    /// Only the two kings are left.
    InsufficientMaterial,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The given side won by checkmate.
    Win(Color),
    /// Nobody won.
    Draw(DrawReason),
}

impl Outcome {
    /// +1 for a White win, -1 for a Black win, 0 for a draw.
    pub const fn winner_sign(self) -> i32 {
        match self {
            Outcome::Win(color) => color.sign(),
            Outcome::Draw(_) => 0,
        }
    }

    /// The winning side, if any.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Win(color) => Some(color),
            Outcome::Draw(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(color) => write!(f, "{} wins!", color.name()),
            Outcome::Draw(DrawReason::Stalemate) => write!(f, "Stalemate!"),
            Outcome::Draw(DrawReason::FiftyMoveRule) => write!(f, "Draw by the fifty-move rule!"),
            Outcome::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "Draw by insufficient material!")
            }
        }
    }
}

/// A position plus the stack of moves applied to reach it.
///
/// Every [`apply_move`](Game::apply_move) pushes onto the history and every
/// [`unapply_move`](Game::unapply_move) pops the most recent entry, so moves
/// are reversed strictly last-in, first-out.
#[derive(Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    history: Vec<Undo>,
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::starting_position())
    }

    /// A new game starting from `board`, with empty history.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    /// Parse a FEN string into a new game.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_board(fen.parse()?))
    }

    /// The current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Numeric snapshot of the current board.
    #[inline]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// All legal moves for the side to move, in generator order.
    ///
    /// Empty only when the side to move is checkmated or stalemated.
    pub fn generate_legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(&self.board)
    }

    /// Decide whether the game is over, given the current legal moves.
    ///
    /// `moves` must be the output of [`generate_legal_moves`](Self::generate_legal_moves)
    /// for this position. Returns `None` while the game continues; in that
    /// case `moves` is guaranteed non-empty.
    pub fn check_terminal(&self, moves: &[Move]) -> Option<Outcome> {
        let us = self.side_to_move();
        if moves.is_empty() {
            return Some(if self.board.in_check(us) {
                Outcome::Win(!us)
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            });
        }
        if self.board.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        if self.board.only_kings() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        None
    }

    /// Apply `mv` in place, flipping the side to move.
    ///
    /// `mv` must be one of the moves generated for the current position.
    pub fn apply_move(&mut self, mv: Move) {
        trace!(%mv, "apply");
        let undo = self.board.apply(mv);
        self.history.push(undo);
    }

    /// Revert the most recently applied move and return it.
    pub fn unapply_move(&mut self) -> Result<Move, GameError> {
        let undo = self.history.pop().ok_or(GameError::EmptyHistory)?;
        self.board.revert(undo);
        trace!(mv = %undo.mv, "unapply");
        Ok(undo.mv)
    }

    /// Apply `mv` for the lifetime of the returned guard.
    ///
    /// The move is unapplied when the guard is dropped, on every exit path.
    pub fn play(&mut self, mv: Move) -> MoveGuard<'_> {
        self.apply_move(mv);
        MoveGuard { game: self }
    }

    /// Moves applied so far, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|undo| undo.mv)
    }

    /// Number of moves currently on the history stack.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// FEN string for the current position.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Grid display of the current board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        self.board.pretty()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board.pretty())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("history", &self.history.len())
            .finish()
    }
}

/// A move applied to a [`Game`] that is taken back when the guard drops.
///
/// Derefs to the game so the applied position can be searched further.
pub struct MoveGuard<'a> {
    game: &'a mut Game,
}

impl Deref for MoveGuard<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Game {
        self.game
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        // Nested guards borrow the game mutably, so the inner ones are always
        // dropped first and the top entry is ours.
        self.game
            .unapply_move()
            .expect("move guard must own the top history entry");
    }
}
