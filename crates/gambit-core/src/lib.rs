//! Core chess types: board representation, move generation, and game rules.
//!
//! [`Game`] is the mutable position the search engine explores: it generates
//! legal moves, detects finished games, applies and unapplies moves against
//! an undo history, and exposes a numeric [`BoardSnapshot`] for evaluation.

mod board;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod make_move;
mod movegen;
mod piece;
mod snapshot;
mod square;

pub mod perft;

pub use board::{Board, PrettyBoard};
pub use chess_move::Move;
pub use color::Color;
pub use error::{BoardError, FenError, GameError};
pub use fen::STARTING_FEN;
pub use game::{DrawReason, FIFTY_MOVE_LIMIT, Game, MoveGuard, Outcome};
pub use movegen::generate_legal_moves;
pub use piece::{Piece, PieceKind};
pub use snapshot::BoardSnapshot;
pub use square::Square;
