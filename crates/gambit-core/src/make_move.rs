//! In-place move application and its exact inverse.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// Everything needed to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) mv: Move,
    moved: Piece,
    captured: Option<Piece>,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

/// Square of the piece removed by `mv`, which differs from the destination
/// only for en passant.
fn capture_square(mv: Move) -> Square {
    if mv.is_en_passant() {
        Square::from_coords_unchecked(mv.from().rank(), mv.to().file())
    } else {
        mv.to()
    }
}

impl Board {
    /// Apply `mv` in place and return the record that reverses it.
    ///
    /// # Panics
    ///
    /// Panics if the origin square is empty. Moves come from the legal move
    /// generator, so this only fires on a caller bug.
    pub(crate) fn apply(&mut self, mv: Move) -> Undo {
        let moved = self
            .take(mv.from())
            .expect("move origin must hold a piece");
        let captured = if mv.is_capture() {
            self.take(capture_square(mv))
        } else {
            None
        };

        let undo = Undo {
            mv,
            moved,
            captured,
            en_passant: self.en_passant(),
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
        };

        let placed = match mv.promotion() {
            Some(kind) => Piece::new(kind, moved.color),
            None => moved,
        };
        self.put(mv.to(), placed);

        let is_pawn = moved.kind == PieceKind::Pawn;
        let ep_target = if is_pawn && mv.is_double_push() {
            mv.from().offset(moved.color.forward(), 0)
        } else {
            None
        };
        self.set_en_passant(ep_target);

        if is_pawn || captured.is_some() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(undo.halfmove_clock.saturating_add(1));
        }
        if moved.color == Color::Black {
            self.set_fullmove_number(undo.fullmove_number.saturating_add(1));
        }
        self.set_side_to_move(!moved.color);

        undo
    }

    /// Restore the board to the state before the move recorded in `undo`.
    pub(crate) fn revert(&mut self, undo: Undo) {
        let mv = undo.mv;
        self.take(mv.to());
        self.put(mv.from(), undo.moved);
        if let Some(captured) = undo.captured {
            self.put(capture_square(mv), captured);
        }
        self.set_en_passant(undo.en_passant);
        self.set_halfmove_clock(undo.halfmove_clock);
        self.set_fullmove_number(undo.fullmove_number);
        self.set_side_to_move(undo.moved.color);
    }
}
