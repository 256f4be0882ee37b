//! Mailbox board: piece placement, side to move, en passant, and move counters.

use std::fmt;

use crate::color::Color;
use crate::error::BoardError;
use crate::piece::{Piece, PieceKind};
use crate::snapshot::BoardSnapshot;
use crate::square::Square;

pub(crate) const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub(crate) const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Complete position state, one optional piece per square.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Board {
    /// An empty board with White to move. Used by FEN parsing.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; Square::COUNT],
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, kind) in (0u8..).zip(BACK_RANK) {
            board.put(Square::from_coords_unchecked(0, file), Piece::new(kind, Color::White));
            board.put(Square::from_coords_unchecked(1, file), Piece::new(PieceKind::Pawn, Color::White));
            board.put(Square::from_coords_unchecked(6, file), Piece::new(PieceKind::Pawn, Color::Black));
            board.put(Square::from_coords_unchecked(7, file), Piece::new(kind, Color::Black));
        }
        board
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Iterate over occupied squares and their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|piece| (sq, piece)))
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Return the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Return the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Return the square of the given side's king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }

    /// Check if `sq` is attacked by any piece of `by`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let holds = |target: Option<Square>, kinds: &[PieceKind]| {
            target
                .and_then(|t| self.piece_on(t))
                .is_some_and(|p| p.color == by && kinds.contains(&p.kind))
        };

        // A pawn of `by` attacks `sq` from one rank behind it (from `by`'s view).
        let back = -by.forward();
        if holds(sq.offset(back, -1), &[PieceKind::Pawn]) || holds(sq.offset(back, 1), &[PieceKind::Pawn]) {
            return true;
        }

        if KNIGHT_STEPS
            .iter()
            .any(|&(dr, df)| holds(sq.offset(dr, df), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_STEPS
            .iter()
            .any(|&(dr, df)| holds(sq.offset(dr, df), &[PieceKind::King]))
        {
            return true;
        }

        let slider_hits = |rays: &[(i8, i8)], kinds: &[PieceKind]| {
            rays.iter().any(|&(dr, df)| {
                let mut cursor = sq.offset(dr, df);
                while let Some(t) = cursor {
                    if let Some(piece) = self.piece_on(t) {
                        return piece.color == by && kinds.contains(&piece.kind);
                    }
                    cursor = t.offset(dr, df);
                }
                false
            })
        };

        slider_hits(&ROOK_RAYS, &[PieceKind::Rook, PieceKind::Queen])
            || slider_hits(&BISHOP_RAYS, &[PieceKind::Bishop, PieceKind::Queen])
    }

    /// Return `true` if the given side's king is attacked.
    ///
    /// A side without a king is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, !color))
    }

    /// Return `true` if only the two kings remain.
    pub fn only_kings(&self) -> bool {
        self.pieces().all(|(_, piece)| piece.kind == PieceKind::King)
    }

    /// Numeric snapshot of the board for evaluation.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [[0; 8]; 8];
        for (sq, piece) in self.pieces() {
            cells[sq.rank() as usize][sq.file() as usize] = piece.value();
        }
        BoardSnapshot::new(cells)
    }

    /// Validate board consistency.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .pieces()
                .filter(|(_, piece)| *piece == Piece::new(PieceKind::King, color))
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        if self
            .pieces()
            .any(|(sq, piece)| piece.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7))
        {
            return Err(BoardError::PawnsOnBackRank);
        }

        if self.in_check(!self.side_to_move) {
            return Err(BoardError::OpponentInCheck);
        }

        Ok(())
    }

    /// Return a wrapper that displays the board as an 8x8 grid.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::new(rank, file)
                    .and_then(|sq| board.piece_on(sq))
                    .map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
