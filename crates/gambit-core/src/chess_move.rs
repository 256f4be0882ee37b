//! Move representation.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

/// One legal transition between positions.
///
/// A move is produced by [`Game::generate_legal_moves`](crate::Game::generate_legal_moves)
/// and handed back to the game unmodified. Equality is by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    capture: bool,
    en_passant: bool,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Create a quiet move or capture.
    pub const fn new(from: Square, to: Square, capture: bool) -> Move {
        Move {
            from,
            to,
            capture,
            en_passant: false,
            promotion: None,
        }
    }

    /// Create an en passant capture. `to` is the square the pawn lands on.
    pub const fn new_en_passant(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            capture: true,
            en_passant: true,
            promotion: None,
        }
    }

    /// Create a promotion, optionally capturing.
    pub const fn new_promotion(from: Square, to: Square, capture: bool, promo: PieceKind) -> Move {
        Move {
            from,
            to,
            capture,
            en_passant: false,
            promotion: Some(promo),
        }
    }

    /// Origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Whether the move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.capture
    }

    /// Whether the move is an en passant capture.
    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.en_passant
    }

    /// The piece a pawn promotes to, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Whether the move spans two ranks along a file.
    ///
    /// Only meaningful for pawn moves, where it marks a double push.
    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.from.file() == self.to.file() && self.from.rank().abs_diff(self.to.rank()) == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.capture { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={promo}")?;
        }
        if self.en_passant {
            write!(f, " ep")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::piece::PieceKind;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn display_quiet_and_capture() {
        assert_eq!(Move::new(sq("e2"), sq("e4"), false).to_string(), "e2-e4");
        assert_eq!(Move::new(sq("e4"), sq("d5"), true).to_string(), "e4xd5");
    }

    #[test]
    fn display_en_passant_and_promotion() {
        assert_eq!(Move::new_en_passant(sq("d5"), sq("e6")).to_string(), "d5xe6 ep");
        let promo = Move::new_promotion(sq("e7"), sq("e8"), false, PieceKind::Queen);
        assert_eq!(promo.to_string(), "e7-e8=q");
    }

    #[test]
    fn double_push_detection() {
        assert!(Move::new(sq("e2"), sq("e4"), false).is_double_push());
        assert!(Move::new(sq("d7"), sq("d5"), false).is_double_push());
        assert!(!Move::new(sq("e2"), sq("e3"), false).is_double_push());
        assert!(!Move::new(sq("a1"), sq("c2"), false).is_double_push());
    }

    #[test]
    fn equality_is_by_value() {
        let a = Move::new(sq("g1"), sq("f3"), false);
        let b = Move::new(sq("g1"), sq("f3"), false);
        assert_eq!(a, b);
        assert_ne!(a, Move::new(sq("g1"), sq("f3"), true));
    }
}
