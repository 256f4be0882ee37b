//! Board squares, indexed rank-major from A1.

use std::fmt;

/// A square on the board.
///
/// Index = rank * 8 + file, so A1 = 0, B1 = 1, ..., H8 = 63. Rank 0 is
/// White's back rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from zero-based rank and file, `None` if off the board.
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Option<Square> {
        if rank < 8 && file < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from a zero-based index, `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from rank and file without bounds checking.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both coordinates are below 8.
    #[inline]
    pub(crate) const fn from_coords_unchecked(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8);
        Square(rank * 8 + file)
    }

    /// Parse algebraic notation such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Square::new(rank - b'1', file - b'a')
    }

    /// Zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based rank (0 = rank 1).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Zero-based file (0 = file a).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Step by a rank and file delta, `None` if the result leaves the board.
    #[inline]
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank() as i8 + d_rank;
        let file = self.file() as i8 + d_file;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }
        Some(Square((rank * 8 + file) as u8))
    }

    /// Iterate over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    #[test]
    fn algebraic_roundtrip() {
        for sq in Square::all() {
            let text = sq.to_string();
            assert_eq!(Square::from_algebraic(&text), Some(sq));
        }
    }

    #[test]
    fn algebraic_rejects_garbage() {
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn corners() {
        assert_eq!(Square::from_algebraic("a1").map(Square::index), Some(0));
        assert_eq!(Square::from_algebraic("h8").map(Square::index), Some(63));
        assert_eq!(Square::from_algebraic("E2"), Square::new(1, 4));
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 2), Square::new(1, 2));
        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-7, -7), Some(a1));
    }
}
