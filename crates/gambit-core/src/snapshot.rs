//! Numeric board snapshot consumed by static evaluation.

use std::ops::Index;

use crate::square::Square;

/// An 8x8 grid of signed piece values.
///
/// Each cell holds the material value of the piece on that square,
/// positive for White and negative for Black. Empty cells are zero.
/// Rows are ranks, row 0 being rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot([[i32; 8]; 8]);

impl BoardSnapshot {
    /// Wrap a raw grid.
    pub const fn new(cells: [[i32; 8]; 8]) -> BoardSnapshot {
        BoardSnapshot(cells)
    }

    /// The raw grid, indexed `[rank][file]`.
    #[inline]
    pub fn rows(&self) -> &[[i32; 8]; 8] {
        &self.0
    }

    /// Iterate over all 64 cells in square index order.
    pub fn cells(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().flatten().copied()
    }

    /// Signed sum over all cells.
    pub fn sum(&self) -> i32 {
        self.cells().sum()
    }

    /// The same position seen from the other side: ranks reversed and
    /// every sign flipped.
    pub fn mirrored(&self) -> BoardSnapshot {
        let mut cells = [[0; 8]; 8];
        for (rank, row) in self.0.iter().enumerate() {
            for (file, value) in row.iter().enumerate() {
                cells[7 - rank][file] = -value;
            }
        }
        BoardSnapshot(cells)
    }
}

impl Index<Square> for BoardSnapshot {
    type Output = i32;

    fn index(&self, sq: Square) -> &i32 {
        &self.0[sq.rank() as usize][sq.file() as usize]
    }
}
