//! FEN string parsing and serialization for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::empty();

        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // FEN ranks go from 8 to 1 (top to bottom)
            let rank = 7 - rank_index as u8;
            let mut file: u8 = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file += digit as u8;
                    if file > 8 {
                        return Err(FenError::BadRankLength {
                            rank_index,
                            length: file as usize,
                        });
                    }
                } else {
                    let piece =
                        Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                    let sq = Square::new(rank, file).ok_or(FenError::BadRankLength {
                        rank_index,
                        length: file as usize + 1,
                    })?;
                    board.put(sq, piece);
                    file += 1;
                }
            }

            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize,
                });
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };
        board.set_side_to_move(side_to_move);

        // Castling is not generated, but the field must still be well-formed.
        if fields[2] != "-"
            && let Some(bad) = fields[2].chars().find(|c| !"KQkq".contains(*c))
        {
            return Err(FenError::InvalidCastlingChar { character: bad });
        }

        let en_passant = if fields[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: fields[3].to_string(),
            };
            let sq = Square::from_algebraic(fields[3]).ok_or_else(invalid)?;
            if !en_passant_plausible(&board, sq) {
                return Err(invalid());
            }
            Some(sq)
        };
        board.set_en_passant(en_passant);

        let halfmove_clock = fields[4]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: fields[4].to_string(),
            })?;
        board.set_halfmove_clock(halfmove_clock);

        let fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "fullmove number",
                found: fields[5].to_string(),
            })?;
        board.set_fullmove_number(fullmove_number);

        board.validate()?;
        Ok(board)
    }
}

/// An en passant target must be the empty square a double push just
/// crossed: rank 6 with White to move, rank 3 with Black to move, with the
/// enemy pawn standing one step beyond it.
fn en_passant_plausible(board: &Board, sq: Square) -> bool {
    let us = board.side_to_move();
    let target_rank = match us {
        Color::White => 5,
        Color::Black => 2,
    };
    sq.rank() == target_rank
        && board.piece_on(sq).is_none()
        && sq
            .offset(-us.forward(), 0)
            .and_then(|pawn_sq| board.piece_on(pawn_sq))
            == Some(Piece::new(PieceKind::Pawn, !us))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_count = 0u8;

            for file in 0u8..8 {
                match self.piece_on(Square::from_coords_unchecked(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        // Castling rights are never tracked.
        write!(f, " {} -", self.side_to_move())?;

        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::board::Board;
    use crate::color::Color;
    use crate::error::{BoardError, FenError};
    use crate::square::Square;

    #[test]
    fn parse_starting_position() {
        let board: Board = STARTING_FEN.parse().unwrap();
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn display_drops_castling_rights() {
        let board = Board::starting_position();
        assert_eq!(
            board.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );
    }

    #[test]
    fn roundtrip_without_castling() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w - - 4 4";
        let board: Board = fen.parse().unwrap();
        assert_eq!(board.to_string(), fen);
    }

    #[test]
    fn parse_en_passant_and_counters() {
        let board: Board = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
            .parse()
            .unwrap();
        assert_eq!(board.en_passant(), Square::from_algebraic("c6"));
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.fullmove_number(), 2);
    }

    #[test]
    fn wrong_field_count() {
        let err = "8/8/8/8/8/8/8/8 w".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::WrongFieldCount { found: 2 });
    }

    #[test]
    fn bad_rank_length() {
        let err = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(
            err,
            FenError::BadRankLength {
                rank_index: 1,
                length: 7
            }
        );
    }

    #[test]
    fn invalid_piece_and_color() {
        assert!(matches!(
            "rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1".parse::<Board>(),
            Err(FenError::InvalidPieceChar { character: 'x' })
        ));
        assert!(matches!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x - - 0 1".parse::<Board>(),
            Err(FenError::InvalidColor { .. })
        ));
    }

    #[test]
    fn overlong_rank_is_rejected_early() {
        let fen = format!("{}/8/8/8/8/8/8/4K2k w - - 0 1", "8".repeat(32));
        assert_eq!(
            fen.parse::<Board>().unwrap_err(),
            FenError::BadRankLength {
                rank_index: 0,
                length: 16
            }
        );
        assert!(matches!(
            "7k/8/8/8/8/8/8/4K4 w - - 0 1".parse::<Board>(),
            Err(FenError::BadRankLength { rank_index: 7, .. })
        ));
    }

    #[test]
    fn en_passant_square_must_follow_a_double_push() {
        let rejected = [
            // No black pawn beyond e3, and the side to move is wrong for rank 3.
            "4k3/8/8/8/8/8/3PK3/8 w - e3 0 1",
            // Right rank, but nothing stands on d5.
            "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
            // The pawn beyond the square is White's own.
            "4k3/8/8/3P4/8/8/8/4K3 w - d6 0 1",
            // Target square is occupied.
            "4k3/8/3n4/3p4/8/8/8/4K3 w - d6 0 1",
            // Rank 3 target with White to move.
            "4k3/8/8/8/3P4/8/8/4K3 w - d3 0 1",
        ];
        for fen in rejected {
            assert!(
                matches!(fen.parse::<Board>(), Err(FenError::InvalidEnPassant { .. })),
                "{fen}"
            );
        }

        let board: Board = "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1".parse().unwrap();
        assert_eq!(board.en_passant(), Square::from_algebraic("d3"));
    }

    #[test]
    fn invalid_castling_char() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w KZ - 0 1".parse::<Board>().unwrap_err(),
            FenError::InvalidCastlingChar { character: 'Z' }
        );
    }

    #[test]
    fn missing_king_is_rejected() {
        let err = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            FenError::InvalidBoard {
                source: BoardError::InvalidKingCount {
                    color: Color::Black,
                    count: 0
                }
            }
        );
    }
}
