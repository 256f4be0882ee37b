//! Legal move generation.
//!
//! Moves are generated pseudo-legally per piece, then filtered by applying
//! each one on a scratch board and rejecting those that leave the mover's
//! king attacked.

use crate::board::{BISHOP_RAYS, Board, KING_STEPS, KNIGHT_STEPS, ROOK_RAYS};
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::PieceKind;
use crate::square::Square;

/// Promotion choices, strongest first.
const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves for the side to move.
///
/// Moves come out in board order (A1 to H8 by origin square), then by
/// direction. The order is stable for a given position.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut scratch = *board;
    let mut legal = generate_pseudo_legal(board);
    legal.retain(|&mv| {
        let undo = scratch.apply(mv);
        let safe = !scratch.in_check(us);
        scratch.revert(undo);
        safe
    });
    legal
}

fn generate_pseudo_legal(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::with_capacity(48);

    for (from, piece) in board.pieces() {
        if piece.color != us {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => gen_pawn(board, from, us, &mut moves),
            PieceKind::Knight => gen_steps(board, from, us, &KNIGHT_STEPS, &mut moves),
            PieceKind::King => gen_steps(board, from, us, &KING_STEPS, &mut moves),
            PieceKind::Bishop => gen_rays(board, from, us, &BISHOP_RAYS, &mut moves),
            PieceKind::Rook => gen_rays(board, from, us, &ROOK_RAYS, &mut moves),
            PieceKind::Queen => {
                gen_rays(board, from, us, &ROOK_RAYS, &mut moves);
                gen_rays(board, from, us, &BISHOP_RAYS, &mut moves);
            }
        }
    }

    moves
}

fn push_pawn_move(from: Square, to: Square, capture: bool, moves: &mut Vec<Move>) {
    if to.rank() == 0 || to.rank() == 7 {
        for promo in PROMOTIONS {
            moves.push(Move::new_promotion(from, to, capture, promo));
        }
    } else {
        moves.push(Move::new(from, to, capture));
    }
}

fn gen_pawn(board: &Board, from: Square, us: Color, moves: &mut Vec<Move>) {
    let forward = us.forward();
    let start_rank = match us {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = from.offset(forward, 0)
        && board.piece_on(one).is_none()
    {
        push_pawn_move(from, one, false, moves);
        if from.rank() == start_rank
            && let Some(two) = from.offset(2 * forward, 0)
            && board.piece_on(two).is_none()
        {
            moves.push(Move::new(from, two, false));
        }
    }

    for d_file in [-1, 1] {
        let Some(to) = from.offset(forward, d_file) else {
            continue;
        };
        match board.piece_on(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, true, moves),
            None if board.en_passant() == Some(to) => {
                moves.push(Move::new_en_passant(from, to));
            }
            _ => {}
        }
    }
}

fn gen_steps(board: &Board, from: Square, us: Color, steps: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(dr, df) in steps {
        let Some(to) = from.offset(dr, df) else {
            continue;
        };
        match board.piece_on(to) {
            None => moves.push(Move::new(from, to, false)),
            Some(target) if target.color != us => moves.push(Move::new(from, to, true)),
            Some(_) => {}
        }
    }
}

fn gen_rays(board: &Board, from: Square, us: Color, rays: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(dr, df) in rays {
        let mut cursor = from.offset(dr, df);
        while let Some(to) = cursor {
            match board.piece_on(to) {
                None => moves.push(Move::new(from, to, false)),
                Some(target) => {
                    if target.color != us {
                        moves.push(Move::new(from, to, true));
                    }
                    break;
                }
            }
            cursor = to.offset(dr, df);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_legal_moves;
    use crate::board::Board;
    use crate::chess_move::Move;
    use crate::piece::PieceKind;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let moves = generate_legal_moves(&Board::starting_position());
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&Move::new(sq("e2"), sq("e4"), false)));
        assert!(moves.contains(&Move::new(sq("g1"), sq("f3"), false)));
        assert!(moves.iter().all(|mv| !mv.is_capture()));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        // The e2 knight is pinned against the e1 king by the e8 rook.
        let board: Board = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1".parse().unwrap();
        let moves = generate_legal_moves(&board);
        assert!(moves.iter().all(|mv| mv.from() != sq("e2")));
    }

    #[test]
    fn must_answer_check() {
        // Black rook on a1 checks the white king on e1 along the first rank.
        let board: Board = "4k3/8/8/8/8/8/3P1P2/r3K3 w - - 0 1".parse().unwrap();
        let moves = generate_legal_moves(&board);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.from() == sq("e1")));
    }

    #[test]
    fn en_passant_is_generated() {
        let board: Board = "4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1".parse().unwrap();
        let moves = generate_legal_moves(&board);
        assert!(moves.contains(&Move::new_en_passant(sq("d5"), sq("e6"))));
    }

    #[test]
    fn promotions_cover_all_pieces() {
        let board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let promos: Vec<_> = generate_legal_moves(&board)
            .into_iter()
            .filter_map(Move::promotion)
            .collect();
        assert_eq!(promos.len(), 4);
        assert_eq!(promos[0], PieceKind::Queen);
    }

    #[test]
    fn checkmated_side_has_no_moves() {
        let board: Board = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(generate_legal_moves(&board).is_empty());
    }
}
