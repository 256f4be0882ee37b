//! Perft (performance test) for move generation correctness verification.
//!
//! Walks the tree through [`Game::apply_move`] and [`Game::unapply_move`], so
//! it also exercises the undo history.

use crate::game::Game;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves without applying them.
pub fn perft(game: &mut Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.generate_legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = game.play(mv);
        nodes += perft(&mut child, depth - 1);
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(move, node_count)` pairs sorted alphabetically.
pub fn divide(game: &mut Game, depth: usize) -> Vec<(String, u64)> {
    let moves = game.generate_legal_moves();
    let mut results: Vec<(String, u64)> = moves
        .into_iter()
        .map(|mv| {
            let mut child = game.play(mv);
            let count = if depth <= 1 { 1 } else { perft(&mut child, depth - 1) };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
