//! Negamax alpha-beta search over a mutable [`Game`].

use gambit_core::{Game, Move, Outcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::eval::Evaluator;
use crate::search::control::SearchControl;

/// Score of a proven win for the side to move.
pub const INF: f64 = f64::INFINITY;

/// What one call of the search learned about its subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Best score for the side to move, times the side multiplier.
    pub score: f64,
    /// Move achieving `score`. `None` only at leaves and finished games.
    pub best_move: Option<Move>,
    /// `false` if the deadline cut any part of the subtree short.
    pub completed: bool,
}

impl Node {
    const fn leaf(score: f64, completed: bool) -> Self {
        Self {
            score,
            best_move: None,
            completed,
        }
    }
}

/// State shared by every node of one search pass.
pub(crate) struct SearchContext<'a, E: ?Sized> {
    pub(crate) nodes: u64,
    control: &'a SearchControl,
    evaluator: &'a E,
    rng: &'a mut StdRng,
}

impl<'a, E: Evaluator + ?Sized> SearchContext<'a, E> {
    pub(crate) fn new(control: &'a SearchControl, evaluator: &'a E, rng: &'a mut StdRng) -> Self {
        Self {
            nodes: 0,
            control,
            evaluator,
            rng,
        }
    }
}

/// Negamax alpha-beta search.
///
/// Returns the best score for the side to move, multiplied by `side`
/// (+1 when White is to move under the usual convention). The game is
/// restored before returning, including when the deadline cut the search.
pub(crate) fn negamax<E: Evaluator + ?Sized>(
    game: &mut Game,
    depth: u32,
    alpha: f64,
    beta: f64,
    side: i32,
    ctx: &mut SearchContext<'_, E>,
) -> Node {
    ctx.nodes += 1;

    if let Some(leaf) = horizon(game, depth, side, ctx) {
        return leaf;
    }

    let moves = game.generate_legal_moves();
    expand(game, &moves, depth, alpha, beta, side, ctx)
}

/// Root variant of [`negamax`] that searches the caller's move list
/// instead of regenerating it.
pub(crate) fn negamax_root<E: Evaluator + ?Sized>(
    game: &mut Game,
    moves: &[Move],
    depth: u32,
    alpha: f64,
    beta: f64,
    side: i32,
    ctx: &mut SearchContext<'_, E>,
) -> Node {
    ctx.nodes += 1;

    if let Some(leaf) = horizon(game, depth, side, ctx) {
        return leaf;
    }

    expand(game, moves, depth, alpha, beta, side, ctx)
}

/// Static evaluation when the depth is used up or the clock has run out.
fn horizon<E: Evaluator + ?Sized>(
    game: &Game,
    depth: u32,
    side: i32,
    ctx: &SearchContext<'_, E>,
) -> Option<Node> {
    let completed = if depth == 0 {
        true
    } else if ctx.control.deadline_passed() {
        false
    } else {
        return None;
    };
    let score = ctx.evaluator.evaluate(&game.snapshot()) * f64::from(side);
    Some(Node::leaf(score, completed))
}

/// Score of a finished game from the perspective given by `side`.
///
/// Draws are exactly zero rather than `INF * 0`.
fn terminal_score(outcome: Outcome, side: i32) -> f64 {
    match outcome.winner_sign() * side {
        1 => INF,
        -1 => -INF,
        _ => 0.0,
    }
}

fn expand<E: Evaluator + ?Sized>(
    game: &mut Game,
    moves: &[Move],
    depth: u32,
    mut alpha: f64,
    beta: f64,
    side: i32,
    ctx: &mut SearchContext<'_, E>,
) -> Node {
    if let Some(outcome) = game.check_terminal(moves) {
        return Node::leaf(terminal_score(outcome, side), true);
    }

    // A game that is not over always has a move; anything else is a
    // move generator bug.
    let mut best_move = *moves
        .choose(&mut *ctx.rng)
        .expect("non-terminal position must have a legal move");
    let mut best_score = -INF;
    let mut completed = true;

    for &mv in moves {
        let child = {
            let mut child = game.play(mv);
            negamax(&mut child, depth - 1, -beta, -alpha, -side, ctx)
        };
        let score = -child.score;
        completed &= child.completed;

        if score > best_score {
            best_score = score;
            best_move = mv;
        }

        alpha = alpha.max(best_score);
        if beta <= alpha {
            break;
        }
    }

    Node {
        score: best_score,
        best_move: Some(best_move),
        completed,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gambit_core::{Game, Move, Square};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{INF, Node, SearchContext, negamax, negamax_root};
    use crate::eval::{Evaluator, Material};
    use crate::search::control::SearchControl;

    const SCHOLARS_MATE_FEN: &str =
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w - - 4 4";

    const KNIGHTS_ENDGAME_FEN: &str = "4k3/pp3ppp/8/3n4/8/2N5/PP3PPP/4K3 w - - 0 1";

    const HANGING_QUEEN_FEN: &str = "4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1";

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn run(game: &mut Game, depth: u32, alpha: f64, beta: f64, side: i32) -> Node {
        let control = SearchControl::unbounded();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ctx = SearchContext::new(&control, &Material, &mut rng);
        negamax(game, depth, alpha, beta, side, &mut ctx)
    }

    /// Full-width negamax without pruning, using the same tie rules.
    fn exhaustive(game: &mut Game, depth: u32, side: i32) -> (f64, Option<Move>) {
        if depth == 0 {
            return (Material.evaluate(&game.snapshot()) * f64::from(side), None);
        }
        let moves = game.generate_legal_moves();
        if let Some(outcome) = game.check_terminal(&moves) {
            let score = match outcome.winner_sign() * side {
                1 => INF,
                -1 => -INF,
                _ => 0.0,
            };
            return (score, None);
        }
        let mut best = (-INF, None);
        for mv in moves {
            let mut child = game.play(mv);
            let score = -exhaustive(&mut child, depth - 1, -side).0;
            if score > best.0 {
                best = (score, Some(mv));
            }
        }
        best
    }

    /// Flip the board vertically and swap colors.
    fn mirror_fen(fen: &str) -> String {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let placement: Vec<String> = fields[0]
            .split('/')
            .rev()
            .map(|rank| {
                rank.chars()
                    .map(|c| {
                        if c.is_ascii_uppercase() {
                            c.to_ascii_lowercase()
                        } else {
                            c.to_ascii_uppercase()
                        }
                    })
                    .collect()
            })
            .collect();
        let side = if fields[1] == "w" { "b" } else { "w" };
        format!("{} {side} - - {} {}", placement.join("/"), fields[4], fields[5])
    }

    #[test]
    fn checkmated_side_scores_minus_infinity() {
        let mut game = Game::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        for depth in 1..=3 {
            let node = run(&mut game, depth, -INF, INF, -1);
            assert_eq!(node.score, -INF);
            assert_eq!(node.best_move, None);
            // With the multiplier reversed the same mate reads as +infinity.
            assert_eq!(run(&mut game, depth, -INF, INF, 1).score, INF);
        }
        // Depth 0 is checked before game over, so the mate reads as material.
        assert_eq!(run(&mut game, 0, -INF, INF, -1), Node::leaf(-9.0, true));
    }

    #[test]
    fn stalemate_scores_zero() {
        let mut game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let node = run(&mut game, 2, -INF, INF, -1);
        assert_eq!(node.score, 0.0);
        assert_eq!(node.best_move, None);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let mut game = Game::from_fen(HANGING_QUEEN_FEN).unwrap();
        let node = run(&mut game, 0, -INF, INF, 1);
        // Black's extra queen outweighs White's knight by six.
        assert_eq!(node, Node::leaf(-6.0, true));
    }

    #[test]
    fn single_legal_move_is_always_returned() {
        // Black's king on h8 can only step to g8.
        let mut game = Game::from_fen("7k/8/6K1/8/8/8/8/R7 b - - 0 1").unwrap();
        let only = Move::new(sq("h8"), sq("g8"), false);
        assert_eq!(game.generate_legal_moves(), vec![only]);
        let bounds = [(-INF, INF), (10.0, 20.0), (-20.0, -10.0), (0.0, 0.0)];
        for depth in 1..=3 {
            for (alpha, beta) in bounds {
                let node = run(&mut game, depth, alpha, beta, -1);
                assert_eq!(node.best_move, Some(only), "depth {depth} bounds ({alpha}, {beta})");
            }
        }
    }

    #[test]
    fn leaf_scores_negate_with_the_side_multiplier() {
        let mut game = Game::from_fen(KNIGHTS_ENDGAME_FEN).unwrap();
        let bounds = [(-INF, INF), (-1.0, 1.0), (3.0, 4.0)];
        for (alpha, beta) in bounds {
            let white = run(&mut game, 0, alpha, beta, 1);
            let black = run(&mut game, 0, -beta, -alpha, -1);
            assert_eq!(white.score, -black.score);
        }
    }

    #[test]
    fn mirrored_position_scores_identically() {
        for fen in [KNIGHTS_ENDGAME_FEN, HANGING_QUEEN_FEN] {
            let mut game = Game::from_fen(fen).unwrap();
            let mut mirrored = Game::from_fen(&mirror_fen(fen)).unwrap();
            for depth in 1..=3 {
                let ours = run(&mut game, depth, -INF, INF, 1);
                let theirs = run(&mut mirrored, depth, -INF, INF, -1);
                assert_eq!(ours.score, theirs.score, "{fen} at depth {depth}");
            }
        }
    }

    /// Where a fail-soft result lies relative to the window.
    #[derive(Debug, PartialEq)]
    enum Bound {
        Upper(f64),
        Exact(f64),
        Lower(f64),
    }

    fn classify(score: f64, alpha: f64, beta: f64) -> Bound {
        if score <= alpha {
            Bound::Upper(score)
        } else if score >= beta {
            Bound::Lower(score)
        } else {
            Bound::Exact(score)
        }
    }

    #[test]
    fn mirrored_position_agrees_for_every_window() {
        let windows = [(-INF, INF), (-1.0, 1.0), (3.0, 4.0), (-10.0, -5.0), (-7.0, 2.0)];
        for fen in [KNIGHTS_ENDGAME_FEN, HANGING_QUEEN_FEN] {
            let mut game = Game::from_fen(fen).unwrap();
            let mut mirrored = Game::from_fen(&mirror_fen(fen)).unwrap();
            for depth in 1..=3 {
                let exact = run(&mut game, depth, -INF, INF, 1).score;
                for (alpha, beta) in windows {
                    let ours = classify(run(&mut game, depth, alpha, beta, 1).score, alpha, beta);
                    let theirs =
                        classify(run(&mut mirrored, depth, alpha, beta, -1).score, alpha, beta);
                    let context = format!("{fen} at depth {depth} in ({alpha}, {beta})");

                    // Move order differs between the two boards, so only
                    // in-window scores are comparable value for value.
                    assert_eq!(
                        std::mem::discriminant(&ours),
                        std::mem::discriminant(&theirs),
                        "{context}"
                    );
                    for bound in [ours, theirs] {
                        match bound {
                            Bound::Upper(s) => assert!(exact <= s && s <= alpha, "{context}"),
                            Bound::Lower(s) => assert!(exact >= s && s >= beta, "{context}"),
                            Bound::Exact(s) => assert_eq!(s, exact, "{context}"),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn pruning_matches_exhaustive_search() {
        let fens = [
            gambit_core::STARTING_FEN,
            KNIGHTS_ENDGAME_FEN,
            HANGING_QUEEN_FEN,
            SCHOLARS_MATE_FEN,
        ];
        for fen in fens {
            let mut game = Game::from_fen(fen).unwrap();
            let side = game.side_to_move().sign();
            for depth in 1..=3 {
                let pruned = run(&mut game, depth, -INF, INF, side);
                let (score, mv) = exhaustive(&mut game, depth, side);
                assert_eq!(pruned.score, score, "{fen} at depth {depth}");
                if score > -INF {
                    assert_eq!(pruned.best_move, mv, "{fen} at depth {depth}");
                }
            }
        }
    }

    #[test]
    fn search_restores_the_game() {
        let mut game = Game::from_fen(KNIGHTS_ENDGAME_FEN).unwrap();
        let before = game.clone();
        run(&mut game, 3, -INF, INF, 1);
        assert_eq!(game, before);
    }

    #[test]
    fn finds_mate_in_one() {
        let mut game = Game::from_fen(SCHOLARS_MATE_FEN).unwrap();
        let node = run(&mut game, 2, -INF, INF, 1);
        assert_eq!(node.best_move, Some(Move::new(sq("h5"), sq("f7"), true)));
        assert_eq!(node.score, INF);
    }

    #[test]
    fn wins_the_hanging_queen() {
        let mut game = Game::from_fen(HANGING_QUEEN_FEN).unwrap();
        let node = run(&mut game, 1, -INF, INF, 1);
        assert_eq!(node.best_move, Some(Move::new(sq("c3"), sq("d5"), true)));
        assert_eq!(node.score, 3.0);
    }

    #[test]
    fn expired_deadline_returns_partial_leaf() {
        let mut game = Game::new();
        let moves = game.generate_legal_moves();
        let control = SearchControl::new(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = SearchContext::new(&control, &Material, &mut rng);
        let node = negamax_root(&mut game, &moves, 4, -INF, INF, 1, &mut ctx);
        assert!(!node.completed);
        assert_eq!(node.best_move, None);
        assert_eq!(node.score, 0.0);
        assert_eq!(ctx.nodes, 1);
    }

    #[test]
    fn counts_visited_nodes() {
        let mut game = Game::new();
        let moves = game.generate_legal_moves();
        let control = SearchControl::unbounded();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = SearchContext::new(&control, &Material, &mut rng);
        let node = negamax_root(&mut game, &moves, 1, -INF, INF, 1, &mut ctx);
        assert!(node.completed);
        assert_eq!(ctx.nodes, 21);
    }
}
