//! Time-bounded iterative-deepening search.

pub mod control;
pub mod negamax;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gambit_core::{Game, Move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::eval::{Evaluator, Material};
use control::SearchControl;
use negamax::{INF, SearchContext, negamax_root};

/// How the driver decides whether a deeper pass replaces the best result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IterationPolicy {
    /// A pass that finished before the deadline always supersedes earlier
    /// ones. A pass cut short by the deadline is used only while no pass
    /// has finished, and only if it beats the best score so far.
    #[default]
    CompletedOnly,
    /// Any pass, finished or not, replaces the best result when its score
    /// is strictly higher. A partial deeper pass can override a complete
    /// shallower one.
    ScoreOnly,
}

impl FromStr for IterationPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "completed" => Ok(IterationPolicy::CompletedOnly),
            "score" => Ok(IterationPolicy::ScoreOnly),
            other => Err(ConfigError::UnknownPolicy {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for IterationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationPolicy::CompletedOnly => write!(f, "completed"),
            IterationPolicy::ScoreOnly => write!(f, "score"),
        }
    }
}

/// Search limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Elapsed-time budget per move.
    pub max_time: Duration,
    /// Depth of the first iterative-deepening pass, in plies.
    pub start_depth: u32,
    /// Depth ceiling, in case the clock is checked too coarsely.
    pub max_depth: u32,
    /// Acceptance rule for results of successive passes.
    pub policy: IterationPolicy,
}

impl SearchConfig {
    /// Check that the depth range is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_depth == 0 {
            return Err(ConfigError::ZeroStartDepth);
        }
        if self.start_depth > self.max_depth {
            return Err(ConfigError::StartBeyondMax {
                start: self.start_depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_time: Duration::from_secs(3),
            start_depth: 6,
            max_depth: 100,
            policy: IterationPolicy::default(),
        }
    }
}

/// Result of an iterative-deepening search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, or the first legal move if no pass produced one.
    pub best_move: Move,
    /// Score of `best_move` from the mover's perspective; `-INF` if no
    /// pass was accepted.
    pub score: f64,
    /// Deepest pass started.
    pub depth: u32,
    /// Deepest pass that finished before the deadline, if any.
    pub completed_depth: Option<u32>,
    /// Total nodes visited across all passes.
    pub nodes: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Iterative-deepening negamax searcher.
///
/// Holds no state between searches other than its random source, which
/// picks the fallback move at nodes where every move loses.
pub struct Searcher<E = Material> {
    config: SearchConfig,
    evaluator: E,
    rng: StdRng,
}

impl Searcher<Material> {
    /// Create a material-counting searcher seeded from system entropy.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            evaluator: Material,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<E: Evaluator> Searcher<E> {
    /// Reseed the random source for reproducible searches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the static evaluator.
    pub fn with_evaluator<F: Evaluator>(self, evaluator: F) -> Searcher<F> {
        Searcher {
            config: self.config,
            evaluator,
            rng: self.rng,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Choose a move for the side to move in `game`.
    ///
    /// `moves` must be the non-empty legal move list of a game that is not
    /// over. The game is mutated during the search and restored before
    /// returning.
    pub fn select_move(&mut self, moves: &[Move], game: &mut Game) -> Move {
        self.search(game, moves).best_move
    }

    /// Run iterative deepening from `start_depth` until the time budget is
    /// spent or `max_depth` has been searched.
    ///
    /// # Panics
    ///
    /// Panics if `moves` is empty.
    pub fn search(&mut self, game: &mut Game, moves: &[Move]) -> SearchResult {
        assert!(!moves.is_empty(), "search needs at least one legal move");

        let control = SearchControl::new(self.config.max_time);
        let side = game.side_to_move().sign();

        let mut best_move = moves[0];
        let mut best_score = -INF;
        let mut completed_depth = None;
        let mut depth_reached = 0;
        let mut nodes = 0u64;

        let mut depth = self.config.start_depth;
        while !control.deadline_passed() && depth <= self.config.max_depth {
            let mut ctx = SearchContext::new(&control, &self.evaluator, &mut self.rng);
            let node = negamax_root(game, moves, depth, -INF, INF, side, &mut ctx);
            nodes += ctx.nodes;
            depth_reached = depth;

            debug!(
                depth,
                score = node.score,
                nodes = ctx.nodes,
                completed = node.completed,
                elapsed_ms = control.elapsed().as_millis() as u64,
                "search pass finished"
            );

            if let Some(mv) = node.best_move {
                let accept = match self.config.policy {
                    IterationPolicy::ScoreOnly => node.score > best_score,
                    IterationPolicy::CompletedOnly => {
                        node.completed || (completed_depth.is_none() && node.score > best_score)
                    }
                };
                if accept {
                    best_move = mv;
                    best_score = node.score;
                }
                if node.completed {
                    completed_depth = Some(depth);
                }
            }

            depth += 1;
        }

        let elapsed = control.elapsed();
        info!(
            depth = depth_reached,
            completed_depth,
            score = best_score,
            nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            best_move = %best_move,
            "search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            depth: depth_reached,
            completed_depth,
            nodes,
            elapsed,
        }
    }
}

impl<E> fmt::Debug for Searcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Searcher<Material> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
