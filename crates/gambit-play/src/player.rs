//! The players that can take part in a [`Match`](crate::Match).

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use gambit_core::{Game, Move, Square};
use gambit_engine::{Evaluator, Material, SearchConfig, Searcher};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::PlayError;

/// Something that picks a move when it is its turn.
pub trait Player {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Choose one of `moves` for the side to move in `game`.
    ///
    /// `moves` is the non-empty legal move list of a game that is not over.
    /// Implementations may mutate `game` while thinking but must leave it
    /// as they found it.
    fn select_move(&mut self, moves: &[Move], game: &mut Game) -> Result<Move, PlayError>;
}

/// Engine player backed by the iterative-deepening search.
#[derive(Debug)]
pub struct MinimaxPlayer<E = Material> {
    searcher: Searcher<E>,
}

impl MinimaxPlayer<Material> {
    /// Create a material-counting engine player.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::new(config),
        }
    }
}

impl<E: Evaluator> MinimaxPlayer<E> {
    /// Wrap an already configured searcher.
    pub fn from_searcher(searcher: Searcher<E>) -> Self {
        Self { searcher }
    }
}

impl<E: Evaluator> Player for MinimaxPlayer<E> {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_move(&mut self, moves: &[Move], game: &mut Game) -> Result<Move, PlayError> {
        if moves.is_empty() {
            return Err(PlayError::NoLegalMoves);
        }
        Ok(self.searcher.select_move(moves, game))
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// Seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(&mut self, moves: &[Move], _game: &mut Game) -> Result<Move, PlayError> {
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(PlayError::NoLegalMoves)
    }
}

/// Interactive player that reads origin and destination squares.
///
/// Prompts for "From" and "To" until the pair names a legal move. When
/// several moves share both squares (promotions) the first generated one,
/// the queen promotion, is taken.
#[derive(Debug)]
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<StdinLock<'static>, Stdout> {
    /// A player on the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// A player reading from `input` and prompting on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the player and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, label: &str) -> Result<Option<Square>, PlayError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlayError::InputClosed);
        }
        Ok(Square::from_algebraic(&line.trim().to_ascii_lowercase()))
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn select_move(&mut self, moves: &[Move], _game: &mut Game) -> Result<Move, PlayError> {
        if moves.is_empty() {
            return Err(PlayError::NoLegalMoves);
        }

        let listing: Vec<String> = moves.iter().map(Move::to_string).collect();
        writeln!(self.output, "Valid moves: {}", listing.join(", "))?;
        writeln!(self.output, "Please enter your move:")?;

        loop {
            let from = self.prompt("From")?;
            let to = self.prompt("To")?;

            let chosen = match (from, to) {
                (Some(from), Some(to)) => moves
                    .iter()
                    .copied()
                    .find(|mv| mv.from() == from && mv.to() == to),
                _ => None,
            };
            if let Some(mv) = chosen {
                return Ok(mv);
            }

            debug!(?from, ?to, "rejected human move");
            writeln!(self.output, "Please enter a move:")?;
        }
    }
}
