//! Command-line option parsing.

use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gambit_core::Game;
use gambit_engine::{IterationPolicy, SearchConfig, Searcher};

use crate::error::PlayError;
use crate::player::{HumanPlayer, MinimaxPlayer, Player, RandomPlayer};
use crate::session::Match;

/// Which kind of player sits on one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// The search engine.
    Minimax,
    /// Uniformly random moves.
    Random,
    /// Moves typed on standard input.
    Human,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Minimax => write!(f, "minimax"),
            PlayerKind::Random => write!(f, "random"),
            PlayerKind::Human => write!(f, "human"),
        }
    }
}

/// Command-line arguments of the `gambit` binary.
#[derive(Parser, Debug)]
#[command(name = "gambit", about = "Play chess between engines, random movers and humans")]
pub struct Cli {
    /// Player for White
    #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
    pub white: PlayerKind,

    /// Player for Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Minimax)]
    pub black: PlayerKind,

    /// Thinking time per engine move in seconds, fractions allowed
    #[arg(long = "time", value_parser = parse_seconds, default_value = "3")]
    pub max_time: Duration,

    /// Depth of the first iterative-deepening pass
    #[arg(long, default_value_t = 6)]
    pub start_depth: u32,

    /// Depth ceiling for iterative deepening
    #[arg(long, default_value_t = 100)]
    pub max_depth: u32,

    /// Which deeper pass may replace the best move: completed|score
    #[arg(long, value_parser = IterationPolicy::from_str, default_value = "completed")]
    pub policy: IterationPolicy,

    /// Starting position as the six FEN fields
    #[arg(long, num_args = 6, value_names = ["PLACEMENT", "SIDE", "CASTLING", "EP", "HALFMOVE", "FULLMOVE"])]
    pub fen: Option<Vec<String>>,

    /// Seed for every random source in the match
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many plies even if the game is not over
    #[arg(long)]
    pub max_plies: Option<u32>,
}

impl Cli {
    /// Check the arguments and resolve them into [`MatchOptions`].
    pub fn into_options(self) -> Result<MatchOptions, PlayError> {
        let search = SearchConfig {
            max_time: self.max_time,
            start_depth: self.start_depth,
            max_depth: self.max_depth,
            policy: self.policy,
        };
        search.validate()?;

        let fen = match self.fen {
            Some(fields) => {
                let fen = fields.join(" ");
                parse_fen(&fen)?;
                Some(fen)
            }
            None => None,
        };

        Ok(MatchOptions {
            white: self.white,
            black: self.black,
            search,
            fen,
            seed: self.seed,
            max_plies: self.max_plies,
        })
    }
}

/// Everything needed to set up a match.
///
/// A bare invocation is two engines playing from the standard starting
/// position with the default search limits.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    /// Player for White.
    pub white: PlayerKind,
    /// Player for Black.
    pub black: PlayerKind,
    /// Search limits for engine players.
    pub search: SearchConfig,
    /// Starting position, already checked to parse.
    pub fen: Option<String>,
    /// Seed for every random source in the match.
    pub seed: Option<u64>,
    /// Stop after this many plies even if the game is not over.
    pub max_plies: Option<u32>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            white: PlayerKind::Minimax,
            black: PlayerKind::Minimax,
            search: SearchConfig::default(),
            fen: None,
            seed: None,
            max_plies: None,
        }
    }
}

impl MatchOptions {
    /// Set up the starting game and both players.
    pub fn build(&self) -> Result<Match, PlayError> {
        let game = match &self.fen {
            Some(fen) => parse_fen(fen)?,
            None => Game::new(),
        };
        // The two sides get distinct streams so mirrored players do not
        // mirror each other's random choices.
        let white = self.build_player(self.white, self.seed)?;
        let black = self.build_player(self.black, self.seed.map(|s| s.wrapping_add(1)))?;

        let mut game_match = Match::new(game, white, black);
        if let Some(limit) = self.max_plies {
            game_match = game_match.with_max_plies(limit);
        }
        Ok(game_match)
    }

    fn build_player(
        &self,
        kind: PlayerKind,
        seed: Option<u64>,
    ) -> Result<Box<dyn Player>, PlayError> {
        Ok(match kind {
            PlayerKind::Minimax => {
                self.search.validate()?;
                let searcher = Searcher::new(self.search);
                let searcher = match seed {
                    Some(seed) => searcher.with_seed(seed),
                    None => searcher,
                };
                Box::new(MinimaxPlayer::from_searcher(searcher))
            }
            PlayerKind::Random => Box::new(match seed {
                Some(seed) => RandomPlayer::with_seed(seed),
                None => RandomPlayer::new(),
            }),
            PlayerKind::Human => Box::new(HumanPlayer::stdio()),
        })
    }
}

/// Parse a full argument list, program name first, into [`MatchOptions`].
pub fn parse_args<I, T>(args: I) -> Result<MatchOptions, PlayError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)?.into_options()
}

fn parse_fen(fen: &str) -> Result<Game, PlayError> {
    Game::from_fen(fen).map_err(|source| PlayError::InvalidFen {
        fen: fen.to_string(),
        source,
    })
}

/// Parse a non-negative number of seconds, fractions allowed.
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|err| format!("`{value}`: {err}"))
}
