//! Players and the match loop for gambit.

pub mod error;
pub mod options;
pub mod player;
pub mod session;

pub use error::PlayError;
pub use options::{Cli, MatchOptions, PlayerKind, parse_args};
pub use player::{HumanPlayer, MinimaxPlayer, Player, RandomPlayer};
pub use session::Match;
