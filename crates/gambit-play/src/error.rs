//! Match and player errors.

use gambit_core::FenError;
use gambit_engine::ConfigError;

/// Errors that can occur while setting up or playing a match.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    /// The command line could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The starting position could not be parsed.
    #[error("invalid FEN {fen:?}: {source}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        /// Why it failed.
        #[source]
        source: FenError,
    },

    /// The search settings are inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A player returned a move that is not legal in the current position.
    #[error("{player} chose an illegal move: {mv}")]
    IllegalMove {
        /// Name of the offending player.
        player: String,
        /// The move, in coordinate notation.
        mv: String,
    },

    /// A player was asked to move with no legal moves available.
    #[error("no legal moves to choose from")]
    NoLegalMoves,

    /// The interactive player's input ended before a move was entered.
    #[error("input closed before a move was entered")]
    InputClosed,

    /// An I/O error occurred while talking to the interactive player.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
