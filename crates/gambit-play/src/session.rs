//! The game loop: alternate between two players until the game ends.

use std::io::Write;

use gambit_core::{Color, Game, Outcome};
use tracing::{info, warn};

use crate::error::PlayError;
use crate::player::Player;

/// A game between two players.
pub struct Match {
    game: Game,
    white: Box<dyn Player>,
    black: Box<dyn Player>,
    max_plies: Option<u32>,
}

impl Match {
    /// Set up a match from `game` with no ply limit.
    pub fn new(game: Game, white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        Self {
            game,
            white,
            black,
            max_plies: None,
        }
    }

    /// Stop after `limit` plies even if the game is not over.
    pub fn with_max_plies(mut self, limit: u32) -> Self {
        self.max_plies = Some(limit);
        self
    }

    /// The game as it currently stands.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until the game ends, writing a transcript to `out`.
    ///
    /// Each turn prints the side to move and the board, asks that side's
    /// player for a move and reports it. Returns the outcome, or `None` if
    /// the ply limit was reached first.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Option<Outcome>, PlayError> {
        let mut plies = 0u32;

        loop {
            let moves = self.game.generate_legal_moves();
            if let Some(outcome) = self.game.check_terminal(&moves) {
                writeln!(out, "{outcome}")?;
                info!(%outcome, plies, fen = %self.game.fen(), "game over");
                return Ok(Some(outcome));
            }

            if self.max_plies.is_some_and(|limit| plies >= limit) {
                writeln!(out, "Stopped after {plies} plies.")?;
                warn!(plies, fen = %self.game.fen(), "ply limit reached");
                return Ok(None);
            }

            let side = self.game.side_to_move();
            writeln!(out, "{} to play:", side.name())?;
            writeln!(out, "{}", self.game)?;

            let player = match side {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let mv = player.select_move(&moves, &mut self.game)?;
            if !moves.contains(&mv) {
                return Err(PlayError::IllegalMove {
                    player: player.name().to_string(),
                    mv: mv.to_string(),
                });
            }

            self.game.apply_move(mv);
            plies += 1;
            writeln!(out, "{} played {mv}", side.name())?;
            writeln!(out)?;
        }
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("game", &self.game)
            .field("white", &self.white.name())
            .field("black", &self.black.name())
            .field("max_plies", &self.max_plies)
            .finish()
    }
}
