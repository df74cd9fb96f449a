//! Uniformly random agent.

use crate::board::{Board, Color};
use crate::players::{Player, pick};
use crate::point::Point;
use crate::rules::legal_moves;

/// Plays a uniformly random legal move, passing when there is none.
pub struct RandomPlayer {
    color: Color,
    rng: fastrand::Rng,
}

impl RandomPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a fixed seed for reproducible choices.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }
}

impl Player for RandomPlayer {
    fn choose_point(&mut self, board: &Board, _millis_in_game: u64) -> Option<Point> {
        pick(&legal_moves(board, self.color), &mut self.rng)
    }
}
