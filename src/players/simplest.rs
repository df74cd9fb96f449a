//! The simplest possible agent: always the first legal move.

use crate::board::{Board, Color};
use crate::players::Player;
use crate::point::Point;
use crate::rules::is_legal;

/// Plays the first legal cell in row-major order.
pub struct SimplestPlayer {
    color: Color,
}

impl SimplestPlayer {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Player for SimplestPlayer {
    fn choose_point(&mut self, board: &Board, _millis_in_game: u64) -> Option<Point> {
        Point::all().find(|&p| is_legal(board, self.color, p))
    }
}
