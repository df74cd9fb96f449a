//! Rule-of-thumb player.
//!
//! Rules are tried in order and the first that matches decides:
//!
//! 1. take a corner;
//! 2. play the move that most increases the number of own stable stones;
//! 3. play into the best "good" ring around the corners and the centre;
//! 4. play anything.
//!
//! Ties inside rules 1, 3 and 4 are broken uniformly at random.

use log::debug;

use crate::board::{Board, Color};
use crate::constants::{HEIGHT as H, WIDTH as W};
use crate::players::{Player, pick};
use crate::point::Point;
use crate::rules::legal_moves;
use crate::stability::stable_points;

/// Good cells, best ring first.
const RINGS: [&[Point]; 3] = [
    // Two steps from a corner along an edge.
    &[
        Point::at(0, 2),
        Point::at(0, W - 3),
        Point::at(2, 0),
        Point::at(2, W - 1),
        Point::at(H - 3, 0),
        Point::at(H - 3, W - 1),
        Point::at(H - 1, 2),
        Point::at(H - 1, W - 3),
    ],
    // Two steps in from a corner on the diagonal.
    &[
        Point::at(2, 2),
        Point::at(2, W - 3),
        Point::at(H - 3, 2),
        Point::at(H - 3, W - 3),
    ],
    // Around the four centre cells.
    &[
        Point::at(2, 3),
        Point::at(2, W - 4),
        Point::at(3, 2),
        Point::at(3, W - 3),
        Point::at(H - 4, 2),
        Point::at(H - 4, W - 3),
        Point::at(H - 3, 3),
        Point::at(H - 3, W - 4),
    ],
];

fn stable_count(board: &Board, color: Color) -> usize {
    stable_points(board)
        .into_iter()
        .filter(|&p| board.get(p) == Some(color))
        .count()
}

pub struct RuleBasedPlayer {
    color: Color,
    rng: fastrand::Rng,
}

impl RuleBasedPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// The first move with the highest own stable count, if it beats the
    /// current count.
    fn most_stabilizing(&self, board: &Board, moves: &[Point]) -> Option<Point> {
        let current = stable_count(board, self.color);
        let mut best: Option<(Point, usize)> = None;
        for &pt in moves {
            let mut next = board.clone();
            next.place(self.color, pt);
            let count = stable_count(&next, self.color);
            if count > current && best.is_none_or(|(_, c)| count > c) {
                best = Some((pt, count));
            }
        }
        best.map(|(pt, _)| pt)
    }
}

impl Player for RuleBasedPlayer {
    fn choose_point(&mut self, board: &Board, _millis_in_game: u64) -> Option<Point> {
        let moves = legal_moves(board, self.color);
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        let corners: Vec<Point> = moves.iter().copied().filter(|p| p.is_corner()).collect();
        if !corners.is_empty() {
            debug!("rule-based {}: corner", self.color);
            return pick(&corners, &mut self.rng);
        }

        if let Some(pt) = self.most_stabilizing(board, &moves) {
            debug!("rule-based {}: stabilizing {pt}", self.color);
            return Some(pt);
        }

        for (i, ring) in RINGS.iter().enumerate() {
            let matches: Vec<Point> = moves.iter().copied().filter(|p| ring.contains(p)).collect();
            if !matches.is_empty() {
                debug!("rule-based {}: ring {}", self.color, i + 1);
                return pick(&matches, &mut self.rng);
            }
        }

        debug!("rule-based {}: any", self.color);
        pick(&moves, &mut self.rng)
    }
}
