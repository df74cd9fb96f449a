//! Flat Monte Carlo player.
//!
//! Every legal move is scored by random playouts from the board it produces.
//! Rounds of [`PLAYOUTS_PER_ROUND`] playouts per candidate are run until the
//! deadline, which is checked before every batch; the candidate with the best
//! record wins.

use std::cmp::Ordering;
use std::time::Instant;

use log::{debug, trace};

use crate::board::{Board, Color};
use crate::constants::{MONTE_CARLO_MARGIN, PLAYOUTS_PER_ROUND};
use crate::playout::simulate;
use crate::players::{Player, pick, turn_deadline};
use crate::point::Point;
use crate::record::Record;
use crate::rules::legal_moves;

pub struct MonteCarloPlayer {
    color: Color,
    millis_per_turn: u64,
    rng: fastrand::Rng,
}

impl MonteCarloPlayer {
    pub fn new(color: Color, millis_per_turn: u64) -> Self {
        Self {
            color,
            millis_per_turn,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }
}

/// The candidate with the best record, ties broken uniformly at random.
/// `None` if no playout has been recorded at all.
pub(crate) fn best_candidate(candidates: &[(Point, Record)], rng: &mut fastrand::Rng) -> Option<Point> {
    if candidates.iter().all(|(_, r)| r.total() == 0) {
        return None;
    }
    let mut best: Vec<Point> = Vec::new();
    let mut best_record = Record::default();
    for &(pt, record) in candidates {
        let ord = if best.is_empty() {
            Ordering::Greater
        } else {
            record.performance_cmp(&best_record)
        };
        match ord {
            Ordering::Greater => {
                best.clear();
                best.push(pt);
                best_record = record;
            }
            Ordering::Equal => best.push(pt),
            Ordering::Less => {}
        }
    }
    pick(&best, rng)
}

impl Player for MonteCarloPlayer {
    fn choose_point(&mut self, board: &Board, millis_in_game: u64) -> Option<Point> {
        let moves = legal_moves(board, self.color);
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        let deadline = turn_deadline(board, millis_in_game, self.millis_per_turn, MONTE_CARLO_MARGIN);
        let afters: Vec<Board> = moves
            .iter()
            .map(|&pt| {
                let mut after = board.clone();
                after.place(self.color, pt);
                after
            })
            .collect();
        let mut candidates: Vec<(Point, Record)> = moves.iter().map(|&pt| (pt, Record::default())).collect();

        let mut playouts = 0;
        'rounds: loop {
            for ((_, record), after) in candidates.iter_mut().zip(&afters) {
                if Instant::now() >= deadline {
                    break 'rounds;
                }
                *record += simulate(after, self.color, PLAYOUTS_PER_ROUND, self.rng.u64(..));
                playouts += PLAYOUTS_PER_ROUND;
            }
        }

        for (pt, record) in &candidates {
            trace!("monte-carlo {} {pt}: {record}", self.color);
        }
        debug!("monte-carlo {}: {playouts} playouts over {} moves", self.color, moves.len());

        best_candidate(&candidates, &mut self.rng).or_else(|| pick(&moves, &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_best_candidate_prefers_win_ratio() {
        let mut rng = fastrand::Rng::with_seed(3);
        let candidates = [
            (pt("d3"), Record::new(5, 0, 5)),
            (pt("c4"), Record::new(8, 0, 2)),
            (pt("f5"), Record::new(2, 6, 2)),
        ];
        assert_eq!(best_candidate(&candidates, &mut rng), Some(pt("c4")));
    }

    #[test]
    fn test_best_candidate_breaks_ratio_tie_on_losses() {
        let mut rng = fastrand::Rng::with_seed(3);
        let candidates = [(pt("d3"), Record::new(2, 0, 8)), (pt("c4"), Record::new(2, 6, 2))];
        assert_eq!(best_candidate(&candidates, &mut rng), Some(pt("c4")));
    }

    #[test]
    fn test_best_candidate_ties_are_random() {
        let mut rng = fastrand::Rng::with_seed(11);
        let candidates = [(pt("d3"), Record::new(1, 0, 1)), (pt("e6"), Record::new(3, 0, 3))];
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..64 {
            seen.insert(best_candidate(&candidates, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_no_playouts_means_no_candidate() {
        let mut rng = fastrand::Rng::with_seed(0);
        let candidates = [(pt("d3"), Record::default()), (pt("c4"), Record::default())];
        assert_eq!(best_candidate(&candidates, &mut rng), None);
    }

    #[test]
    fn test_zero_budget_still_plays_legal_move() {
        let board = Board::new();
        let mut player = MonteCarloPlayer::new(Color::Black, 0).seeded(2);
        let chosen = player.choose_point(&board, 0).unwrap();
        assert!(legal_moves(&board, Color::Black).contains(&chosen));
    }

    #[test]
    fn test_stops_within_one_batch_of_deadline() {
        // Budget 300 ms minus the 45 ms margin; a single batch of playouts is
        // far shorter than the remaining slack.
        let board = Board::new();
        let mut player = MonteCarloPlayer::new(Color::Black, 300).seeded(4);
        let start = Instant::now();
        let chosen = player.choose_point(&board, 60_000).unwrap();
        assert!(start.elapsed() < std::time::Duration::from_millis(300));
        assert!(legal_moves(&board, Color::Black).contains(&chosen));
    }

    #[test]
    fn test_single_move_is_immediate() {
        // The white bottom row runs into the edge, so only c1 captures.
        let board = Board::from_stones([
            (pt("a1"), Color::Black),
            (pt("b1"), Color::White),
            (pt("h8"), Color::White),
            (pt("g8"), Color::White),
            (pt("f8"), Color::White),
            (pt("e8"), Color::White),
        ]);
        assert_eq!(legal_moves(&board, Color::Black), vec![pt("c1")]);
        let mut player = MonteCarloPlayer::new(Color::Black, 0);
        assert_eq!(player.choose_point(&board, 0), Some(pt("c1")));
    }
}
