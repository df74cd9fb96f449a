//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves for both sides, passing when
//! a side has none, until neither side can move. Batches of playouts are
//! independent, so they run data-parallel: every simulation gets its own copy
//! of the board and its own random number generator, and the results are
//! simply summed.

use rayon::prelude::*;

use crate::board::{Board, Color};
use crate::record::{Outcome, Record};
use crate::rules::{leader, legal_moves};

/// Play random moves on `board` until the game is over and return the winner
/// (`None` on a draw). `to_move` is the color to play first.
pub fn playout(board: &mut Board, to_move: Color, rng: &mut fastrand::Rng) -> Option<Color> {
    let mut color = to_move;
    let mut passed = false;

    loop {
        let moves = legal_moves(board, color);
        if moves.is_empty() {
            if passed {
                break;
            }
            passed = true;
        } else {
            passed = false;
            let pt = moves[rng.usize(..moves.len())];
            board.place(color, pt);
        }
        color = color.opposite();
    }

    leader(board)
}

/// Run `times` playouts from `after`, the board right after `mover` played,
/// and tally the results from `mover`'s point of view.
///
/// Simulation `i` seeds its generator with `seed + i`, so a batch is
/// reproducible for a given seed regardless of how rayon schedules it.
pub fn simulate(after: &Board, mover: Color, times: usize, seed: u64) -> Record {
    (0..times)
        .into_par_iter()
        .map(|i| {
            let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(i as u64));
            let mut board = after.clone();
            let winner = playout(&mut board, mover.opposite(), &mut rng);
            let mut record = Record::default();
            record.record(Outcome::for_side(mover, winner));
            record
        })
        .reduce(Record::default, |a, b| a + b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::rules::{is_game_over, winner};

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_playout_reaches_game_over() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..20 {
            let mut board = Board::new();
            let result = playout(&mut board, Color::Black, &mut rng);
            assert!(is_game_over(&board));
            assert_eq!(winner(&board), Ok(result));
        }
    }

    #[test]
    fn test_playout_on_finished_board_changes_nothing() {
        let mut board = Board::from_stones([(pt("a1"), Color::White), (pt("h8"), Color::White)]);
        let before = board.clone();
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(playout(&mut board, Color::Black, &mut rng), Some(Color::White));
        assert_eq!(board, before);
    }

    #[test]
    fn test_simulate_counts_every_playout() {
        let after = Board::new().applied(crate::board::Move::put(Color::Black, pt("d3"))).unwrap();
        let record = simulate(&after, Color::Black, 40, 99);
        assert_eq!(record.total(), 40);
    }

    #[test]
    fn test_simulate_is_reproducible() {
        let after = Board::new().applied(crate::board::Move::put(Color::Black, pt("f5"))).unwrap();
        assert_eq!(simulate(&after, Color::Black, 30, 5), simulate(&after, Color::Black, 30, 5));
    }

    #[test]
    fn test_simulate_forced_result() {
        // Black just captured b1 with c1: nobody can move, Black wins every time.
        let after = Board::from_stones([
            (pt("a1"), Color::Black),
            (pt("b1"), Color::Black),
            (pt("c1"), Color::Black),
        ]);
        assert_eq!(simulate(&after, Color::Black, 10, 0), Record::new(10, 0, 0));
        assert_eq!(simulate(&after, Color::White, 10, 0), Record::new(0, 0, 10));
    }
}
