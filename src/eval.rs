//! Static board evaluators for the width-first player.
//!
//! Every evaluator scores a board from one color's point of view: positive
//! means good for that color. They are interchangeable and selected by name
//! (`stones`, `mobility`, `blended`, `zero`, `positional`).

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color};
use crate::constants::{CELLS, HEIGHT, WIDTH};
use crate::rules::legal_moves;

const _: () = assert!(HEIGHT == 8 && WIDTH == 8, "the positional table is laid out for 8x8");

/// Cell weights for [`Evaluator::Positional`]: corners are prized, the cells
/// next to corners are dangerous.
const WEIGHTS: [[i32; WIDTH]; HEIGHT] = [
    [10, -3, 7, 5, 5, 7, -3, 10],
    [-3, -5, 3, 2, 2, 3, -5, -3],
    [7, 3, 8, 5, 5, 8, 3, 7],
    [5, 2, 5, 3, 3, 5, 2, 5],
    [5, 2, 5, 3, 3, 5, 2, 5],
    [7, 3, 8, 5, 5, 8, 3, 7],
    [-3, -5, 3, 2, 2, 3, -5, -3],
    [10, -3, 7, 5, 5, 7, -3, 10],
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Evaluator {
    /// Stone-count differential.
    Stones,
    /// Legal-move-count differential.
    Mobility,
    /// Mobility early, stones late, weighted by how full the board is.
    Blended,
    /// Always zero.
    Zero,
    /// Sum of [`WEIGHTS`] over own stones minus the opponent's.
    #[default]
    Positional,
}

impl Evaluator {
    pub const ALL: [Evaluator; 5] = [
        Evaluator::Stones,
        Evaluator::Mobility,
        Evaluator::Blended,
        Evaluator::Zero,
        Evaluator::Positional,
    ];

    /// Score `board` for `color`.
    pub fn evaluate(self, board: &Board, color: Color) -> f64 {
        match self {
            Evaluator::Stones => stones(board, color) as f64,
            Evaluator::Mobility => mobility(board, color) as f64,
            Evaluator::Blended => {
                let occupied = (CELLS - board.empty_cells()) as f64;
                let empty = board.empty_cells() as f64;
                (stones(board, color) as f64 * occupied + mobility(board, color) as f64 * empty)
                    / CELLS as f64
            }
            Evaluator::Zero => 0.0,
            Evaluator::Positional => positional(board, color) as f64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Evaluator::Stones => "stones",
            Evaluator::Mobility => "mobility",
            Evaluator::Blended => "blended",
            Evaluator::Zero => "zero",
            Evaluator::Positional => "positional",
        }
    }
}

fn stones(board: &Board, color: Color) -> i64 {
    board.count(color) as i64 - board.count(color.opposite()) as i64
}

fn mobility(board: &Board, color: Color) -> i64 {
    legal_moves(board, color).len() as i64 - legal_moves(board, color.opposite()).len() as i64
}

fn positional(board: &Board, color: Color) -> i64 {
    board
        .cells()
        .map(|(p, c)| match c {
            Some(c) if c == color => WEIGHTS[p.row()][p.col()] as i64,
            Some(_) => -(WEIGHTS[p.row()][p.col()] as i64),
            None => 0,
        })
        .sum()
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown evaluator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown evaluator `{0}` (expected one of: stones, mobility, blended, zero, positional)")]
pub struct ParseEvaluatorError(String);

impl FromStr for Evaluator {
    type Err = ParseEvaluatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Evaluator::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEvaluatorError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use crate::point::Point;

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_board_is_balanced() {
        let board = Board::new();
        for e in Evaluator::ALL {
            assert_eq!(e.evaluate(&board, Color::Black), 0.0, "{e} on the initial board");
            assert_eq!(e.evaluate(&board, Color::White), 0.0, "{e} on the initial board");
        }
    }

    #[test]
    fn test_scores_are_antisymmetric() {
        let board = Board::new()
            .applied(Move::put(Color::Black, pt("d3")))
            .unwrap()
            .applied(Move::put(Color::White, pt("c3")))
            .unwrap();
        for e in Evaluator::ALL {
            assert_eq!(
                e.evaluate(&board, Color::Black),
                -e.evaluate(&board, Color::White),
                "{e} should be zero-sum"
            );
        }
    }

    #[test]
    fn test_stones_after_first_move() {
        let board = Board::new().applied(Move::put(Color::Black, pt("d3"))).unwrap();
        assert_eq!(Evaluator::Stones.evaluate(&board, Color::Black), 3.0);
    }

    #[test]
    fn test_positional_prizes_corners() {
        let corner = Board::from_stones([(pt("a1"), Color::Black), (pt("b2"), Color::White)]);
        assert_eq!(Evaluator::Positional.evaluate(&corner, Color::Black), 15.0);
    }

    #[test]
    fn test_parse_names() {
        for e in Evaluator::ALL {
            assert_eq!(e.name().parse::<Evaluator>(), Ok(e));
        }
        assert_eq!("Positional".parse::<Evaluator>(), Ok(Evaluator::Positional));
        assert!("material".parse::<Evaluator>().is_err());
    }
}
