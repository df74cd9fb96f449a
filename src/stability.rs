//! Stable stone detection.
//!
//! A stone is stable when no future move can flip it. The classifier here is
//! an approximation that iterates to a fixed point. Each direction of each
//! stone is judged on its own:
//!
//! - stable if the line in that direction has no empty cell up to the edge,
//!   or if the stone touches the edge on the opposite side, or if the opposite
//!   neighbor is a stable stone of the same color;
//! - unstable if the opposite neighbor is empty, an opponent stone, or an
//!   unstable stone of the same color;
//! - unclear otherwise.
//!
//! A stone is stable when all eight directions are stable and unstable as soon
//! as one is. Because directions are judged independently, stones that are in
//! fact safe can be reported unstable, e.g. when interleaved runs of both
//! colors fill a line or when a single move would have to flip several
//! neighbors along a combined line. It never reports an unsafe stone as
//! stable, which is what the rule-based player relies on.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::constants::CELLS;
use crate::point::{Direction, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stability {
    Unclear,
    Stable,
    Unstable,
}

/// Points holding stones that can never be flipped again (approximate).
pub fn stable_points(board: &Board) -> BTreeSet<Point> {
    let mut state = [Stability::Unstable; CELLS];
    let mut unclear: Vec<Point> = Point::all().filter(|&p| board.get(p).is_some()).collect();
    for p in &unclear {
        state[p.index()] = Stability::Unclear;
    }

    while !unclear.is_empty() {
        // Judge every unclear stone against the state at the start of the pass.
        let verdicts: Vec<Stability> = unclear.iter().map(|&p| classify(board, &state, p)).collect();

        let before = unclear.len();
        let mut still_unclear = Vec::with_capacity(before);
        for (p, verdict) in unclear.into_iter().zip(verdicts) {
            state[p.index()] = verdict;
            if verdict == Stability::Unclear {
                still_unclear.push(p);
            }
        }
        unclear = still_unclear;

        if unclear.len() == before {
            break;
        }
    }

    Point::all()
        .filter(|p| state[p.index()] == Stability::Stable)
        .collect()
}

fn classify(board: &Board, state: &[Stability; CELLS], p: Point) -> Stability {
    let mut verdict = Stability::Stable;
    for dir in Direction::ALL {
        match classify_direction(board, state, p, dir) {
            Stability::Unstable => return Stability::Unstable,
            Stability::Unclear => verdict = Stability::Unclear,
            Stability::Stable => {}
        }
    }
    verdict
}

fn classify_direction(board: &Board, state: &[Stability; CELLS], p: Point, dir: Direction) -> Stability {
    if p.ray(dir).all(|q| board.get(q).is_some()) {
        return Stability::Stable;
    }
    let Some(behind) = p.neighbor(dir.opposite()) else {
        return Stability::Stable;
    };
    if board.get(behind) != board.get(p) {
        return Stability::Unstable;
    }
    state[behind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::constants::{HEIGHT, WIDTH};

    fn pt(s: &str) -> Point {
        s.parse().unwrap()
    }

    #[test]
    fn test_initial_board_has_no_stable_stones() {
        assert!(stable_points(&Board::new()).is_empty());
    }

    #[test]
    fn test_lone_corner_is_stable() {
        let board = Board::from_stones([(pt("a1"), Color::Black)]);
        assert_eq!(stable_points(&board), BTreeSet::from([pt("a1")]));
    }

    #[test]
    fn test_edge_chain_from_corner_is_stable() {
        let board = Board::from_stones([
            (pt("a1"), Color::Black),
            (pt("b1"), Color::Black),
            (pt("c1"), Color::Black),
            (pt("a2"), Color::White),
        ]);
        let stable = stable_points(&board);
        assert!(stable.contains(&pt("a1")));
        assert!(stable.contains(&pt("b1")));
        assert!(stable.contains(&pt("c1")));
        // Black a1 above, open a3 below.
        assert!(!stable.contains(&pt("a2")));
    }

    #[test]
    fn test_stone_next_to_opponent_corner_is_unstable() {
        let board = Board::from_stones([(pt("a1"), Color::Black), (pt("b1"), Color::White)]);
        assert_eq!(stable_points(&board), BTreeSet::from([pt("a1")]));
    }

    #[test]
    fn test_full_board_is_entirely_stable() {
        let stones = Point::all().map(|p| {
            let color = if (p.row() + p.col()) % 2 == 0 {
                Color::Black
            } else {
                Color::White
            };
            (p, color)
        });
        let board = Board::from_stones(stones);
        assert_eq!(stable_points(&board).len(), HEIGHT * WIDTH);
    }

    #[test]
    fn test_interleaved_row_is_underestimated() {
        // Row 1 alternates colors from a1 to g1 and only h1 is open. White b1
        // sits between two black stones and cannot be flipped, yet it is
        // reported unstable because its left neighbor differs in color.
        let mut stones: Vec<(Point, Color)> = (0..WIDTH - 1)
            .map(|col| {
                let color = if col % 2 == 0 { Color::Black } else { Color::White };
                (Point::at(0, col), color)
            })
            .collect();
        stones.push((pt("a2"), Color::White));
        stones.push((pt("b2"), Color::White));
        stones.push((pt("c2"), Color::White));
        let board = Board::from_stones(stones);
        let stable = stable_points(&board);
        assert!(stable.contains(&pt("a1")));
        assert!(!stable.contains(&pt("b1")));
    }
}
