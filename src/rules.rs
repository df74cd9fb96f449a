//! Reversi rules as pure functions over a [`Board`].
//!
//! A placement is legal when it lands on an empty cell and closes at least one
//! flip run: a contiguous line of opponent stones immediately followed by a
//! stone of the mover's color. Passing is legal only for a player without any
//! placement. The game ends when neither color can place a stone, which is
//! not the same thing as the board being full.

use crate::board::{Board, Color, GameError, Move};
use crate::point::{Direction, Point};

/// Points captured in one direction by `color` playing at `point`.
///
/// Appends to `out` and returns true if the run is closed by a stone of
/// `color`; leaves `out` untouched otherwise.
fn flip_run(board: &Board, color: Color, point: Point, dir: Direction, out: &mut Vec<Point>) -> bool {
    let start = out.len();
    for p in point.ray(dir) {
        match board.get(p) {
            Some(c) if c == color => return out.len() > start,
            Some(_) => out.push(p),
            None => break,
        }
    }
    out.truncate(start);
    false
}

/// True if `color` playing at `point` flips anything in `dir`.
fn closes_run(board: &Board, color: Color, point: Point, dir: Direction) -> bool {
    let opponent = color.opposite();
    let mut ray = point.ray(dir);
    match ray.next() {
        Some(p) if board.get(p) == Some(opponent) => {}
        _ => return false,
    }
    for p in ray {
        match board.get(p) {
            Some(c) if c == color => return true,
            Some(_) => {}
            None => return false,
        }
    }
    false
}

/// Points that flip when `color` plays at `point`, in row-major order.
///
/// Empty if `point` is occupied or the placement closes no flip run.
pub fn flips(board: &Board, color: Color, point: Point) -> Vec<Point> {
    let mut out = Vec::new();
    if board.get(point).is_some() {
        return out;
    }
    for dir in Direction::ALL {
        flip_run(board, color, point, dir, &mut out);
    }
    out.sort_unstable();
    out
}

/// True if `color` may place a stone at `point`.
pub fn is_legal(board: &Board, color: Color, point: Point) -> bool {
    board.get(point).is_none() && Direction::ALL.iter().any(|&d| closes_run(board, color, point, d))
}

/// Every point where `color` may place a stone, in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Point> {
    Point::all().filter(|&p| is_legal(board, color, p)).collect()
}

/// True if `color` has at least one legal placement.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    Point::all().any(|p| is_legal(board, color, p))
}

/// True if neither color can place a stone.
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board, Color::Black) && !has_legal_move(board, Color::White)
}

/// True if `mv` may be applied to `board`.
///
/// Always false once the game is over, passes included.
pub fn can_apply(board: &Board, mv: &Move) -> bool {
    if is_game_over(board) {
        return false;
    }
    match mv.point {
        None => !has_legal_move(board, mv.color),
        Some(p) => is_legal(board, mv.color, p),
    }
}

/// The color holding more stones on a finished board, or `None` on a tie.
///
/// # Errors
/// [`GameError::IllegalState`] while either color can still move.
pub fn winner(board: &Board) -> Result<Option<Color>, GameError> {
    if !is_game_over(board) {
        return Err(GameError::IllegalState("the game is still in progress"));
    }
    Ok(leader(board))
}

/// The color with more stones, or `None` on a tie, regardless of game state.
pub(crate) fn leader(board: &Board) -> Option<Color> {
    let black = board.count(Color::Black);
    let white = board.count(Color::White);
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => Some(Color::Black),
        std::cmp::Ordering::Less => Some(Color::White),
        std::cmp::Ordering::Equal => None,
    }
}
