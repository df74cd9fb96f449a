//! Board state, stone colors, and moves.
//!
//! [`Board`] is a plain owned value holding one `Option<Color>` per cell.
//! It can be advanced in place with [`Board::apply`] or functionally with
//! [`Board::applied`]; both go through the same private mutation primitive,
//! and both refuse moves the rules reject. Cloning a board always produces an
//! independent copy, so a board handed to a player can never alias the
//! caller's board.

use std::fmt;

use crate::constants::{CELLS, HEIGHT, WIDTH};
use crate::point::Point;
use crate::rules::{can_apply, flips};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Glyph used when rendering boards.
    pub const fn glyph(self) -> char {
        match self {
            Color::Black => '●',
            Color::White => '○',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A move: a stone of `color` placed at `point`, or a pass when `point` is `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub point: Option<Point>,
}

impl Move {
    pub const fn new(color: Color, point: Option<Point>) -> Self {
        Move { color, point }
    }

    pub const fn put(color: Color, point: Point) -> Self {
        Move {
            color,
            point: Some(point),
        }
    }

    pub const fn pass(color: Color) -> Self {
        Move { color, point: None }
    }

    #[inline]
    pub const fn is_pass(&self) -> bool {
        self.point.is_none()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some(p) => write!(f, "{} {p}", self.color),
            None => write!(f, "{} PASS", self.color),
        }
    }
}

/// Errors raised by board mutation and game-result queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The move fails the legality check.
    #[error("illegal move: {0}")]
    InvalidMove(Move),
    /// The query makes no sense in the current game state.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

/// Read-only access to a board's cells.
///
/// [`Board`] is the crate's only implementation; the trait exists so that
/// other representations can be compared with, and converted to, a `Board`
/// by their cell contents alone.
pub trait BoardView {
    /// The stone at `point`, if any.
    fn get(&self, point: Point) -> Option<Color>;

    /// Number of stones of `color`.
    fn count(&self, color: Color) -> usize {
        Point::all().filter(|&p| self.get(p) == Some(color)).count()
    }

    /// A `Board` with the same cell contents.
    fn to_board(&self) -> Board {
        let mut cells = [None; CELLS];
        for p in Point::all() {
            cells[p.index()] = self.get(p);
        }
        Board { cells }
    }

    /// True iff both views hold the same stone on every cell.
    fn same_cells(&self, other: &dyn BoardView) -> bool {
        Point::all().all(|p| self.get(p) == other.get(p))
    }
}

/// A Reversi board.
///
/// Equality and hashing are structural: two boards are equal iff every cell
/// holds the same stone.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Color>; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The starting position: the four central cells in a diamond, White on
    /// the main diagonal and Black on the anti-diagonal.
    pub fn new() -> Self {
        let (top, left) = ((HEIGHT - 1) / 2, (WIDTH - 1) / 2);
        let (bottom, right) = (HEIGHT / 2, WIDTH / 2);
        Self::from_stones([
            (Point::at(top, left), Color::White),
            (Point::at(bottom, right), Color::White),
            (Point::at(top, right), Color::Black),
            (Point::at(bottom, left), Color::Black),
        ])
    }

    /// A board without any stones. Useful for setting up positions.
    pub fn empty() -> Self {
        Board {
            cells: [None; CELLS],
        }
    }

    /// A board holding exactly the given stones. Later entries win on repeats.
    pub fn from_stones(stones: impl IntoIterator<Item = (Point, Color)>) -> Self {
        let mut board = Self::empty();
        for (p, c) in stones {
            board.cells[p.index()] = Some(c);
        }
        board
    }

    /// The stone at `point`, if any.
    #[inline]
    pub fn get(&self, point: Point) -> Option<Color> {
        self.cells[point.index()]
    }

    /// Number of stones of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Number of empty cells.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Every cell with its content, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Option<Color>)> + '_ {
        Point::all().map(move |p| (p, self.get(p)))
    }

    /// Apply `mv` in place.
    ///
    /// # Errors
    /// [`GameError::InvalidMove`] if the rules do not allow `mv` on this board;
    /// the board is left untouched.
    pub fn apply(&mut self, mv: Move) -> Result<(), GameError> {
        if !can_apply(self, &mv) {
            return Err(GameError::InvalidMove(mv));
        }
        if let Some(point) = mv.point {
            self.place(mv.color, point);
        }
        Ok(())
    }

    /// The board that results from `mv`, leaving `self` unchanged.
    ///
    /// # Errors
    /// [`GameError::InvalidMove`] if the rules do not allow `mv` on this board.
    pub fn applied(&self, mv: Move) -> Result<Board, GameError> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }

    /// Put a stone of `color` at `point` and flip what it captures.
    ///
    /// Legality is the caller's business: searches that only ever play moves
    /// taken from `legal_moves` use this to skip the re-check.
    pub(crate) fn place(&mut self, color: Color, point: Point) {
        for p in flips(self, color, point) {
            self.cells[p.index()] = Some(color);
        }
        self.cells[point.index()] = Some(color);
    }
}

impl BoardView for Board {
    fn get(&self, point: Point) -> Option<Color> {
        Board::get(self, point)
    }

    fn count(&self, color: Color) -> usize {
        Board::count(self, color)
    }

    fn to_board(&self) -> Board {
        self.clone()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..WIDTH {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..HEIGHT {
            write!(f, "{} ", row + 1)?;
            for col in 0..WIDTH {
                let ch = match self.get(Point::at(row, col)) {
                    Some(c) => c.glyph(),
                    None => '・',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}
