//! Board coordinates and compass directions.
//!
//! A [`Point`] is a plain value: two points are the same cell iff their row and
//! column are equal. Points order row-major, which is also the order
//! [`Point::all`] yields them in. The textual form is the column letter
//! followed by the 1-based row number, so the top-left cell is `"a1"` and the
//! bottom-right cell of an 8x8 board is `"h8"`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, HEIGHT, WIDTH};

/// One of the eight compass directions on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

/// Opposite of each direction, indexed by `Direction as usize`.
const OPPOSITE: [Direction; 8] = [
    Direction::Down,
    Direction::DownLeft,
    Direction::Left,
    Direction::UpLeft,
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::DownRight,
];

impl Direction {
    /// All directions, clockwise starting from `Up`.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Row and column offset of one step in this direction.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::UpLeft => (-1, -1),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        OPPOSITE[self as usize]
    }
}

/// A cell of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    row: u8,
    col: u8,
}

impl Point {
    /// The point at `(row, col)`, or `None` if it lies off the board.
    pub const fn new(row: usize, col: usize) -> Option<Point> {
        if row < HEIGHT && col < WIDTH {
            Some(Point::at(row, col))
        } else {
            None
        }
    }

    /// The point at `(row, col)`.
    ///
    /// # Panics
    /// If the coordinates lie off the board. Meant for fixed cells such as
    /// corners, where the coordinates come from the board constants.
    pub const fn at(row: usize, col: usize) -> Point {
        assert!(row < HEIGHT && col < WIDTH, "point off the board");
        Point {
            row: row as u8,
            col: col as u8,
        }
    }

    /// The point with the given row-major index.
    pub const fn from_index(index: usize) -> Option<Point> {
        if index < CELLS {
            Some(Point::at(index / WIDTH, index % WIDTH))
        } else {
            None
        }
    }

    /// Zero-based row (`0` is the row labelled `1`).
    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    /// Zero-based column (`0` is the column labelled `a`).
    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index of this point.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * WIDTH + self.col as usize
    }

    /// Every point of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..CELLS).map(|i| Point::at(i / WIDTH, i % WIDTH))
    }

    /// The adjacent point in `direction`, or `None` at the board edge.
    #[inline]
    pub fn neighbor(self, direction: Direction) -> Option<Point> {
        let (dr, dc) = direction.offset();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Point::new(row as usize, col as usize)
    }

    /// Successive points in `direction`, not including `self`, up to the edge.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Point> {
        std::iter::successors(self.neighbor(direction), move |p| p.neighbor(direction))
    }

    /// True for the four corner cells.
    #[inline]
    pub const fn is_corner(self) -> bool {
        (self.row == 0 || self.row as usize == HEIGHT - 1)
            && (self.col == 0 || self.col as usize == WIDTH - 1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// Error returned when parsing a point from text fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point `{0}`: expected a column letter and a row number such as \"d3\"")]
pub struct ParsePointError(String);

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parse the `"a1"` form. Column letters are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(err)?.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(err());
        }
        let col = (letter as u8 - b'a') as usize;
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let row: usize = digits.parse().map_err(|_| err())?;
        Point::new(row - 1, col).ok_or_else(err)
    }
}
