//! Exhaustive depth-first solver.
//!
//! Reads the game tree to the end and plays a move that forces a win if one
//! exists, otherwise one that forces at least a draw, otherwise any move.
//! Only practical near the end of the game; when the deadline passes in the
//! middle of the search the player gives up and plays a random legal move.

use std::convert::Infallible;
use std::time::Instant;

use log::debug;

use crate::board::{Board, Color};
use crate::constants::DEPTH_FIRST_MARGIN;
use crate::players::{Player, pick, turn_deadline};
use crate::point::Point;
use crate::rules::{has_legal_move, leader, legal_moves};

/// Raised inside the search when the deadline has passed.
struct TimeUp;

/// When the search has to stop. `Stop` is the error that unwinds it.
trait Limit {
    type Stop;

    fn check(&self) -> Result<(), Self::Stop>;
}

impl Limit for Instant {
    type Stop = TimeUp;

    fn check(&self) -> Result<(), TimeUp> {
        if *self < Instant::now() { Err(TimeUp) } else { Ok(()) }
    }
}

/// No limit: the search always runs to the end.
struct Unbounded;

impl Limit for Unbounded {
    type Stop = Infallible;

    fn check(&self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Search state shared by one `choose_point` or `solve` call.
struct Search<'a, L: Limit> {
    limit: L,
    rng: &'a mut fastrand::Rng,
    nodes: u64,
}

type Resolved = (Option<Point>, Option<Color>);

impl<L: Limit> Search<'_, L> {
    /// The move `color` should play on `board` and the winner under best play
    /// from both sides. The move is `None` at game over and for a pass.
    fn resolve(&mut self, board: &Board, color: Color) -> Result<Resolved, L::Stop> {
        self.nodes += 1;
        let opponent = color.opposite();
        let moves = legal_moves(board, color);

        if moves.is_empty() && !has_legal_move(board, opponent) {
            return Ok((None, leader(board)));
        }
        self.limit.check()?;
        if moves.is_empty() {
            let (_, winner) = self.resolve(board, opponent)?;
            return Ok((None, winner));
        }

        let mut draws = Vec::new();
        for &pt in &moves {
            let mut next = board.clone();
            next.place(color, pt);
            match self.resolve(&next, opponent)? {
                (_, Some(w)) if w == color => return Ok((Some(pt), Some(color))),
                (_, None) => draws.push(pt),
                _ => {}
            }
        }

        if draws.is_empty() {
            Ok((pick(&moves, self.rng), Some(opponent)))
        } else {
            Ok((pick(&draws, self.rng), None))
        }
    }
}

/// The winner of the game from `board` with `to_move` to play, assuming both
/// sides play perfectly (`None` for a draw). Unbounded in time.
pub fn solve(board: &Board, to_move: Color) -> Option<Color> {
    let mut rng = fastrand::Rng::new();
    let mut search = Search {
        limit: Unbounded,
        rng: &mut rng,
        nodes: 0,
    };
    let Ok((_, winner)) = search.resolve(board, to_move);
    winner
}

pub struct DepthFirstPlayer {
    color: Color,
    millis_per_turn: u64,
    rng: fastrand::Rng,
}

impl DepthFirstPlayer {
    pub fn new(color: Color, millis_per_turn: u64) -> Self {
        Self {
            color,
            millis_per_turn,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a fixed seed for reproducible tie-breaking.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }
}

impl Player for DepthFirstPlayer {
    fn choose_point(&mut self, board: &Board, millis_in_game: u64) -> Option<Point> {
        let moves = legal_moves(board, self.color);
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        let deadline = turn_deadline(board, millis_in_game, self.millis_per_turn, DEPTH_FIRST_MARGIN);
        let mut search = Search {
            limit: deadline,
            rng: &mut self.rng,
            nodes: 0,
        };
        let result = search.resolve(board, self.color);
        let nodes = search.nodes;

        match result {
            Ok((pt, winner)) => {
                let verdict = match winner {
                    Some(c) if c == self.color => "win",
                    Some(_) => "loss",
                    None => "draw",
                };
                debug!("depth-first {}: forced {verdict} after {nodes} nodes", self.color);
                pt.or_else(|| pick(&moves, &mut self.rng))
            }
            Err(TimeUp) => {
                debug!("depth-first {}: time up after {nodes} nodes", self.color);
                pick(&moves, &mut self.rng)
            }
        }
    }
}
