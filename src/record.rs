//! Win/draw/loss tallies.
//!
//! A [`Record`] is kept from one side's point of view. Ratios of an empty
//! record are `0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::board::Color;

/// Result of one game for a given side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// The outcome for `side` of a game won by `winner` (`None` for a draw).
    pub fn for_side(side: Color, winner: Option<Color>) -> Outcome {
        match winner {
            Some(c) if c == side => Outcome::Win,
            Some(_) => Outcome::Loss,
            None => Outcome::Draw,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Record {
    pub const fn new(wins: u32, draws: u32, losses: u32) -> Self {
        Record { wins, draws, losses }
    }

    /// Count one more game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    /// Total number of games.
    #[inline]
    pub fn total(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn win_ratio(&self) -> f64 {
        self.ratio(self.wins)
    }

    pub fn draw_ratio(&self) -> f64 {
        self.ratio(self.draws)
    }

    pub fn loss_ratio(&self) -> f64 {
        self.ratio(self.losses)
    }

    fn ratio(&self, count: u32) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    /// The same games seen from the other side.
    pub fn opposite(&self) -> Record {
        Record {
            wins: self.losses,
            draws: self.draws,
            losses: self.wins,
        }
    }

    /// Compare performance: higher win ratio first, then lower loss ratio.
    /// The draw ratio never decides.
    pub fn performance_cmp(&self, other: &Record) -> Ordering {
        self.win_ratio()
            .total_cmp(&other.win_ratio())
            .then_with(|| other.loss_ratio().total_cmp(&self.loss_ratio()))
    }
}

impl Add for Record {
    type Output = Record;

    fn add(self, other: Record) -> Record {
        Record {
            wins: self.wins + other.wins,
            draws: self.draws + other.draws,
            losses: self.losses + other.losses,
        }
    }
}

impl AddAssign for Record {
    fn add_assign(&mut self, other: Record) {
        *self = *self + other;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wins {} ({:.1}%), draws {} ({:.1}%), losses {} ({:.1}%)",
            self.wins,
            self.win_ratio() * 100.0,
            self.draws,
            self.draw_ratio() * 100.0,
            self.losses,
            self.loss_ratio() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_ratios_are_zero() {
        let r = Record::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.win_ratio(), 0.0);
        assert_eq!(r.draw_ratio(), 0.0);
        assert_eq!(r.loss_ratio(), 0.0);
    }

    #[test]
    fn test_ratios() {
        let r = Record::new(2, 1, 1);
        assert_eq!(r.total(), 4);
        assert_eq!(r.win_ratio(), 0.5);
        assert_eq!(r.draw_ratio(), 0.25);
        assert_eq!(r.loss_ratio(), 0.25);
    }

    #[test]
    fn test_opposite_and_add() {
        let r = Record::new(3, 1, 2);
        assert_eq!(r.opposite(), Record::new(2, 1, 3));
        assert_eq!(r.opposite().opposite(), r);

        let mut sum = r;
        sum += Record::new(1, 1, 1);
        assert_eq!(sum, Record::new(4, 2, 3));
        assert_eq!(r + Record::default(), r);
    }

    #[test]
    fn test_record_outcomes() {
        let mut r = Record::default();
        r.record(Outcome::for_side(Color::Black, Some(Color::Black)));
        r.record(Outcome::for_side(Color::Black, Some(Color::White)));
        r.record(Outcome::for_side(Color::Black, None));
        assert_eq!(r, Record::new(1, 1, 1));
    }

    #[test]
    fn test_performance_order() {
        let better_wins = Record::new(3, 0, 1);
        let worse_wins = Record::new(1, 0, 3);
        assert_eq!(better_wins.performance_cmp(&worse_wins), Ordering::Greater);

        // Same win ratio: fewer losses is better.
        let few_losses = Record::new(1, 2, 1);
        let many_losses = Record::new(1, 0, 3);
        assert_eq!(few_losses.performance_cmp(&many_losses), Ordering::Greater);
        assert_eq!(many_losses.performance_cmp(&few_losses), Ordering::Less);

        // Draws alone do not separate records with equal win and loss ratios.
        assert_eq!(
            Record::new(2, 2, 0).performance_cmp(&Record::new(4, 4, 0)),
            Ordering::Equal
        );
    }
}
