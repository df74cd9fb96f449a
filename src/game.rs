//! Game harness: single games, matches and round-robin leagues.
//!
//! Players are created by name through a [`Registry`], one fresh instance per
//! game. Each turn the player gets a copy of the board and its remaining game
//! time. A player that panics, overruns the per-turn limit or its game clock,
//! or answers with a move the rules reject forfeits the game.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::board::{Board, Color, Move};
use crate::constants::{DEFAULT_MILLIS_IN_GAME, DEFAULT_MILLIS_PER_TURN};
use crate::players::Registry;
use crate::record::{Outcome, Record};
use crate::rules::{can_apply, is_game_over, winner};

/// Clock settings shared by both players.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Total thinking time per player (milliseconds).
    pub millis_in_game: u64,
    /// Thinking time limit per move (milliseconds).
    pub millis_per_turn: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            millis_in_game: DEFAULT_MILLIS_IN_GAME,
            millis_per_turn: DEFAULT_MILLIS_PER_TURN,
        }
    }
}

/// Why a player lost without the game being played out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Forfeit {
    Panicked,
    TurnTimeExceeded,
    GameTimeExceeded,
    IllegalMove,
}

impl fmt::Display for Forfeit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Forfeit::Panicked => "panicked",
            Forfeit::TurnTimeExceeded => "exceeded the time per turn",
            Forfeit::GameTimeExceeded => "exceeded the time per game",
            Forfeit::IllegalMove => "played an illegal move",
        })
    }
}

#[derive(Clone, Debug)]
pub struct GameResult {
    /// `None` for a draw.
    pub winner: Option<Color>,
    /// The final board. On a forfeit, the board before the offending turn.
    pub board: Board,
    /// Set when the loser forfeited.
    pub forfeit: Option<Forfeit>,
    /// Moves played, passes included, in order.
    pub moves: Vec<Move>,
}

const fn slot(color: Color) -> usize {
    match color {
        Color::Black => 0,
        Color::White => 1,
    }
}

/// Play one game between the players registered as `black` and `white`.
pub fn play_game(registry: &Registry, black: &str, white: &str, config: &GameConfig) -> Result<GameResult> {
    play_game_observed(registry, black, white, config, |_, _| {})
}

/// Like [`play_game`], calling `observe` with every move and the board after it.
pub fn play_game_observed(
    registry: &Registry,
    black: &str,
    white: &str,
    config: &GameConfig,
    mut observe: impl FnMut(&Move, &Board),
) -> Result<GameResult> {
    let mut players = [
        registry
            .create(black, Color::Black, config.millis_in_game, config.millis_per_turn)
            .with_context(|| format!("cannot create black player `{black}`"))?,
        registry
            .create(white, Color::White, config.millis_in_game, config.millis_per_turn)
            .with_context(|| format!("cannot create white player `{white}`"))?,
    ];
    let names = [black, white];
    let mut remaining = [config.millis_in_game; 2];
    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut color = Color::Black;

    while !is_game_over(&board) {
        let i = slot(color);
        let snapshot = board.clone();
        let started = Instant::now();
        let chosen = panic::catch_unwind(AssertUnwindSafe(|| players[i].choose_point(&snapshot, remaining[i])));
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let verdict = match chosen {
            Err(_) => Err(Forfeit::Panicked),
            Ok(_) if elapsed > config.millis_per_turn => Err(Forfeit::TurnTimeExceeded),
            Ok(_) if elapsed > remaining[i] => Err(Forfeit::GameTimeExceeded),
            Ok(point) => {
                let mv = Move::new(color, point);
                if can_apply(&board, &mv) {
                    Ok(mv)
                } else {
                    Err(Forfeit::IllegalMove)
                }
            }
        };

        let mv = match verdict {
            Ok(mv) => mv,
            Err(reason) => {
                info!("{} ({color:?}) forfeits: {reason} after {elapsed} ms", names[i]);
                return Ok(GameResult {
                    winner: Some(color.opposite()),
                    board,
                    forfeit: Some(reason),
                    moves,
                });
            }
        };

        remaining[i] -= elapsed;
        board.apply(mv)?;
        debug!("{} played {mv} in {elapsed} ms, {} ms left", names[i], remaining[i]);
        observe(&mv, &board);
        moves.push(mv);
        color = color.opposite();
    }

    let winner = winner(&board)?;
    info!(
        "{black} (Black) {} - {} {white} (White): {}",
        board.count(Color::Black),
        board.count(Color::White),
        match winner {
            Some(Color::Black) => black,
            Some(Color::White) => white,
            None => "draw",
        }
    );
    Ok(GameResult {
        winner,
        board,
        forfeit: None,
        moves,
    })
}

/// Result of a match, from player A's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub a: String,
    pub b: String,
    pub record: Record,
}

impl MatchResult {
    /// B's record.
    pub fn b_record(&self) -> Record {
        self.record.opposite()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}: {}", self.a, self.b, self.record)
    }
}

/// Play `times` games between `a` and `b`. A takes Black in the first game
/// and the colors alternate from there.
pub fn play_match(registry: &Registry, a: &str, b: &str, times: u32, config: &GameConfig) -> Result<MatchResult> {
    for name in [a, b] {
        if !registry.contains(name) {
            bail!("unknown player `{name}`");
        }
    }

    let mut record = Record::default();
    for game in 0..times {
        let a_color = if game % 2 == 0 { Color::Black } else { Color::White };
        let (black, white) = match a_color {
            Color::Black => (a, b),
            Color::White => (b, a),
        };
        let result = play_game(registry, black, white, config)
            .with_context(|| format!("game {} of {a} vs {b}", game + 1))?;
        record.record(Outcome::for_side(a_color, result.winner));
    }

    let result = MatchResult {
        a: a.to_string(),
        b: b.to_string(),
        record,
    };
    info!("{result}");
    Ok(result)
}

/// Cross table of a round-robin league.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeagueResult {
    pub players: Vec<String>,
    /// `table[i][j]` is player `i`'s record against player `j`.
    table: Vec<Vec<Record>>,
}

impl LeagueResult {
    /// Player `i`'s record against player `j`.
    pub fn record(&self, i: usize, j: usize) -> Record {
        self.table[i][j]
    }

    /// Player `i`'s record over the whole league.
    pub fn total(&self, i: usize) -> Record {
        self.table[i].iter().fold(Record::default(), |acc, &r| acc + r)
    }
}

impl fmt::Display for LeagueResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |r: Record| format!("{}/{}/{}", r.wins, r.draws, r.losses);
        let name_width = self.players.iter().map(String::len).max().unwrap_or(0);
        let cell_width = (0..self.players.len())
            .flat_map(|i| (0..self.players.len()).map(move |j| (i, j)))
            .map(|(i, j)| cell(self.table[i][j]).len())
            .chain((0..self.players.len()).map(|i| cell(self.total(i)).len()))
            .chain(self.players.iter().map(String::len))
            .chain(["total".len()])
            .max()
            .unwrap_or(0);

        write!(f, "{:name_width$}", "")?;
        for name in &self.players {
            write!(f, " | {name:>cell_width$}")?;
        }
        writeln!(f, " | {:>cell_width$}", "total")?;

        for (i, name) in self.players.iter().enumerate() {
            write!(f, "{name:name_width$}")?;
            for j in 0..self.players.len() {
                let text = if i == j { "-".to_string() } else { cell(self.table[i][j]) };
                write!(f, " | {text:>cell_width$}")?;
            }
            writeln!(f, " | {:>cell_width$}", cell(self.total(i)))?;
        }
        Ok(())
    }
}

/// Play a match of `times` games between every pair of `players`.
pub fn play_league<S: AsRef<str>>(
    registry: &Registry,
    players: &[S],
    times: u32,
    config: &GameConfig,
) -> Result<LeagueResult> {
    let names: Vec<String> = players.iter().map(|p| p.as_ref().to_string()).collect();
    let n = names.len();
    let mut table = vec![vec![Record::default(); n]; n];

    for i in 0..n {
        for j in i + 1..n {
            let result = play_match(registry, &names[i], &names[j], times, config)?;
            table[i][j] = result.record;
            table[j][i] = result.b_record();
        }
    }

    Ok(LeagueResult { players: names, table })
}
