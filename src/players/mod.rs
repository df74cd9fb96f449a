//! Move-selection agents.
//!
//! Every agent implements [`Player`]. The harness never names concrete
//! types: it looks players up by name in a [`Registry`] that the caller
//! builds and passes in, and creates a fresh instance for every game.
//!
//! Players that search work against a deadline derived from two budgets:
//! the fixed per-turn limit and a fair share of the remaining game clock.
//! See [`turn_deadline`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Color};
use crate::eval::Evaluator;
use crate::point::Point;

pub mod depth_first;
pub mod mixed;
pub mod monte_carlo;
pub mod random;
pub mod rule_based;
pub mod simplest;
pub mod width_first;

pub use depth_first::DepthFirstPlayer;
pub use mixed::{MixedConfig, MixedPlayer};
pub use monte_carlo::MonteCarloPlayer;
pub use random::RandomPlayer;
pub use rule_based::RuleBasedPlayer;
pub use simplest::SimplestPlayer;
pub use width_first::WidthFirstPlayer;

/// An agent that picks a move for its own color.
pub trait Player: Send {
    /// Choose where to play on `board`, or `None` to pass.
    ///
    /// `millis_in_game` is the thinking time this player has left in the
    /// game. The board is a snapshot; the player must not assume it will see
    /// the same instance again.
    fn choose_point(&mut self, board: &Board, millis_in_game: u64) -> Option<Point>;
}

/// Builds a player for one game: `(color, millis_in_game, millis_per_turn)`.
pub type PlayerFactory = Arc<dyn Fn(Color, u64, u64) -> Box<dyn Player> + Send + Sync>;

/// Errors raised by the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown player `{0}`")]
    UnknownPlayer(String),
}

/// A registered player kind.
#[derive(Clone)]
pub struct Entry {
    pub name: &'static str,
    pub description: &'static str,
    pub factory: PlayerFactory,
}

/// Name-to-factory table of the players a harness may create.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every player this crate ships, with default settings.
    pub fn builtin() -> Self {
        Self::configured(Evaluator::default(), MixedConfig::default())
    }

    /// Every player this crate ships, with `width-first` scoring boards with
    /// `evaluator` and `mixed` switching strategies at `mixed`.
    pub fn configured(evaluator: Evaluator, mixed: MixedConfig) -> Self {
        let mut registry = Self::new();
        registry.register("simplest", "first legal move in row-major order", |c, _, _| {
            Box::new(SimplestPlayer::new(c))
        });
        registry.register("random", "uniformly random legal move", |c, _, _| {
            Box::new(RandomPlayer::new(c))
        });
        registry.register(
            "depth-first",
            "exhaustive depth-first search for a forced win or draw",
            |c, _, per_turn| Box::new(DepthFirstPlayer::new(c, per_turn)),
        );
        registry.register(
            "monte-carlo",
            "random playouts, best win ratio",
            |c, _, per_turn| Box::new(MonteCarloPlayer::new(c, per_turn)),
        );
        registry.register(
            "width-first",
            "breadth-first minimax over a static evaluation",
            move |c, _, per_turn| Box::new(WidthFirstPlayer::new(c, per_turn).with_evaluator(evaluator)),
        );
        registry.register(
            "rule-based",
            "corners, stable stones, then known good cells",
            |c, _, _| Box::new(RuleBasedPlayer::new(c)),
        );
        registry.register(
            "mixed",
            "switches strategy with the number of empty cells",
            move |c, _, per_turn| Box::new(MixedPlayer::new(c, per_turn).with_config(mixed)),
        );
        registry
    }

    /// Add a player kind. A later registration replaces an earlier one with
    /// the same name.
    pub fn register(
        &mut self,
        name: &'static str,
        description: &'static str,
        factory: impl Fn(Color, u64, u64) -> Box<dyn Player> + Send + Sync + 'static,
    ) {
        let entry = Entry {
            name,
            description,
            factory: Arc::new(factory),
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Create a player by name.
    ///
    /// # Errors
    /// [`RegistryError::UnknownPlayer`] if no entry has that name.
    pub fn create(
        &self,
        name: &str,
        color: Color,
        millis_in_game: u64,
        millis_per_turn: u64,
    ) -> Result<Box<dyn Player>, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| (e.factory)(color, millis_in_game, millis_per_turn))
            .ok_or_else(|| RegistryError::UnknownPlayer(name.to_string()))
    }
}

/// The instant by which a searching player must have decided.
///
/// The budget is the per-turn limit or an even share of the remaining game
/// time over this player's remaining turns, whichever is smaller, minus
/// `margin`. Remaining turns are estimated as half the empty cells, rounded up.
pub fn turn_deadline(board: &Board, millis_in_game: u64, millis_per_turn: u64, margin: u64) -> Instant {
    let own_turns = (board.empty_cells() as u64).div_ceil(2).max(1);
    let millis = millis_per_turn.min(millis_in_game / own_turns).saturating_sub(margin);
    Instant::now() + Duration::from_millis(millis)
}

/// A uniformly random element of `points`, or `None` if it is empty.
pub(crate) fn pick(points: &[Point], rng: &mut fastrand::Rng) -> Option<Point> {
    if points.is_empty() {
        None
    } else {
        Some(points[rng.usize(..points.len())])
    }
}
