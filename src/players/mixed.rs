//! Player that switches strategy as the board fills up.

use std::str::FromStr;

use log::debug;

use crate::board::{Board, Color};
use crate::constants::{MIXED_MONTE_CARLO_ABOVE, MIXED_RANDOM_ABOVE, MIXED_RULE_BASED_ABOVE};
use crate::players::{DepthFirstPlayer, MonteCarloPlayer, Player, RandomPlayer, RuleBasedPlayer};
use crate::point::Point;

/// Empty-cell thresholds. With more empty cells than `random_above` the
/// player moves at random, then rule-based, then Monte Carlo, and at or below
/// `monte_carlo_above` the depth-first solver plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MixedConfig {
    pub random_above: usize,
    pub rule_based_above: usize,
    pub monte_carlo_above: usize,
}

impl Default for MixedConfig {
    fn default() -> Self {
        MixedConfig {
            random_above: MIXED_RANDOM_ABOVE,
            rule_based_above: MIXED_RULE_BASED_ABOVE,
            monte_carlo_above: MIXED_MONTE_CARLO_ABOVE,
        }
    }
}

/// Error returned when thresholds are not three non-increasing counts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMixedConfigError {
    #[error("expected three comma-separated thresholds, got `{0}`")]
    Format(String),
    #[error("thresholds must not increase: `{0}`")]
    Increasing(String),
}

/// Parses `random,rule_based,monte_carlo`, e.g. `50,35,10`.
impl FromStr for MixedConfig {
    type Err = ParseMixedConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = || ParseMixedConfigError::Format(s.to_string());
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format())?;
        let [random_above, rule_based_above, monte_carlo_above] = values[..] else {
            return Err(format());
        };
        if random_above < rule_based_above || rule_based_above < monte_carlo_above {
            return Err(ParseMixedConfigError::Increasing(s.to_string()));
        }
        Ok(MixedConfig {
            random_above,
            rule_based_above,
            monte_carlo_above,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Random,
    RuleBased,
    MonteCarlo,
    DepthFirst,
}

impl MixedConfig {
    fn phase(&self, empty_cells: usize) -> Phase {
        if empty_cells > self.random_above {
            Phase::Random
        } else if empty_cells > self.rule_based_above {
            Phase::RuleBased
        } else if empty_cells > self.monte_carlo_above {
            Phase::MonteCarlo
        } else {
            Phase::DepthFirst
        }
    }
}

pub struct MixedPlayer {
    color: Color,
    config: MixedConfig,
    random: RandomPlayer,
    rule_based: RuleBasedPlayer,
    monte_carlo: MonteCarloPlayer,
    depth_first: DepthFirstPlayer,
}

impl MixedPlayer {
    pub fn new(color: Color, millis_per_turn: u64) -> Self {
        Self {
            color,
            config: MixedConfig::default(),
            random: RandomPlayer::new(color),
            rule_based: RuleBasedPlayer::new(color),
            monte_carlo: MonteCarloPlayer::new(color, millis_per_turn),
            depth_first: DepthFirstPlayer::new(color, millis_per_turn),
        }
    }

    pub fn with_config(mut self, config: MixedConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed every delegate.
    pub fn seeded(self, seed: u64) -> Self {
        Self {
            random: self.random.seeded(seed),
            rule_based: self.rule_based.seeded(seed.wrapping_add(1)),
            monte_carlo: self.monte_carlo.seeded(seed.wrapping_add(2)),
            depth_first: self.depth_first.seeded(seed.wrapping_add(3)),
            ..self
        }
    }
}

impl Player for MixedPlayer {
    fn choose_point(&mut self, board: &Board, millis_in_game: u64) -> Option<Point> {
        let phase = self.config.phase(board.empty_cells());
        debug!("mixed {}: {phase:?} with {} empty cells", self.color, board.empty_cells());
        match phase {
            Phase::Random => self.random.choose_point(board, millis_in_game),
            Phase::RuleBased => self.rule_based.choose_point(board, millis_in_game),
            Phase::MonteCarlo => self.monte_carlo.choose_point(board, millis_in_game),
            Phase::DepthFirst => self.depth_first.choose_point(board, millis_in_game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legal_moves;

    #[test]
    fn test_default_phases() {
        let config = MixedConfig::default();
        assert_eq!(config.phase(60), Phase::Random);
        assert_eq!(config.phase(51), Phase::Random);
        assert_eq!(config.phase(50), Phase::RuleBased);
        assert_eq!(config.phase(36), Phase::RuleBased);
        assert_eq!(config.phase(35), Phase::MonteCarlo);
        assert_eq!(config.phase(11), Phase::MonteCarlo);
        assert_eq!(config.phase(10), Phase::DepthFirst);
        assert_eq!(config.phase(0), Phase::DepthFirst);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = MixedConfig {
            random_above: 64,
            rule_based_above: 64,
            monte_carlo_above: 64,
        };
        assert_eq!(config.phase(60), Phase::DepthFirst);
    }

    #[test]
    fn test_parse_thresholds() {
        assert_eq!("50,35,10".parse::<MixedConfig>(), Ok(MixedConfig::default()));
        assert_eq!(
            " 64, 0 ,0".parse::<MixedConfig>(),
            Ok(MixedConfig {
                random_above: 64,
                rule_based_above: 0,
                monte_carlo_above: 0,
            })
        );
        for bad in ["", "50,35", "50,35,10,5", "a,b,c", "50,-1,0"] {
            assert!(matches!(bad.parse::<MixedConfig>(), Err(ParseMixedConfigError::Format(_))), "{bad}");
        }
        assert_eq!(
            "10,35,50".parse::<MixedConfig>(),
            Err(ParseMixedConfigError::Increasing("10,35,50".to_string()))
        );
    }

    #[test]
    fn test_every_phase_plays_legally() {
        let board = Board::new();
        let legal = legal_moves(&board, Color::Black);
        let configs = [
            MixedConfig::default(),
            MixedConfig {
                random_above: 64,
                ..MixedConfig::default()
            },
            MixedConfig {
                random_above: 64,
                rule_based_above: 64,
                ..MixedConfig::default()
            },
        ];
        for config in configs {
            let mut player = MixedPlayer::new(Color::Black, 20).with_config(config).seeded(9);
            let chosen = player.choose_point(&board, 10_000).unwrap();
            assert!(legal.contains(&chosen), "{config:?} chose {chosen}");
        }
    }
}
