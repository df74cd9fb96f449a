//! Reversi-Rust command line.
//!
//! ## Usage
//!
//! - `reversi-rust players` - List the available players
//! - `reversi-rust game --black NAME --white NAME` - Play one game
//! - `reversi-rust match A B --times N` - Play N games, alternating colors
//! - `reversi-rust league NAME... --times N` - Round robin between players
//!
//! The global flags `--evaluator NAME` and `--mixed-thresholds R,B,M` tune
//! the `width-first` and `mixed` players for every subcommand.
//!
//! Logging goes through `env_logger`; set `RUST_LOG` to change the level.

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};

use reversi_rust::board::Color;
use reversi_rust::constants::{DEFAULT_MILLIS_IN_GAME, DEFAULT_MILLIS_PER_TURN};
use reversi_rust::eval::Evaluator;
use reversi_rust::game::{GameConfig, play_game_observed, play_league, play_match};
use reversi_rust::players::{MixedConfig, Registry};

/// Reversi-Rust: Reversi AI players and a game harness
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Static evaluation used by the width-first player
    #[arg(long, global = true, default_value = "positional")]
    evaluator: Evaluator,
    /// Empty-cell thresholds of the mixed player: random, rule-based, Monte Carlo
    #[arg(long, global = true, default_value = "50,35,10")]
    mixed_thresholds: MixedConfig,
}

#[derive(Args, Clone, Copy)]
struct Clock {
    /// Total thinking time per player and game (milliseconds)
    #[arg(long, default_value_t = DEFAULT_MILLIS_IN_GAME)]
    millis_in_game: u64,
    /// Thinking time limit per move (milliseconds)
    #[arg(long, default_value_t = DEFAULT_MILLIS_PER_TURN)]
    millis_per_turn: u64,
}

impl From<Clock> for GameConfig {
    fn from(clock: Clock) -> Self {
        GameConfig {
            millis_in_game: clock.millis_in_game,
            millis_per_turn: clock.millis_per_turn,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the available players
    Players,
    /// Play a single game
    Game {
        #[arg(long, default_value = "rule-based")]
        black: String,
        #[arg(long, default_value = "random")]
        white: String,
        /// Only print the final result
        #[arg(long)]
        quiet: bool,
        #[command(flatten)]
        clock: Clock,
    },
    /// Play a series of games between two players, alternating colors
    Match {
        a: String,
        b: String,
        #[arg(long, default_value_t = 10)]
        times: u32,
        #[command(flatten)]
        clock: Clock,
    },
    /// Play a match between every pair of players
    League {
        #[arg(required = true, num_args = 2..)]
        players: Vec<String>,
        #[arg(long, default_value_t = 10)]
        times: u32,
        #[command(flatten)]
        clock: Clock,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let registry = Registry::configured(cli.evaluator, cli.mixed_thresholds);

    match cli.command {
        Commands::Players => {
            for entry in registry.entries() {
                println!("{:<12} {}", entry.name, entry.description);
            }
        }
        Commands::Game {
            black,
            white,
            quiet,
            clock,
        } => {
            let config = clock.into();
            let result = play_game_observed(&registry, &black, &white, &config, |mv, board| {
                if !quiet {
                    println!("{mv}\n{board}");
                }
            })
            .context("game aborted")?;

            println!("{}", result.board);
            println!(
                "{} {}  {} {}",
                Color::Black,
                result.board.count(Color::Black),
                Color::White,
                result.board.count(Color::White)
            );
            if let (Some(reason), Some(winner)) = (result.forfeit, result.winner) {
                println!("{:?} {reason}", winner.opposite());
            }
            match result.winner {
                Some(Color::Black) => println!("winner: {black} ({})", Color::Black),
                Some(Color::White) => println!("winner: {white} ({})", Color::White),
                None => println!("draw"),
            }
        }
        Commands::Match { a, b, times, clock } => {
            ensure!(times > 0, "--times must be at least 1");
            let result = play_match(&registry, &a, &b, times, &clock.into())?;
            println!("{a}: {}", result.record);
            println!("{b}: {}", result.b_record());
        }
        Commands::League { players, times, clock } => {
            ensure!(times > 0, "--times must be at least 1");
            let league = play_league(&registry, &players, times, &clock.into())?;
            print!("{league}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_default() {
        let cli = Cli::try_parse_from(["reversi-rust", "players"]).unwrap();
        assert_eq!(cli.evaluator, Evaluator::Positional);
        assert_eq!(cli.mixed_thresholds, MixedConfig::default());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reversi-rust",
            "game",
            "--black",
            "width-first",
            "--evaluator",
            "Mobility",
            "--mixed-thresholds",
            "60,20,12",
        ])
        .unwrap();
        assert_eq!(cli.evaluator, Evaluator::Mobility);
        assert_eq!(cli.mixed_thresholds.rule_based_above, 20);
        assert!(Registry::configured(cli.evaluator, cli.mixed_thresholds).contains("width-first"));
    }

    #[test]
    fn test_bad_global_flags_are_rejected() {
        assert!(Cli::try_parse_from(["reversi-rust", "players", "--evaluator", "magic"]).is_err());
        assert!(Cli::try_parse_from(["reversi-rust", "players", "--mixed-thresholds", "1,2,3"]).is_err());
    }
}
