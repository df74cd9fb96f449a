//! Reversi-Rust: a Reversi (Othello) rules engine with a set of AI players.
//!
//! The crate provides the board and rules of 8x8 Reversi, a collection of
//! move-selection agents ranging from a uniformly random player to an
//! exhaustive endgame solver, and a small harness that pits them against each
//! other under a clock.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, clock defaults and player parameters
//! - [`point`] - Cell coordinates and the eight directions
//! - [`board`] - Board state, colors and moves
//! - [`rules`] - Flips, legal moves, game over and the winner
//! - [`stability`] - Stable stone detection
//! - [`record`] - Win/draw/loss tallies
//! - [`playout`] - Random game simulation
//! - [`eval`] - Static evaluators for the width-first player
//! - [`players`] - The `Player` trait, the registry and every agent
//! - [`game`] - Games, matches and leagues under a clock
//!
//! ## Example
//!
//! ```
//! use reversi_rust::board::{Board, Color, Move};
//! use reversi_rust::game::{GameConfig, play_game};
//! use reversi_rust::players::Registry;
//! use reversi_rust::rules::legal_moves;
//!
//! let board = Board::new();
//! let first = legal_moves(&board, Color::Black)[0];
//! let board = board.applied(Move::put(Color::Black, first)).unwrap();
//! println!("{board}");
//!
//! let registry = Registry::builtin();
//! let result = play_game(&registry, "simplest", "random", &GameConfig::default()).unwrap();
//! println!("winner: {:?}", result.winner);
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod game;
pub mod playout;
pub mod players;
pub mod point;
pub mod record;
pub mod rules;
pub mod stability;
