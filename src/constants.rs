//! Constants for board dimensions, time management, and player parameters.
//!
//! The board is a plain row-major array of `HEIGHT * WIDTH` cells. Every
//! player that works against a clock reserves a small safety margin so that
//! the harness never sees it overrun its budget.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const HEIGHT: usize = 8;

/// Number of columns on the board.
pub const WIDTH: usize = 8;

/// Total number of cells.
pub const CELLS: usize = HEIGHT * WIDTH;

// Point stores its coordinates as bytes and prints its column as a single letter.
const _: () = assert!(HEIGHT >= 4 && WIDTH >= 4 && HEIGHT <= 26 && WIDTH <= 26);

// =============================================================================
// Clock Defaults
// =============================================================================

/// Default total thinking time per player and game (milliseconds).
pub const DEFAULT_MILLIS_IN_GAME: u64 = 30_000;

/// Default thinking time limit per move (milliseconds).
pub const DEFAULT_MILLIS_PER_TURN: u64 = 1_000;

// =============================================================================
// Deadline Margins
// =============================================================================

/// Safety margin for the depth-first solver (milliseconds).
pub const DEPTH_FIRST_MARGIN: u64 = 20;

/// Safety margin for the Monte Carlo player (milliseconds).
pub const MONTE_CARLO_MARGIN: u64 = 45;

/// Safety margin for the width-first player (milliseconds).
pub const WIDTH_FIRST_MARGIN: u64 = 30;

// =============================================================================
// Search Parameters
// =============================================================================

/// Playouts run per candidate move in one Monte Carlo round.
pub const PLAYOUTS_PER_ROUND: usize = 25;

/// Upper bound on the number of nodes the width-first tree may hold.
pub const WIDTH_FIRST_MAX_NODES: usize = 500_000;

// =============================================================================
// Mixed Player Thresholds (empty cells)
// =============================================================================

/// Above this many empty cells the mixed player plays randomly.
pub const MIXED_RANDOM_ABOVE: usize = 50;

/// Above this many empty cells the mixed player uses the rule-based player.
pub const MIXED_RULE_BASED_ABOVE: usize = 35;

/// Above this many empty cells the mixed player uses Monte Carlo; at or below
/// it the depth-first solver takes over.
pub const MIXED_MONTE_CARLO_ABOVE: usize = 10;
