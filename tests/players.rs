//! Integration tests for the search players and the game harness.

use reversi_rust::board::{Board, Color, Move};
use reversi_rust::eval::Evaluator;
use reversi_rust::game::{GameConfig, play_game, play_match};
use reversi_rust::players::depth_first::solve;
use reversi_rust::players::{
    DepthFirstPlayer, MixedPlayer, MonteCarloPlayer, Player, Registry, RuleBasedPlayer, WidthFirstPlayer,
};
use reversi_rust::point::Point;
use reversi_rust::rules::{has_legal_move, is_game_over, legal_moves, winner};

fn pt(s: &str) -> Point {
    s.parse().unwrap()
}

/// Game value for `color` under perfect play: 1 win, 0 draw, -1 loss.
fn brute_force(board: &Board, color: Color) -> i32 {
    let opponent = color.opposite();
    let moves = legal_moves(board, color);
    if moves.is_empty() {
        if !has_legal_move(board, opponent) {
            return (board.count(color) as i32 - board.count(opponent) as i32).signum();
        }
        return -brute_force(board, opponent);
    }
    moves
        .into_iter()
        .map(|p| -brute_force(&board.applied(Move::put(color, p)).unwrap(), opponent))
        .max()
        .unwrap()
}

fn value_of(winner: Option<Color>, color: Color) -> i32 {
    match winner {
        Some(c) if c == color => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Random positions with at most `max_empty` empty cells where the side to
/// move has a choice to make.
fn endgame_positions(seed: u64, count: usize, max_empty: usize) -> Vec<(Board, Color)> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut positions = Vec::new();
    while positions.len() < count {
        let mut board = Board::new();
        let mut color = Color::Black;
        while !is_game_over(&board) {
            let moves = legal_moves(&board, color);
            if board.empty_cells() <= max_empty && moves.len() >= 2 {
                positions.push((board.clone(), color));
                break;
            }
            if let Some(&p) = moves.get(rng.usize(..moves.len().max(1))) {
                board.apply(Move::put(color, p)).unwrap();
            }
            color = color.opposite();
        }
    }
    positions
}

/// Black can only play c1: the white bottom row runs into the edge.
fn single_move_board() -> Board {
    Board::from_stones([
        (pt("a1"), Color::Black),
        (pt("b1"), Color::White),
        (pt("e8"), Color::White),
        (pt("f8"), Color::White),
        (pt("g8"), Color::White),
        (pt("h8"), Color::White),
    ])
}

// =============================================================================
// Depth-first solver
// =============================================================================

#[test]
fn test_solver_matches_brute_force() {
    for (board, color) in endgame_positions(2024, 25, 6) {
        let expected = brute_force(&board, color);
        assert_eq!(value_of(solve(&board, color), color), expected, "\n{board}");

        let mut player = DepthFirstPlayer::new(color, 10_000).seeded(1);
        let chosen = player.choose_point(&board, 600_000).unwrap();
        let after = board.applied(Move::put(color, chosen)).unwrap();
        assert_eq!(
            -brute_force(&after, color.opposite()),
            expected,
            "{chosen} does not keep the game value\n{board}"
        );
    }
}

// =============================================================================
// Shortcuts
// =============================================================================

#[test]
fn test_single_legal_move_with_zero_budget() {
    let board = single_move_board();
    assert_eq!(legal_moves(&board, Color::Black), vec![pt("c1")]);

    let mut players: Vec<Box<dyn Player>> = vec![
        Box::new(MonteCarloPlayer::new(Color::Black, 0)),
        Box::new(WidthFirstPlayer::new(Color::Black, 0)),
        Box::new(RuleBasedPlayer::new(Color::Black)),
        Box::new(DepthFirstPlayer::new(Color::Black, 0)),
    ];
    for player in &mut players {
        assert_eq!(player.choose_point(&board, 0), Some(pt("c1")));
    }
}

#[test]
fn test_every_player_passes_when_stuck() {
    let board = single_move_board();
    let registry = Registry::builtin();
    for entry in registry.entries() {
        let mut player = registry.create(entry.name, Color::White, 1_000, 100).unwrap();
        assert_eq!(player.choose_point(&board, 1_000), None, "{}", entry.name);
    }
}

// =============================================================================
// Search players on real positions
// =============================================================================

#[test]
fn test_search_players_choose_legal_moves_midgame() {
    let positions = endgame_positions(5, 3, 30);
    for (board, color) in positions {
        let legal = legal_moves(&board, color);
        let mut players: Vec<Box<dyn Player>> = vec![
            Box::new(MonteCarloPlayer::new(color, 100).seeded(3)),
            Box::new(WidthFirstPlayer::new(color, 100).with_evaluator(Evaluator::Blended)),
            Box::new(RuleBasedPlayer::new(color).seeded(3)),
            Box::new(MixedPlayer::new(color, 100).seeded(3)),
        ];
        for player in &mut players {
            let chosen = player.choose_point(&board, 30_000).unwrap();
            assert!(legal.contains(&chosen), "{chosen} is not legal\n{board}");
        }
    }
}

// =============================================================================
// Harness
// =============================================================================

#[test]
fn test_random_players_finish_a_game() {
    let registry = Registry::builtin();
    let config = GameConfig::default();
    let result = play_game(&registry, "random", "random", &config).unwrap();
    assert!(result.forfeit.is_none());
    assert!(is_game_over(&result.board));
    assert_eq!(winner(&result.board), Ok(result.winner));
    assert!(result.moves.len() >= 4);
}

#[test]
fn test_rule_based_match() {
    let registry = Registry::builtin();
    let config = GameConfig {
        millis_in_game: 10_000,
        millis_per_turn: 1_000,
    };
    let result = play_match(&registry, "rule-based", "random", 4, &config).unwrap();
    assert_eq!(result.record.total(), 4);
    assert_eq!(result.b_record().total(), 4);
}
