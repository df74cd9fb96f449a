//! Width-first minimax over a static evaluation.
//!
//! The game tree is grown breadth-first in an arena until the deadline or the
//! node cap. Every node caches an evaluation from the root player's point of
//! view; once a node has children it carries its best child's score instead,
//! max for nodes where the root player moves and min otherwise. Scores are
//! pushed upward by [`Tree::update`] whenever a child is added.
//!
//! Nodes do not keep a board. The position of a node is rebuilt from the root
//! by replaying the moves on its path, which only happens when it is expanded.

use std::collections::VecDeque;
use std::time::Instant;

use log::debug;

use crate::board::{Board, Color};
use crate::constants::{WIDTH_FIRST_MARGIN, WIDTH_FIRST_MAX_NODES};
use crate::eval::Evaluator;
use crate::players::{Player, turn_deadline};
use crate::point::Point;
use crate::rules::{is_game_over, legal_moves};

#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    /// Move that led here; `None` for the root and for passes.
    point: Option<Point>,
    to_move: Color,
    score: f64,
    best_child: Option<usize>,
    children: Vec<usize>,
}

/// Arena game tree rooted at index 0.
pub(crate) struct Tree {
    nodes: Vec<Node>,
    root_board: Board,
    root_color: Color,
    evaluator: Evaluator,
}

impl Tree {
    pub(crate) fn new(board: &Board, root_color: Color, evaluator: Evaluator) -> Self {
        let root = Node {
            parent: None,
            point: None,
            to_move: root_color,
            score: evaluator.evaluate(board, root_color),
            best_child: None,
            children: Vec::new(),
        };
        Tree {
            nodes: vec![root],
            root_board: board.clone(),
            root_color,
            evaluator,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn score(&self, node: usize) -> f64 {
        self.nodes[node].score
    }

    /// The move of the root's best child.
    pub(crate) fn best_point(&self) -> Option<Point> {
        self.nodes[0].best_child.and_then(|c| self.nodes[c].point)
    }

    fn depth(&self, node: usize) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// The position at `node`, replayed from the root board.
    pub(crate) fn board_at(&self, node: usize) -> Board {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            path.push((self.nodes[parent].to_move, self.nodes[current].point));
            current = parent;
        }
        let mut board = self.root_board.clone();
        for (color, point) in path.into_iter().rev() {
            if let Some(pt) = point {
                board.place(color, pt);
            }
        }
        board
    }

    /// Successor positions of `node`: one per legal move, a single pass if
    /// only the opponent can move, none at game over.
    fn successors(&self, node: usize) -> Vec<(Option<Point>, Board, Color)> {
        let to_move = self.nodes[node].to_move;
        let board = self.board_at(node);
        if is_game_over(&board) {
            return Vec::new();
        }
        let moves = legal_moves(&board, to_move);
        if moves.is_empty() {
            return vec![(None, board, to_move.opposite())];
        }
        moves
            .into_iter()
            .map(|pt| {
                let mut next = board.clone();
                next.place(to_move, pt);
                (Some(pt), next, to_move.opposite())
            })
            .collect()
    }

    /// Create the children of `node`, propagating after each one. Returns the
    /// new child indices, or `None` without touching the tree if they would
    /// not fit under `max_nodes`.
    pub(crate) fn expand(&mut self, node: usize, max_nodes: usize) -> Option<Vec<usize>> {
        let successors = self.successors(node);
        if self.nodes.len() + successors.len() > max_nodes {
            return None;
        }
        let mut created = Vec::with_capacity(successors.len());
        for (point, board, to_move) in successors {
            let child = self.add_child(node, point, &board, to_move);
            created.push(child);
        }
        Some(created)
    }

    fn add_child(&mut self, parent: usize, point: Option<Point>, board: &Board, to_move: Color) -> usize {
        let score = self.evaluator.evaluate(board, self.root_color);
        let child = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            point,
            to_move,
            score,
            best_child: None,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(child);
        self.update(parent, child);
        child
    }

    /// Whether `a` is strictly better than `b` for whoever moves at `node`.
    fn prefers(&self, node: usize, a: f64, b: f64) -> bool {
        if self.nodes[node].to_move == self.root_color {
            a > b
        } else {
            a < b
        }
    }

    /// `child` of `node` was added or changed its score. Re-select the best
    /// child of `node` and carry any change up to the root.
    pub(crate) fn update(&mut self, node: usize, child: usize) {
        let mut node = node;
        let mut child = child;
        loop {
            let before = (self.nodes[node].best_child, self.nodes[node].score);
            let child_score = self.nodes[child].score;

            match self.nodes[node].best_child {
                None => self.set_best(node, child),
                Some(best) if best == child => {
                    if self.prefers(node, self.nodes[node].score, child_score) {
                        self.rescan(node);
                    } else {
                        self.nodes[node].score = child_score;
                    }
                }
                Some(_) => {
                    if self.prefers(node, child_score, self.nodes[node].score) {
                        self.set_best(node, child);
                    }
                }
            }

            if (self.nodes[node].best_child, self.nodes[node].score) == before {
                break;
            }
            match self.nodes[node].parent {
                Some(parent) => {
                    child = node;
                    node = parent;
                }
                None => break,
            }
        }
    }

    fn set_best(&mut self, node: usize, child: usize) {
        self.nodes[node].best_child = Some(child);
        self.nodes[node].score = self.nodes[child].score;
    }

    /// Pick the best child from scratch; the earliest one wins ties.
    fn rescan(&mut self, node: usize) {
        let mut best: Option<usize> = None;
        for &c in &self.nodes[node].children {
            let better = match best {
                None => true,
                Some(b) => self.prefers(node, self.nodes[c].score, self.nodes[b].score),
            };
            if better {
                best = Some(c);
            }
        }
        if let Some(b) = best {
            self.set_best(node, b);
        }
    }
}

pub struct WidthFirstPlayer {
    color: Color,
    millis_per_turn: u64,
    evaluator: Evaluator,
    max_nodes: usize,
}

impl WidthFirstPlayer {
    pub fn new(color: Color, millis_per_turn: u64) -> Self {
        Self {
            color,
            millis_per_turn,
            evaluator: Evaluator::default(),
            max_nodes: WIDTH_FIRST_MAX_NODES,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Cap the tree size (at least the root and its children are always built).
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Player for WidthFirstPlayer {
    fn choose_point(&mut self, board: &Board, millis_in_game: u64) -> Option<Point> {
        let moves = legal_moves(board, self.color);
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        let deadline = turn_deadline(board, millis_in_game, self.millis_per_turn, WIDTH_FIRST_MARGIN);
        let mut tree = Tree::new(board, self.color, self.evaluator);
        let mut queue: VecDeque<usize> = tree.expand(0, usize::MAX).unwrap_or_default().into();
        let mut depth_reached = 1;

        while let Some(node) = queue.pop_front() {
            if Instant::now() >= deadline {
                break;
            }
            match tree.expand(node, self.max_nodes) {
                Some(children) => queue.extend(children),
                None => break,
            }
            depth_reached = depth_reached.max(tree.depth(node) + 1);
        }

        debug!(
            "width-first {} ({}): {} nodes, depth {depth_reached}, score {}",
            self.color,
            self.evaluator,
            tree.len(),
            tree.score(0)
        );
        tree.best_point().or_else(|| moves.first().copied())
    }
}
