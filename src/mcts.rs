//! Monte Carlo Tree Search (MCTS) with UCB1 selection and random playouts.
//!
//! Each iteration runs the four classic phases:
//! - selection: descend by UCB1 until a node still has untried moves or is terminal
//! - expansion: add one untried move as a new child
//! - simulation: random playout from the new child to the end of the game
//! - backpropagation: add the result to every node back up to the root
//!
//! The tree is an arena (`Vec<Node>`) addressed by index. Rewards are stored
//! from the searching player's point of view (win 1, draw 0.5, loss 0); at
//! nodes where the opponent chooses, selection uses `1 - win rate` instead.
//!
//! Search stops when the iteration budget is spent or the optional deadline
//! passes, whichever comes first. The answer is the most-visited root child.

use std::time::Instant;

use fastrand::Rng;
use log::{debug, error, trace, warn};

use crate::board::{Board, Player};
use crate::constants::UCB_EXPLORATION;
use crate::playout::{playout, reward};
use crate::position::{Position, str_coord};

/// Index of a node in the arena.
pub type NodeId = usize;

/// The root is always the first node.
pub const ROOT: NodeId = 0;

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position at this node
    pub board: Board,
    /// Side to move at this node
    pub to_move: Player,
    /// Move that led here from the parent; `None` for the root or a pass
    pub mv: Option<Position>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Moves not yet expanded. A lone `None` is a forced pass.
    untried: Vec<Option<Position>>,
    /// Number of playouts through this node
    pub visits: u32,
    /// Sum of rewards for the searching player
    pub score: f64,
}

impl Node {
    fn new(board: Board, to_move: Player, mv: Option<Position>, parent: Option<NodeId>) -> Self {
        let moves = board.valid_moves(to_move);
        let untried = if !moves.is_empty() {
            moves.into_iter().map(Some).collect()
        } else if board.has_valid_move(to_move.opponent()) {
            vec![None]
        } else {
            Vec::new()
        };
        Self {
            board,
            to_move,
            mv,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            score: 0.0,
        }
    }

    /// Neither side can move.
    pub fn is_terminal(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Average reward for the searching player.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits > 0 {
            self.score / self.visits as f64
        } else {
            0.0
        }
    }
}

/// Visit statistics for one root move.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub mv: Option<Position>,
    pub visits: u32,
    pub win_rate: f64,
}

/// Result of a tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult {
    /// Most-visited root move, `None` if the player has no legal move.
    pub best_move: Option<Position>,
    /// Iterations actually run.
    pub iterations: u32,
    pub root_visits: u32,
    /// Root children in expansion order.
    pub children: Vec<ChildStats>,
}

/// A search tree rooted at one position.
#[derive(Debug, Clone)]
pub struct Tree {
    pub nodes: Vec<Node>,
    player: Player,
    exploration: f64,
}

impl Tree {
    /// Tree for `player` to move on `board`.
    pub fn new(board: &Board, player: Player) -> Self {
        Self {
            nodes: vec![Node::new(board.clone(), player, None, None)],
            player,
            exploration: UCB_EXPLORATION,
        }
    }

    /// Override the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    /// UCB1 score of `child` as seen by whoever moves at its parent.
    fn ucb(&self, parent: &Node, child: &Node) -> f64 {
        let wr = child.win_rate();
        let exploit = if parent.to_move == self.player { wr } else { 1.0 - wr };
        let explore = ((parent.visits as f64).ln() / child.visits as f64).sqrt();
        exploit + self.exploration * explore
    }

    fn select(&self) -> NodeId {
        let mut id = ROOT;
        loop {
            let node = &self.nodes[id];
            if !node.is_fully_expanded() || node.children.is_empty() {
                return id;
            }
            id = node
                .children
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    self.ucb(node, &self.nodes[a])
                        .partial_cmp(&self.ucb(node, &self.nodes[b]))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(id);
        }
    }

    /// Add one untried child of `id`, chosen at random. Returns the new node,
    /// or `id` itself when it is terminal.
    fn expand(&mut self, id: NodeId, rng: &mut Rng) -> NodeId {
        let node = &mut self.nodes[id];
        if node.untried.is_empty() {
            return id;
        }
        let mv = node.untried.swap_remove(rng.usize(..node.untried.len()));
        let mut board = node.board.clone();
        let to_move = node.to_move;
        if let Some(p) = mv {
            if let Err(e) = board.make_move(p, to_move) {
                error!("cannot expand {}: {e}", str_coord(p));
                return id;
            }
        }

        let child = Node::new(board, to_move.opponent(), mv, Some(id));
        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.push(child_id);
        child_id
    }

    fn simulate(&self, id: NodeId, rng: &mut Rng) -> f64 {
        let node = &self.nodes[id];
        let mut board = node.board.clone();
        let winner = playout(&mut board, node.to_move, rng);
        reward(winner, self.player)
    }

    fn backpropagate(&mut self, mut id: NodeId, value: f64) {
        loop {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.score += value;
            match node.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    /// Run one select/expand/simulate/backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut Rng) {
        let leaf = self.select();
        let child = self.expand(leaf, rng);
        let value = self.simulate(child, rng);
        self.backpropagate(child, value);
    }

    /// Most-visited root child; the earliest expanded wins ties.
    pub fn best_move(&self) -> Option<Position> {
        let mut best: Option<&Node> = None;
        for &c in &self.root().children {
            let child = &self.nodes[c];
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|n| n.mv)
    }

    pub fn child_stats(&self) -> Vec<ChildStats> {
        self.root()
            .children
            .iter()
            .map(|&c| {
                let n = &self.nodes[c];
                ChildStats {
                    mv: n.mv,
                    visits: n.visits,
                    win_rate: n.win_rate(),
                }
            })
            .collect()
    }

    /// Log statistics for the root's children.
    pub fn dump_children(&self) {
        for stats in self.child_stats() {
            trace!(
                "move {} v={} wr={:.3}",
                stats.mv.map_or_else(|| "pass".to_string(), str_coord),
                stats.visits,
                stats.win_rate
            );
        }
    }
}

/// Search `board` for `player` with at most `iterations` playouts.
///
/// `deadline` is checked between iterations. A single legal move is returned
/// without searching.
pub fn tree_search(
    board: &Board,
    player: Player,
    iterations: u32,
    deadline: Option<Instant>,
    rng: &mut Rng,
) -> MctsResult {
    let moves = board.valid_moves(player);
    if moves.len() <= 1 {
        return MctsResult {
            best_move: moves.first().copied(),
            iterations: 0,
            root_visits: 0,
            children: Vec::new(),
        };
    }

    let mut tree = Tree::new(board, player);
    let mut done = 0;
    while done < iterations {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        tree.iterate(rng);
        done += 1;
    }

    let best_move = match tree.best_move() {
        Some(mv) => Some(mv),
        None => {
            warn!("monte carlo search stopped before any iteration");
            moves.first().copied()
        }
    };

    tree.dump_children();
    debug!(
        "mcts: {} after {done} iterations, {} nodes",
        best_move.map_or_else(|| "-".to_string(), str_coord),
        tree.nodes.len()
    );

    MctsResult {
        best_move,
        iterations: done,
        root_visits: tree.root().visits,
        children: tree.child_stats(),
    }
}
