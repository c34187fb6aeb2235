//! MCTS tree node representation.
//!
//! Each node owns a relative board snapshot: `+1` is the side to move at that
//! node. Visit statistics are kept from the same side's point of view, so a
//! parent reads a child's mean value negated.

use games_connect4::{Board, GameResult, Player, COLS};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Child slots of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children {
    /// Not expanded yet.
    Unexpanded,

    /// One slot per column; `None` for full columns.
    Expanded([Option<NodeId>; COLS]),
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Position at this node, relative to the side to move
    pub board: Board,

    /// Cached outcome of `board`
    pub result: GameResult,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of values backpropagated through this node, seen by the side to
    /// move here. Q = value_sum / visit_count
    pub value_sum: f32,

    /// Prior probability of reaching this node from its parent.
    /// Only used by the guided search; 1.0 otherwise.
    pub prior: f32,

    pub children: Children,
}

impl MctsNode {
    /// Create a new node for `board` with the given prior.
    pub fn new(board: Board, prior: f32) -> Self {
        Self {
            board,
            result: board.result(),
            visit_count: 0,
            value_sum: 0.0,
            prior,
            children: Children::Unexpanded,
        }
    }

    /// Calculate mean value Q = value_sum / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_over()
    }

    /// Reward of the finished game for the side to move here.
    ///
    /// The previous mover is `-1` on this board, so a win at a terminal node
    /// is always `Win(Two)` and scores -1.
    #[inline]
    pub fn terminal_value(&self) -> f32 {
        self.result.reward_for(Player::One)
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        matches!(self.children, Children::Expanded(_))
    }

    /// Check if this is a leaf node (not expanded or terminal).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal() || !self.is_expanded()
    }

    /// Occupied child slots as `(column, id)` pairs, in column order.
    pub fn child_ids(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        let slots: &[Option<NodeId>] = match &self.children {
            Children::Expanded(slots) => &slots[..],
            Children::Unexpanded => &[][..],
        };
        slots
            .iter()
            .enumerate()
            .filter_map(|(col, slot)| slot.map(|id| (col, id)))
    }

    /// UCT score of this node seen from its parent.
    ///
    /// `-Q + c * sqrt(ln(N_parent) / N)`. Unvisited nodes score +∞.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f32, c_uct: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let n = self.visit_count as f32;
        -self.mean_value() + c_uct * (parent_visits_ln / n).sqrt()
    }

    /// Prior-weighted score of this node seen from its parent.
    ///
    /// `-Q + c_puct * P / (1 + N)`. Unvisited nodes score +∞.
    #[inline]
    pub fn puct_score(&self, c_puct: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        -self.mean_value() + c_puct * self.prior / (1.0 + self.visit_count as f32)
    }
}
