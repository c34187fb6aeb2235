//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Nodes carry no parent pointer: selection records the path it walks and
//! backpropagation consumes that path.

use games_connect4::{Move, COLS};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::node::{Children, MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at `root`.
    pub fn new(root: MctsNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand a node with one child per legal column.
    ///
    /// The child board is the position after `+1` plays the column, negated
    /// so the opponent becomes `+1`. `priors[col]` is copied into the child.
    /// Returns the IDs of the new children in column order; expanding an
    /// already expanded node is a no-op returning its existing children.
    pub fn expand(&mut self, id: NodeId, priors: &[f32; COLS]) -> Vec<NodeId> {
        let node = self.get(id);
        if node.is_expanded() {
            return node.child_ids().map(|(_, child)| child).collect();
        }

        let board = node.board;
        let mut slots = [None; COLS];
        let mut created = Vec::with_capacity(COLS);
        for mv in board.legal_moves() {
            let child_board = board.apply(mv, 1).negated();
            let child = self.allocate(MctsNode::new(child_board, priors[mv.col()]));
            slots[mv.col()] = Some(child);
            created.push(child);
        }

        self.get_mut(id).children = Children::Expanded(slots);
        created
    }

    /// Select a child of `id` by UCT, breaking ties uniformly at random.
    pub fn select_uct(&self, id: NodeId, c_uct: f32, rng: &mut ChaCha20Rng) -> Option<NodeId> {
        let node = self.get(id);
        // Pre-compute ln once instead of per child
        let parent_visits_ln = (node.visit_count.max(1) as f32).ln();

        let mut best_score = f32::NEG_INFINITY;
        let mut tied: Vec<NodeId> = Vec::with_capacity(COLS);
        for (_, child_id) in node.child_ids() {
            let score = self.get(child_id).uct_score(parent_visits_ln, c_uct);
            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(child_id);
            } else if score == best_score {
                tied.push(child_id);
            }
        }

        tied.choose(rng).copied()
    }

    /// Select a child of `id` by the prior-weighted score.
    /// Ties go to the lowest column.
    pub fn select_puct(&self, id: NodeId, c_puct: f32) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for (_, child_id) in self.get(id).child_ids() {
            let score = self.get(child_id).puct_score(c_puct);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Backpropagate `value` along `path` (root first, leaf last).
    ///
    /// `value` is seen by the side to move at the leaf and is negated at each
    /// level on the way up.
    pub fn backpropagate(&mut self, path: &[NodeId], value: f32) {
        let mut current_value = value;
        for &id in path.iter().rev() {
            let node = self.get_mut(id);
            node.visit_count += 1;
            node.value_sum += current_value;

            // Negate for opponent's perspective
            current_value = -current_value;
        }
    }

    /// Visit counts of the root children by column (0 for full columns).
    pub fn root_visits(&self) -> [u32; COLS] {
        let mut visits = [0u32; COLS];
        for (col, id) in self.get(self.root).child_ids() {
            visits[col] = self.get(id).visit_count;
        }
        visits
    }

    /// Most visited root column. Ties go to the lowest column.
    pub fn best_column(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (col, id) in self.get(self.root).child_ids() {
            let visits = self.get(id).visit_count;
            if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((col, visits));
            }
        }
        best.map(|(col, _)| col)
    }

    /// Move played from the root into `col`.
    pub fn root_move(&self, col: usize) -> Option<Move> {
        self.get(self.root).board.drop_target(col)
    }

    /// Visit distribution over root columns.
    ///
    /// Temperature 0 puts all mass on [`MctsTree::best_column`]; otherwise
    /// mass is proportional to `visits^(1/T)`.
    pub fn root_policy(&self, temperature: f32) -> [f32; COLS] {
        let mut policy = [0.0f32; COLS];
        let visits = self.root_visits();

        if temperature < 1e-6 {
            // Greedy: all mass on best column
            if let Some(col) = self.best_column() {
                policy[col] = 1.0;
            }
            return policy;
        }

        for (p, &v) in policy.iter_mut().zip(visits.iter()) {
            let v = v as f32;
            *p = if temperature == 1.0 {
                v
            } else {
                v.powf(1.0 / temperature)
            };
        }

        let total: f32 = policy.iter().sum();
        if total > 0.0 {
            for p in &mut policy {
                *p /= total;
            }
        }
        policy
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        self.get(node_id)
            .child_ids()
            .map(|(_, id)| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::Board;
    use rand::SeedableRng;

    const UNIFORM: [f32; COLS] = [1.0 / 7.0; COLS];

    fn new_tree() -> MctsTree {
        MctsTree::new(MctsNode::new(Board::new(), 1.0))
    }

    #[test]
    fn test_new_tree() {
        let tree = new_tree();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).is_leaf());
    }

    #[test]
    fn test_expand() {
        let mut tree = new_tree();
        let children = tree.expand(tree.root(), &UNIFORM);

        assert_eq!(children.len(), COLS);
        assert_eq!(tree.len(), COLS + 1);

        // Child boards are negated: the root's piece shows up as -1
        let child = tree.get(children[3]);
        assert_eq!(child.board.get(5, 3), -1);
        assert_eq!(child.board.piece_count(), 1);
        assert!((child.prior - 1.0 / 7.0).abs() < 1e-6);

        // Expanding twice does not allocate
        let again = tree.expand(tree.root(), &UNIFORM);
        assert_eq!(again, children);
        assert_eq!(tree.len(), COLS + 1);
    }

    #[test]
    fn test_expand_skips_full_columns() {
        let mut board = Board::new();
        for i in 0..6 {
            let mv = board.drop_target(0).unwrap();
            board = board.apply(mv, if i % 2 == 0 { 1 } else { -1 });
        }
        let mut tree = MctsTree::new(MctsNode::new(board, 1.0));
        tree.expand(tree.root(), &UNIFORM);

        let cols: Vec<usize> = tree.get(tree.root()).child_ids().map(|(c, _)| c).collect();
        assert_eq!(cols, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = new_tree();
        let child = tree.expand(tree.root(), &UNIFORM)[0];
        let grandchild = tree.expand(child, &UNIFORM)[0];

        // Backpropagate value 1.0 from grandchild
        tree.backpropagate(&[tree.root(), child, grandchild], 1.0);

        // Check visits
        assert_eq!(tree.get(grandchild).visit_count, 1);
        assert_eq!(tree.get(child).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);

        // Check values (negated at each level)
        assert!((tree.get(grandchild).value_sum - 1.0).abs() < 1e-6);
        assert!((tree.get(child).value_sum - (-1.0)).abs() < 1e-6);
        assert!((tree.get(tree.root()).value_sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_select_uct_prefers_unvisited() {
        let mut tree = new_tree();
        let children = tree.expand(tree.root(), &UNIFORM);
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        // Visit every child except column 4
        for (i, &child) in children.iter().enumerate() {
            if i != 4 {
                tree.backpropagate(&[tree.root(), child], 1.0);
            }
        }

        assert_eq!(tree.select_uct(tree.root(), 1.4, &mut rng), Some(children[4]));
    }

    #[test]
    fn test_select_uct_breaks_ties_randomly() {
        let mut tree = new_tree();
        let children = tree.expand(tree.root(), &UNIFORM);
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        // All children unvisited: every pick is a tie
        let mut seen = [false; COLS];
        for _ in 0..200 {
            let id = tree.select_uct(tree.root(), 1.4, &mut rng).unwrap();
            let col = children.iter().position(|&c| c == id).unwrap();
            seen[col] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_select_puct() {
        let mut tree = new_tree();
        let mut priors = [0.1f32; COLS];
        priors[5] = 0.4;
        let children = tree.expand(tree.root(), &priors);

        // Unvisited children come first, lowest column on ties
        assert_eq!(tree.select_puct(tree.root(), 1.0), Some(children[0]));

        tree.get_mut(children[0]).visit_count = 1;
        assert_eq!(tree.select_puct(tree.root(), 1.0), Some(children[1]));

        // Once every child is visited equally the prior decides
        for &id in &children {
            tree.get_mut(id).visit_count = 1;
        }
        assert_eq!(tree.select_puct(tree.root(), 1.0), Some(children[5]));
    }

    #[test]
    fn test_best_column_and_policy() {
        let mut tree = new_tree();
        let children = tree.expand(tree.root(), &UNIFORM);

        tree.get_mut(children[1]).visit_count = 30;
        tree.get_mut(children[4]).visit_count = 70;

        assert_eq!(tree.best_column(), Some(4));
        assert_eq!(tree.root_move(4), Move::at(5, 4));

        let visits = tree.root_visits();
        assert_eq!(visits[1], 30);
        assert_eq!(visits[4], 70);

        // Temperature 1.0: proportional to visits
        let policy = tree.root_policy(1.0);
        assert!((policy[1] - 0.3).abs() < 1e-6);
        assert!((policy[4] - 0.7).abs() < 1e-6);

        // Temperature 0.0: greedy
        let greedy = tree.root_policy(0.0);
        assert!((greedy[4] - 1.0).abs() < 1e-6);
        assert!(greedy[1].abs() < 1e-6);
    }

    #[test]
    fn test_best_column_tie_goes_low() {
        let mut tree = new_tree();
        let children = tree.expand(tree.root(), &UNIFORM);
        tree.get_mut(children[2]).visit_count = 5;
        tree.get_mut(children[6]).visit_count = 5;

        assert_eq!(tree.best_column(), Some(2));
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = new_tree();
        let child = tree.expand(tree.root(), &UNIFORM)[0];
        tree.expand(child, &UNIFORM);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 1 + COLS + COLS);
        assert_eq!(stats.max_depth, 2);
    }
}
