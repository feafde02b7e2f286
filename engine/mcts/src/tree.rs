//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices.

use chess_core::{Move, Position};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at the given position.
    pub fn new(root_position: Position) -> Self {
        let root_node = MctsNode::new_root(root_position);
        Self {
            nodes: vec![root_node],
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

    /// Select the best child of a node using UCB1.
    /// Returns the NodeId of the best child.
    pub fn select_child(&self, node_id: NodeId, exploration: f32) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute the log once instead of per-child comparison.
        // max(1) keeps ln() finite for an unvisited parent.
        let ln_parent_visits = (node.visit_count.max(1) as f32).ln();

        node.children
            .iter()
            .max_by(|(_, id_a), (_, id_b)| {
                let score_a = self.get(*id_a).ucb_score(ln_parent_visits, exploration);
                let score_b = self.get(*id_b).ucb_score(ln_parent_visits, exploration);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(_, id)| *id)
    }

    /// Add a child to a parent node for the given move.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: Move, position: Position) -> NodeId {
        let child = MctsNode::new_child(parent_id, mv, position);
        let child_id = self.allocate(child);

        self.get_mut(parent_id).children.push((mv, child_id));

        child_id
    }

    /// Backpropagate a result from a leaf to the root.
    /// The value is flipped (`1 - v`) at each level because each node
    /// stores results from its own mover's perspective.
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f32) {
        let mut current_id = leaf_id;
        let mut current_value = value;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.value_sum += current_value;

            current_value = 1.0 - current_value;

            current_id = node.parent;
        }
    }

    /// Get the best move from the root: most visits, ties broken by
    /// mean value, then by expansion order (first child wins).
    pub fn best_move(&self) -> Option<(Move, NodeId)> {
        let root = self.get(self.root);
        let mut best: Option<(Move, NodeId, u32, f32)> = None;
        for &(mv, id) in &root.children {
            let node = self.get(id);
            let better = match best {
                None => true,
                Some((_, _, visits, mean)) => {
                    node.visit_count > visits
                        || (node.visit_count == visits && node.mean_value() > mean)
                }
            };
            if better {
                best = Some((mv, id, node.visit_count, node.mean_value()));
            }
        }
        best.map(|(mv, id, _, _)| (mv, id))
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
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
