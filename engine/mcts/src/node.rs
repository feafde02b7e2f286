//! MCTS tree node representation.
//!
//! Each node represents a position reached by playing a move from the parent.
//! Nodes store visit statistics used for UCB1 selection and the queue of
//! moves not yet expanded into children.

use chess_core::{classify_with_moves, legal_moves, GameOutcome, Move, Position};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
///
/// Value convention: `value_sum` accumulates results in [0, 1] from the
/// perspective of the player who moved INTO this node (the parent's side
/// to move). Selection therefore reads child values directly with no
/// sign flip; backpropagation flips with `1 - v` at each level instead.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from the parent (None for root)
    pub mv: Option<Move>,

    /// Position at this node
    pub position: Position,

    /// Outcome classification of `position`, computed once at creation
    pub outcome: GameOutcome,

    /// Legal moves not yet expanded into children, captures first.
    /// Empty for terminal nodes and for fully expanded nodes.
    pub untried: Vec<Move>,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of backpropagated results. Q = value_sum / visit_count
    pub value_sum: f32,

    /// Children: Vec of (move, NodeId) pairs, in expansion order
    pub children: Vec<(Move, NodeId)>,
}

/// Captures ahead of quiet moves, otherwise keeping generation order.
fn expansion_order(moves: Vec<Move>) -> Vec<Move> {
    let (captures, quiets): (Vec<Move>, Vec<Move>) =
        moves.into_iter().partition(|m| m.is_capture());
    let mut ordered = captures;
    ordered.extend(quiets);
    ordered
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(position: Position) -> Self {
        Self::build(NodeId::NONE, None, position)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: Move, position: Position) -> Self {
        Self::build(parent, Some(mv), position)
    }

    fn build(parent: NodeId, mv: Option<Move>, position: Position) -> Self {
        let moves = legal_moves(&position);
        let outcome = classify_with_moves(&position, &moves);
        let untried = if outcome.is_terminal() {
            Vec::new()
        } else {
            expansion_order(moves)
        };
        Self {
            parent,
            mv,
            position,
            outcome,
            untried,
            visit_count: 0,
            value_sum: 0.0,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// A node is fully expanded once every legal move has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
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

    /// Result in [0, 1] for terminal nodes, from the mover's perspective.
    /// Checkmate is always a win for the mover: the side to move in a
    /// mated position is the loser, and the mover is its opponent.
    ///
    /// Only meaningful when `is_terminal()` holds.
    #[inline]
    pub fn terminal_value(&self) -> f32 {
        match self.outcome {
            GameOutcome::Checkmate { .. } => 1.0,
            GameOutcome::Stalemate | GameOutcome::Draw { .. } => 0.5,
            GameOutcome::Ongoing => 0.5,
        }
    }

    /// Calculate UCB1 score for child selection.
    /// UCB1 = Q + c * sqrt(ln(N_parent) / N)
    ///
    /// Unvisited children score infinity so each child is tried once
    /// before any is revisited.
    ///
    /// Note: Takes pre-computed ln(parent_visits) to avoid redundant log
    /// calls when comparing multiple children.
    #[inline]
    pub fn ucb_score(&self, ln_parent_visits: f32, exploration: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let q = self.mean_value();
        let u = exploration * (ln_parent_visits / self.visit_count as f32).sqrt();
        q + u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Color, Piece, PieceKind, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root_from_startpos() {
        let node = MctsNode::new_root(Position::startpos());

        assert!(node.parent.is_none());
        assert!(node.mv.is_none());
        assert_eq!(node.visit_count, 0);
        assert!(!node.is_terminal());
        assert_eq!(node.untried.len(), 20);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_untried_moves_put_captures_first() {
        // White knight can capture a pawn or make quiet moves.
        let mut pos = Position::empty(Color::White);
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));
        pos.place(sq("a8"), Piece::new(PieceKind::King, Color::Black));
        pos.place(sq("d4"), Piece::new(PieceKind::Knight, Color::White));
        pos.place(sq("c6"), Piece::new(PieceKind::Pawn, Color::Black));

        let node = MctsNode::new_root(pos);
        assert!(node.untried[0].is_capture(), "captures come first");
        let first_quiet = node
            .untried
            .iter()
            .position(|m| !m.is_capture())
            .expect("quiet moves exist");
        assert!(
            node.untried[first_quiet..].iter().all(|m| !m.is_capture()),
            "no capture after the first quiet move"
        );
    }

    #[test]
    fn test_terminal_node_has_no_untried_moves() {
        // Back-rank mate: Black to move, mated.
        let mut pos = Position::empty(Color::Black);
        pos.place(sq("g8"), Piece::new(PieceKind::King, Color::Black));
        pos.place(sq("f7"), Piece::new(PieceKind::Pawn, Color::Black));
        pos.place(sq("g7"), Piece::new(PieceKind::Pawn, Color::Black));
        pos.place(sq("h7"), Piece::new(PieceKind::Pawn, Color::Black));
        pos.place(sq("a8"), Piece::new(PieceKind::Rook, Color::White));
        pos.place(sq("e1"), Piece::new(PieceKind::King, Color::White));

        let node = MctsNode::new_root(pos);
        assert!(node.is_terminal());
        assert!(node.untried.is_empty());
        assert!((node.terminal_value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mean_value() {
        let mut node = MctsNode::new_root(Position::startpos());

        // Unvisited
        assert!(node.mean_value().abs() < 1e-6);

        node.visit_count = 4;
        node.value_sum = 2.0;
        assert!((node.mean_value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ucb_unvisited_is_infinite() {
        let node = MctsNode::new_root(Position::startpos());
        assert_eq!(node.ucb_score(2.0_f32.ln(), 1.4), f32::INFINITY);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = MctsNode::new_root(Position::startpos());
        node.visit_count = 10;
        node.value_sum = 6.0; // Q = 0.6

        let ln_parent = 100.0_f32.ln();
        let ucb = node.ucb_score(ln_parent, 1.0);
        // Q + sqrt(ln(100)/10) = 0.6 + sqrt(0.4605...) ~ 1.2786
        assert!((ucb - 1.2786).abs() < 0.001);

        // More visits shrink the exploration term.
        node.visit_count = 100;
        node.value_sum = 60.0;
        assert!(node.ucb_score(ln_parent, 1.0) < ucb);
    }
}
